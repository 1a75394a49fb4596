//! BLE command grammar.
//!
//! The channel delivers opaque byte strings; this module turns them
//! into typed commands. Parsing is pure and has no side effects -
//! effect application happens in the control loop against the note
//! store / clock / radio, which keeps the grammar unit-testable
//! without hardware.
//!
//! Grammar (literal prefixes, case-sensitive, first match wins):
//!
//! | Pattern        | Effect                                        |
//! |----------------|-----------------------------------------------|
//! | `NOTE:<rest>`  | append note with body `<rest>`                |
//! | `TIME:<digits>`| set clock to epoch seconds (bad digits -> 0)  |
//! | `CLEAR_NOTES`  | clear all notes (exact match)                 |
//! | `BLE:OFF`      | disable the radio channel (exact match)       |
//! | anything else  | implicit note - whole string is the body      |
//!
//! An unrecognised string is never an error: it becomes a note. For an
//! unattended device, keeping the text beats rejecting it.

use crate::pages::Page;

/// A parsed channel command. Borrows from the inbound buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command<'a> {
    /// `NOTE:` prefixed append; body may be empty.
    AppendNote(&'a str),
    /// `TIME:` set the wall clock, epoch seconds.
    SetTime(u64),
    /// `CLEAR_NOTES`.
    ClearNotes,
    /// `BLE:OFF`.
    DisableRadio,
    /// No prefix matched; the whole string becomes a note.
    AppendImplicit(&'a str),
}

/// Parse one inbound string. `None` only for empty input, which is
/// ignored with no effect.
pub fn parse(text: &str) -> Option<Command<'_>> {
    if text.is_empty() {
        return None;
    }
    if let Some(body) = text.strip_prefix("NOTE:") {
        return Some(Command::AppendNote(body));
    }
    if let Some(digits) = text.strip_prefix("TIME:") {
        // Parse failure degrades to epoch 0, never an error.
        return Some(Command::SetTime(digits.parse().unwrap_or(0)));
    }
    if text == "CLEAR_NOTES" {
        return Some(Command::ClearNotes);
    }
    if text == "BLE:OFF" {
        return Some(Command::DisableRadio);
    }
    Some(Command::AppendImplicit(text))
}

impl Command<'_> {
    /// The page most relevant to this command's mutation, re-rendered
    /// after the effect is applied.
    pub fn render_page(&self) -> Page {
        match self {
            Command::AppendNote(_) | Command::AppendImplicit(_) | Command::ClearNotes => {
                Page::NotesList
            }
            Command::SetTime(_) | Command::DisableRadio => Page::Dashboard,
        }
    }
}
