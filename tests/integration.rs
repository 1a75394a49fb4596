//! Integration tests for inknote host-testable logic: full
//! command-channel-to-store-to-UI flows, without hardware.

use inknote::command::{self, Command};
use inknote::config::{MAX_NOTES, SLEEP_IDLE_MS};
use inknote::notes::NoteStore;
use inknote::pages::{Action, Page, PageMachine, UiEvent};
use inknote::power::{LifecycleEvent, LifecycleManager};

/// Apply a parsed command's store and selection effects the way the
/// control loop does: a fresh note becomes the selection, clearing
/// resets it.
fn apply(store: &mut NoteStore, pages: &mut PageMachine, cmd: &Command) {
    match cmd {
        Command::AppendNote(body) | Command::AppendImplicit(body) => {
            store.append(body);
            pages.set_selected_note(store.count() - 1);
        }
        Command::ClearNotes => {
            store.clear_all();
            pages.set_selected_note(0);
        }
        Command::SetTime(_) | Command::DisableRadio => {}
    }
}

#[test]
fn note_command_roundtrip() {
    let mut store = NoteStore::new();
    let mut pages = PageMachine::new();
    let cmd = command::parse("NOTE:Buy milk").expect("non-empty command");
    apply(&mut store, &mut pages, &cmd);

    // The prefix is not retained in the stored note.
    assert_eq!(store.count(), 1);
    assert_eq!(store.read(0), "Buy milk");
    assert_eq!(cmd.render_page(), Page::NotesList);
}

#[test]
fn clear_notes_after_three_appends() {
    let mut store = NoteStore::new();
    let mut pages = PageMachine::new();
    for text in ["NOTE:a", "NOTE:b", "plain text note"] {
        let cmd = command::parse(text).unwrap();
        apply(&mut store, &mut pages, &cmd);
    }
    assert_eq!(store.count(), 3);
    assert_eq!(store.read(2), "plain text note");
    assert_eq!(pages.selected_note(), 2);

    let cmd = command::parse("CLEAR_NOTES").unwrap();
    apply(&mut store, &mut pages, &cmd);
    assert_eq!(store.count(), 0);
    assert_eq!(store.read(0), "");
    assert_eq!(pages.selected_note(), 0);
}

#[test]
fn command_stream_respects_capacity() {
    let mut store = NoteStore::new();
    let mut pages = PageMachine::new();
    for i in 0..=MAX_NOTES {
        let text = format!("NOTE:item {i}");
        apply(&mut store, &mut pages, &command::parse(&text).unwrap());
    }
    assert_eq!(store.count(), MAX_NOTES);
    assert_eq!(store.read(MAX_NOTES - 1), format!("item {MAX_NOTES}"));
    // The overwritten last slot stays the selection.
    assert_eq!(pages.selected_note(), MAX_NOTES - 1);
}

#[test]
fn browse_notes_from_the_dashboard() {
    let mut store = NoteStore::new();
    let mut pages = PageMachine::new();
    apply(&mut store, &mut pages, &command::parse("NOTE:first").unwrap());
    apply(&mut store, &mut pages, &command::parse("NOTE:second").unwrap());

    // The latest note is selected, so NoteView opens on it.
    assert_eq!(pages.apply(UiEvent::Nav(1)), Some(Action::Render(Page::NotesList)));
    assert_eq!(pages.apply(UiEvent::ShortPress), Some(Action::Render(Page::NoteView)));
    assert_eq!(store.read(pages.selected_note()), "second");

    // Selecting past the end views an empty note rather than failing.
    pages.set_selected_note(9);
    assert_eq!(store.read(pages.selected_note()), "");
}

#[test]
fn long_press_radio_session_then_sleep() {
    let mut pages = PageMachine::new();
    let mut lifecycle = LifecycleManager::new(0);

    // Long press enables the radio; sleep is held off indefinitely.
    assert_eq!(pages.apply(UiEvent::LongPress), Some(Action::ToggleRadio));
    assert!(lifecycle.toggle_radio(0));
    assert_eq!(lifecycle.tick(SLEEP_IDLE_MS * 3), None);

    // Long press again disables it; idle then runs down to sleep.
    let now = SLEEP_IDLE_MS * 3;
    assert_eq!(pages.apply(UiEvent::LongPress), Some(Action::ToggleRadio));
    assert!(!lifecycle.toggle_radio(now));
    lifecycle.activity(now);
    assert_eq!(lifecycle.tick(now + SLEEP_IDLE_MS - 1), None);
    assert_eq!(
        lifecycle.tick(now + SLEEP_IDLE_MS),
        Some(LifecycleEvent::EnterSleep)
    );
}

#[test]
fn redundant_ble_off_makes_no_visible_transition() {
    let mut lifecycle = LifecycleManager::new(0);
    let cmd = command::parse("BLE:OFF").unwrap();
    assert!(matches!(cmd, Command::DisableRadio));

    // Radio was never enabled: no transition, so the control loop
    // skips the dashboard repaint for this command.
    assert!(!lifecycle.disable_radio());

    // With a session up the same command disables and repaints.
    lifecycle.enable_radio(10);
    assert!(lifecycle.disable_radio());
    assert_eq!(cmd.render_page(), Page::Dashboard);
}
