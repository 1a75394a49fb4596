//! Page renderer for the bistable panel.
//!
//! Paints each page descriptor with embedded-graphics mono text into
//! any monochrome draw target. The concrete e-ink controller is kept
//! behind [`Panel`]: a full-frame flush that may block for hundreds of
//! milliseconds while the refresh waveform runs. Draw errors are
//! swallowed - a failed paint leaves the old image on the glass, which
//! a bistable panel does anyway.

use core::fmt::Write as _;

use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::mono_font::MonoTextStyleBuilder;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::Text;

use crate::ui::views::{DashboardView, NoteDetailView, NotesListView, SystemInfoView};

/// The opaque panel: a monochrome draw target plus a blocking flush.
pub trait Panel: DrawTarget<Color = BinaryColor> {
    /// Clear the frame buffer (not the glass).
    fn clear_frame(&mut self);
    /// Push the frame to the glass. Blocking, possibly slow.
    fn flush(&mut self);
}

fn text_style() -> embedded_graphics::mono_font::MonoTextStyle<'static, BinaryColor> {
    MonoTextStyleBuilder::new()
        .font(&FONT_6X10)
        .text_color(BinaryColor::On)
        .build()
}

/// Render the Dashboard page.
pub fn draw_dashboard<P: Panel>(panel: &mut P, view: &DashboardView) {
    panel.clear_frame();

    let _ = Text::new(view.clock, Point::new(0, 12), text_style()).draw(panel);

    let mut line: heapless::String<24> = heapless::String::new();
    let _ = write!(line, "Battery {}%", view.battery_percent);
    let _ = Text::new(line.as_str(), Point::new(0, 28), text_style()).draw(panel);

    let mut line: heapless::String<24> = heapless::String::new();
    let _ = write!(line, "Notes {}", view.note_count);
    let _ = Text::new(line.as_str(), Point::new(0, 42), text_style()).draw(panel);

    let radio = if view.radio_enabled { "BLE on" } else { "BLE off" };
    let _ = Text::new(radio, Point::new(0, 56), text_style()).draw(panel);

    panel.flush();
}

/// Render the notes list with the current selection marker.
pub fn draw_notes_list<P: Panel>(panel: &mut P, view: &NotesListView) {
    panel.clear_frame();

    let _ = Text::new("Notes", Point::new(0, 12), text_style()).draw(panel);

    if view.notes.is_empty() {
        let _ = Text::new("(empty)", Point::new(0, 28), text_style()).draw(panel);
    }

    for (row, note) in view.notes.iter().take(4).enumerate() {
        let marker = if row == view.selected { ">" } else { " " };
        let mut line: heapless::String<24> = heapless::String::new();
        let _ = line.push_str(marker);
        let _ = line.push_str(" ");
        // One display row per note; the full text lives on the detail page.
        for c in note.chars().take(20) {
            let _ = line.push(c);
        }
        let y = 28 + (row as i32 * 12);
        let _ = Text::new(line.as_str(), Point::new(0, y), text_style()).draw(panel);
    }

    panel.flush();
}

/// Render a single note. An empty body (selection past the end of the
/// store) draws as a blank page, not an error.
pub fn draw_note<P: Panel>(panel: &mut P, view: &NoteDetailView) {
    panel.clear_frame();

    let mut title: heapless::String<16> = heapless::String::new();
    let _ = write!(title, "Note {}", view.index + 1);
    let _ = Text::new(title.as_str(), Point::new(0, 12), text_style()).draw(panel);

    // Naive wrap at 20 columns; word-aware wrapping is a panel-size
    // concern the storage layer stays out of.
    let mut y = 28;
    let mut line: heapless::String<24> = heapless::String::new();
    for c in view.text.chars() {
        let _ = line.push(c);
        if line.len() >= 20 {
            let _ = Text::new(line.as_str(), Point::new(0, y), text_style()).draw(panel);
            line.clear();
            y += 12;
        }
    }
    if !line.is_empty() {
        let _ = Text::new(line.as_str(), Point::new(0, y), text_style()).draw(panel);
    }

    panel.flush();
}

/// Render the System page.
pub fn draw_system<P: Panel>(panel: &mut P, view: &SystemInfoView) {
    panel.clear_frame();

    let _ = Text::new("System", Point::new(0, 12), text_style()).draw(panel);

    let mut line: heapless::String<24> = heapless::String::new();
    let millivolts = (view.battery_volts * 1000.0) as u32;
    let _ = write!(line, "Batt {}mV", millivolts);
    let _ = Text::new(line.as_str(), Point::new(0, 28), text_style()).draw(panel);

    let mut line: heapless::String<24> = heapless::String::new();
    let _ = write!(line, "Notes {}/{}", view.note_count, view.note_capacity);
    let _ = Text::new(line.as_str(), Point::new(0, 42), text_style()).draw(panel);

    let mut line: heapless::String<24> = heapless::String::new();
    let _ = write!(line, "Up {}s", view.uptime_secs);
    let _ = Text::new(line.as_str(), Point::new(0, 56), text_style()).draw(panel);

    panel.flush();
}
