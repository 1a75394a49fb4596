//! Page descriptors handed to the renderer.
//!
//! One struct per page, borrowing everything, so building a view never
//! allocates or copies note text. The renderer is synchronous and may
//! take hundreds of milliseconds on a bistable panel; callers must not
//! assume otherwise.

/// Dashboard: clock, battery, radio status.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DashboardView<'a> {
    pub clock: &'a str,
    pub battery_percent: u8,
    pub radio_enabled: bool,
    pub note_count: usize,
}

/// Notes list with the current selection marker.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NotesListView<'a> {
    /// Valid notes only (`count` entries, oldest first).
    pub notes: &'a [&'a str],
    /// May point past the end of `notes`; the renderer just draws no
    /// marker then.
    pub selected: usize,
}

/// Single note, full text.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NoteDetailView<'a> {
    pub index: usize,
    /// Empty when the selection is past the end of the store.
    pub text: &'a str,
}

/// System page: raw battery voltage, store usage, uptime.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SystemInfoView {
    pub battery_volts: f32,
    pub note_count: usize,
    pub note_capacity: usize,
    pub uptime_secs: u64,
}
