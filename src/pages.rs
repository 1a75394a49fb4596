//! Page state machine.
//!
//! Owns the current page and note selection, and maps input events to
//! actions. Every transition goes through [`PageMachine::apply`], so
//! the whole UI flow is testable without hardware; the returned
//! [`Action`] tells the control loop what to render or toggle.

/// UI pages, cyclic for encoder navigation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Page {
    Dashboard,
    NotesList,
    NoteView,
    System,
}

/// Number of pages in the cycle.
const PAGE_CYCLE: i32 = 4;

impl Page {
    fn index(self) -> i32 {
        match self {
            Page::Dashboard => 0,
            Page::NotesList => 1,
            Page::NoteView => 2,
            Page::System => 3,
        }
    }

    fn from_index(i: i32) -> Self {
        match i.rem_euclid(PAGE_CYCLE) {
            0 => Page::Dashboard,
            1 => Page::NotesList,
            2 => Page::NoteView,
            _ => Page::System,
        }
    }

    /// Cyclic advance by a signed number of steps.
    pub fn advanced(self, steps: i32) -> Self {
        Self::from_index(self.index() + steps)
    }
}

/// Input events (after decoding/debouncing).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UiEvent {
    /// Net encoder movement since last observation (signed steps).
    Nav(i32),
    ShortPress,
    LongPress,
}

/// What the control loop should do after a transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Action {
    /// Repaint the given page.
    Render(Page),
    /// Flip the manual lamp override (dashboard/system short press).
    ToggleLamp,
    /// Toggle the BLE channel on/off (long press, any page). The
    /// radio toggle path re-renders the dashboard itself.
    ToggleRadio,
}

/// The page/selection state machine.
pub struct PageMachine {
    page: Page,
    selected_note: usize,
}

impl PageMachine {
    pub const fn new() -> Self {
        Self {
            page: Page::Dashboard,
            selected_note: 0,
        }
    }

    /// Current page.
    pub fn page(&self) -> Page {
        self.page
    }

    /// Currently selected note index. Deliberately unclamped against
    /// the live note count: a selection past the end views an empty
    /// note (the store read degrades), it does not error.
    pub fn selected_note(&self) -> usize {
        self.selected_note
    }

    /// Set the note selection. No clamping, see [`selected_note`].
    ///
    /// [`selected_note`]: Self::selected_note
    pub fn set_selected_note(&mut self, index: usize) {
        self.selected_note = index;
    }

    /// Apply one input event and return the resulting action, if any.
    pub fn apply(&mut self, event: UiEvent) -> Option<Action> {
        match event {
            UiEvent::Nav(0) => None,
            UiEvent::Nav(steps) => {
                self.page = self.page.advanced(steps);
                Some(Action::Render(self.page))
            }
            UiEvent::ShortPress => match self.page {
                Page::NotesList => {
                    self.page = Page::NoteView;
                    Some(Action::Render(self.page))
                }
                Page::NoteView => {
                    self.page = Page::NotesList;
                    Some(Action::Render(self.page))
                }
                Page::Dashboard | Page::System => Some(Action::ToggleLamp),
            },
            UiEvent::LongPress => Some(Action::ToggleRadio),
        }
    }

    /// Whether the periodic time/battery refresh applies to the
    /// current page (dashboard and system show live readouts).
    pub fn wants_periodic_render(&self) -> bool {
        matches!(self.page, Page::Dashboard | Page::System)
    }
}

impl Default for PageMachine {
    fn default() -> Self {
        Self::new()
    }
}
