//! Bounded persistent note store.
//!
//! Fixed-capacity array of text slots plus a separate validity count.
//! Slot index is the note's identity: 0-based, contiguous, insertion
//! ordered (index 0 = oldest remaining). Slots at or above `count` are
//! absent regardless of stale content - the count governs validity,
//! which is what lets `remove` and `clear_all` leave old text behind
//! in flash without a scrub pass.
//!
//! Every operation is infallible by design: reads out of range yield
//! empty text, removes out of range are no-ops, and appending at
//! capacity overwrites the last slot (the newest note always lands).

use crate::config::{MAX_NOTES, NOTE_MAX_LEN};
use heapless::String;

/// One stored note. Over-long text is truncated at a char boundary.
pub type NoteText = String<NOTE_MAX_LEN>;

/// In-memory note store, synced with flash by the storage layer.
pub struct NoteStore {
    slots: [NoteText; MAX_NOTES],
    count: usize,
}

impl NoteStore {
    /// Create an empty store.
    pub const fn new() -> Self {
        const EMPTY: NoteText = String::new();
        Self {
            slots: [EMPTY; MAX_NOTES],
            count: 0,
        }
    }

    /// Current note count, `0..=MAX_NOTES`.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Read the note at `index`, or `""` if the index is not a valid
    /// note. Never fails.
    pub fn read(&self, index: usize) -> &str {
        if index < self.count {
            self.slots[index].as_str()
        } else {
            ""
        }
    }

    /// Append a note. Below capacity it lands in the next free slot;
    /// at capacity it overwrites the last slot and the count stays at
    /// `MAX_NOTES` - the previous newest note is sacrificed, never the
    /// incoming one.
    pub fn append(&mut self, text: &str) {
        let slot = if self.count < MAX_NOTES {
            let s = self.count;
            self.count += 1;
            s
        } else {
            MAX_NOTES - 1
        };
        self.slots[slot] = truncate(text);
    }

    /// Remove the note at `index`, shifting later notes down one slot.
    /// No-op for an index outside `[0, count)`. The vacated last slot
    /// keeps its prior content; the decremented count invalidates it.
    pub fn remove(&mut self, index: usize) {
        if index >= self.count {
            return;
        }
        self.slots[index..self.count].rotate_left(1);
        self.count -= 1;
    }

    /// Drop all notes. Slot contents may stay stale.
    pub fn clear_all(&mut self) {
        self.count = 0;
    }
}

impl Default for NoteStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Copy `text` into a `NoteText`, stopping at the capacity boundary
/// without splitting a character.
fn truncate(text: &str) -> NoteText {
    let mut s = NoteText::new();
    for c in text.chars() {
        if s.push(c).is_err() {
            break;
        }
    }
    s
}
