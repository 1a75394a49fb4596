//! Pure input decoding - quadrature steps and button press
//! classification. No hardware types so the whole module runs on the
//! host; the GPIO plumbing lives in `ui/buttons.rs`.

use crate::config::{LONG_PRESS_MS, WAKE_DEBOUNCE_MS};

/// Two-bit quadrature decoder.
///
/// Holds the last sampled (A, B) pair and turns each new sample into a
/// signed step. Debounce is implicit: a sample identical to the last
/// one is no movement, regardless of how many interrupts fired in
/// between.
pub struct QuadDecoder {
    last_a: bool,
    last_b: bool,
}

impl QuadDecoder {
    /// Start from the given line levels (sample the pins once at init).
    pub const fn new(a: bool, b: bool) -> Self {
        Self { last_a: a, last_b: b }
    }

    /// Feed a new (A, B) sample. Returns +1 or -1 for a valid single
    /// Gray-code transition, 0 for no change or a double transition
    /// (one micro-step lost to noise - accepted, never mis-signed).
    /// The remembered pair is updated regardless.
    ///
    /// Phase convention: `(0,0)->(1,0)->(1,1)->(0,1)->(0,0)` counts up.
    pub fn step(&mut self, a: bool, b: bool) -> i32 {
        let delta = if a == self.last_a && b == self.last_b {
            0
        } else if a != self.last_a && b != self.last_b {
            // Both lines flipped between samples: direction unknowable.
            0
        } else if self.last_b ^ a {
            1
        } else {
            -1
        };
        self.last_a = a;
        self.last_b = b;
        delta
    }
}

/// Outcome of one full press/release cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PressKind {
    Short,
    Long,
}

/// Classify a completed press by how long it was held.
pub fn classify_press(held_ms: u64) -> PressKind {
    if held_ms >= LONG_PRESS_MS {
        PressKind::Long
    } else {
        PressKind::Short
    }
}

/// Level-triggered two-state button debouncer.
///
/// Sampled once per control-loop tick. Emits exactly one classified
/// event per press/release cycle, at the release edge.
pub struct PressTracker {
    down: bool,
    pressed_at_ms: u64,
}

impl PressTracker {
    pub const fn new() -> Self {
        Self {
            down: false,
            pressed_at_ms: 0,
        }
    }

    /// Feed the current (active = pressed) level. Returns a classified
    /// press on the release edge, `None` otherwise.
    pub fn sample(&mut self, active: bool, now_ms: u64) -> Option<PressKind> {
        if active && !self.down {
            self.down = true;
            self.pressed_at_ms = now_ms;
            None
        } else if !active && self.down {
            self.down = false;
            Some(classify_press(now_ms.saturating_sub(self.pressed_at_ms)))
        } else {
            None
        }
    }

    /// Whether the button is currently held.
    pub fn is_down(&self) -> bool {
        self.down
    }
}

impl Default for PressTracker {
    fn default() -> Self {
        Self::new()
    }
}

/// Coarse press-edge detector, separate from [`PressTracker`].
///
/// Reports the press edge itself (not the release) so the activity
/// clock can be re-armed the instant the user touches the button -
/// this is what keeps a freshly woken device from dozing off again
/// while the wake press is still held. Rate-limited to one edge per
/// debounce window.
pub struct WakeEdge {
    last_level: bool,
    last_edge_ms: u64,
}

impl WakeEdge {
    pub const fn new() -> Self {
        Self {
            last_level: false,
            last_edge_ms: 0,
        }
    }

    /// Feed the current level; `true` on a debounced press edge.
    pub fn sample(&mut self, active: bool, now_ms: u64) -> bool {
        let edge = active
            && !self.last_level
            && now_ms.saturating_sub(self.last_edge_ms) >= WAKE_DEBOUNCE_MS;
        if edge {
            self.last_edge_ms = now_ms;
        }
        self.last_level = active;
        edge
    }
}

impl Default for WakeEdge {
    fn default() -> Self {
        Self::new()
    }
}
