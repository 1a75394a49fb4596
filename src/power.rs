//! Power / lifecycle manager.
//!
//! Tracks the activity clock and the BLE channel's enabled window and
//! turns them into lifecycle events:
//!
//! - radio auto-disable after a fixed enabled duration, unconditional,
//! - deep sleep after a fixed idle duration, only while the radio is
//!   disabled.
//!
//! Time is passed in explicitly (`now_ms` from the loop's monotonic
//! clock) so every transition is testable on the host. The actual
//! System OFF entry and the SoftDevice teardown live in the embedded
//! binary; this manager only decides.

use crate::config::{BLE_TIMEOUT_MS, SLEEP_IDLE_MS};
use crate::power_logic;

/// Lifecycle decisions surfaced by [`LifecycleManager::tick`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LifecycleEvent {
    /// The radio's enable window expired; force-disable it.
    RadioTimeout,
    /// Idle long enough with the radio off; final render then System OFF.
    EnterSleep,
}

/// Lifecycle state machine, one instance owned by the control loop.
pub struct LifecycleManager {
    last_activity_ms: u64,
    radio_enabled: bool,
    radio_enabled_at_ms: u64,
}

impl LifecycleManager {
    /// Create at boot time; boot counts as activity.
    pub const fn new(now_ms: u64) -> Self {
        Self {
            last_activity_ms: now_ms,
            radio_enabled: false,
            radio_enabled_at_ms: 0,
        }
    }

    /// Record activity (encoder step, button edge, processed command).
    /// Re-arms the sleep timeout; never moves backwards.
    pub fn activity(&mut self, now_ms: u64) {
        if now_ms > self.last_activity_ms {
            self.last_activity_ms = now_ms;
        }
    }

    /// Whether the BLE channel is currently enabled.
    pub fn radio_enabled(&self) -> bool {
        self.radio_enabled
    }

    /// Enable the radio. Idempotent: returns `true` only on the
    /// disabled -> enabled transition, when the caller must bring up
    /// advertising and re-render the dashboard. Counts as activity.
    pub fn enable_radio(&mut self, now_ms: u64) -> bool {
        if self.radio_enabled {
            return false;
        }
        self.radio_enabled = true;
        self.radio_enabled_at_ms = now_ms;
        self.activity(now_ms);
        true
    }

    /// Disable the radio. Idempotent: returns `true` only on the
    /// enabled -> disabled transition, when the caller must tear the
    /// channel down and re-render the dashboard.
    pub fn disable_radio(&mut self) -> bool {
        if !self.radio_enabled {
            return false;
        }
        self.radio_enabled = false;
        true
    }

    /// Toggle, for the long-press path. Returns the new enabled state.
    pub fn toggle_radio(&mut self, now_ms: u64) -> bool {
        if self.radio_enabled {
            self.disable_radio();
        } else {
            self.enable_radio(now_ms);
        }
        self.radio_enabled
    }

    /// Idle duration as of `now_ms`.
    pub fn idle_ms(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.last_activity_ms)
    }

    /// Evaluate the timeouts. Called once per loop iteration, last in
    /// the iteration order, so the sleep decision never races a
    /// long-press toggle registered in the same pass.
    ///
    /// The radio timeout is checked first and reported on its own
    /// iteration; the sleep check then sees the radio already disabled
    /// on the next pass.
    pub fn tick(&mut self, now_ms: u64) -> Option<LifecycleEvent> {
        if power_logic::radio_timed_out(
            self.radio_enabled,
            now_ms.saturating_sub(self.radio_enabled_at_ms),
            BLE_TIMEOUT_MS,
        ) {
            self.radio_enabled = false;
            return Some(LifecycleEvent::RadioTimeout);
        }

        if power_logic::should_sleep(self.radio_enabled, self.idle_ms(now_ms), SLEEP_IDLE_MS) {
            return Some(LifecycleEvent::EnterSleep);
        }

        None
    }
}
