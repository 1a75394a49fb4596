//! Ambient-light lamp controller.
//!
//! Maps the lux reading to a lamp intensity on a ~1 Hz cadence, with a
//! manual override from the button. The override and the automatic
//! path write the same actuator with no arbitration - whichever runs
//! last wins, and the next automatic cycle overwrites a manual level.
//! That race is documented device behavior, kept on purpose.

use crate::config::{LAMP_OFF_LEVEL, LAMP_ON_LEVEL, LIGHT_POLL_MS, LUX_DARK_THRESHOLD};

/// Intensity for a given ambient reading: dark room -> lamp on.
pub fn lamp_level_for_lux(lux: f32) -> u8 {
    if lux < LUX_DARK_THRESHOLD {
        LAMP_ON_LEVEL
    } else {
        LAMP_OFF_LEVEL
    }
}

/// Cadence-gated automatic controller plus the manual toggle.
pub struct LightController {
    last_poll_ms: Option<u64>,
    manual_on: bool,
}

impl LightController {
    pub const fn new() -> Self {
        Self {
            last_poll_ms: None,
            manual_on: false,
        }
    }

    /// Whether the next automatic cycle is due, without committing to
    /// it. Lets the loop skip the ADC conversion entirely inside the
    /// cadence window.
    pub fn poll_due(&self, now_ms: u64) -> bool {
        match self.last_poll_ms {
            Some(last) => now_ms.saturating_sub(last) >= LIGHT_POLL_MS,
            None => true,
        }
    }

    /// Automatic cycle. Returns the level to drive when a new sample
    /// is due, `None` while inside the cadence window (the sensor is
    /// not oversampled). The very first call always samples.
    pub fn poll(&mut self, now_ms: u64, lux: f32) -> Option<u8> {
        if let Some(last) = self.last_poll_ms {
            if now_ms.saturating_sub(last) < LIGHT_POLL_MS {
                return None;
            }
        }
        self.last_poll_ms = Some(now_ms);
        Some(lamp_level_for_lux(lux))
    }

    /// Manual override: flip and return the forced level. Holds only
    /// until the next automatic cycle writes over it.
    pub fn manual_toggle(&mut self) -> u8 {
        self.manual_on = !self.manual_on;
        if self.manual_on {
            LAMP_ON_LEVEL
        } else {
            LAMP_OFF_LEVEL
        }
    }
}

impl Default for LightController {
    fn default() -> Self {
        Self::new()
    }
}
