//! Wall clock derived from the monotonic uptime plus a settable epoch
//! base. The `TIME:` command anchors it; until then it reads from
//! epoch 0, which renders as 00:00 and is fine - the device has no
//! battery-backed RTC.

use heapless::String;

/// Epoch base + uptime wall clock.
pub struct WallClock {
    /// Epoch seconds corresponding to uptime zero.
    epoch_at_boot_secs: u64,
}

impl WallClock {
    pub const fn new() -> Self {
        Self {
            epoch_at_boot_secs: 0,
        }
    }

    /// Anchor the clock: "it is `epoch_secs` now (at `now_ms` uptime)".
    pub fn set(&mut self, now_ms: u64, epoch_secs: u64) {
        self.epoch_at_boot_secs = epoch_secs.saturating_sub(now_ms / 1000);
    }

    /// Current epoch seconds.
    pub fn epoch_secs(&self, now_ms: u64) -> u64 {
        self.epoch_at_boot_secs + now_ms / 1000
    }

    /// Render as `HH:MM` (UTC, day wrapped).
    pub fn hhmm(&self, now_ms: u64) -> String<5> {
        let secs = self.epoch_secs(now_ms);
        let minutes_of_day = (secs / 60) % (24 * 60);
        let (h, m) = (minutes_of_day / 60, minutes_of_day % 60);

        let mut out = String::new();
        let _ = out.push(digit(h / 10));
        let _ = out.push(digit(h % 10));
        let _ = out.push(':');
        let _ = out.push(digit(m / 10));
        let _ = out.push(digit(m % 10));
        out
    }
}

impl Default for WallClock {
    fn default() -> Self {
        Self::new()
    }
}

fn digit(d: u64) -> char {
    (b'0' + (d % 10) as u8) as char
}
