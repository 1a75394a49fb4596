//! Pure power-policy decisions, separated from the lifecycle manager
//! so the timeout boundaries are trivially testable.

use crate::config::{BATTERY_EMPTY_VOLTS, BATTERY_FULL_VOLTS};

/// Decide whether to enter deep sleep. Sleep is gated on the radio:
/// while the BLE channel is enabled the device must stay reachable, so
/// idle time is irrelevant. The threshold is inclusive - exactly
/// `threshold_ms` of idle triggers sleep, one ms under does not.
pub fn should_sleep(radio_enabled: bool, idle_ms: u64, threshold_ms: u64) -> bool {
    !radio_enabled && idle_ms >= threshold_ms
}

/// Decide whether the radio's unconditional enable-timeout has fired.
/// Independent of activity: a chatty peer does not keep the radio
/// alive past its budget.
pub fn radio_timed_out(radio_enabled: bool, enabled_for_ms: u64, timeout_ms: u64) -> bool {
    radio_enabled && enabled_for_ms >= timeout_ms
}

/// Linear battery-voltage-to-percent map, clamped to 0..=100.
pub fn battery_percent(volts: f32) -> u8 {
    let span = BATTERY_FULL_VOLTS - BATTERY_EMPTY_VOLTS;
    let frac = (volts - BATTERY_EMPTY_VOLTS) / span;
    (frac.clamp(0.0, 1.0) * 100.0) as u8
}
