//! Ambient-light and battery sampling via SAADC.
//!
//! Both readings are polled from the control loop; a conversion that
//! is not ready leaves the last-known value in place (stale beats
//! absent for a dashboard). Calibration is rough on purpose - the
//! light reading only has to clear one threshold and the battery
//! readout is a percentage bar.

use defmt::trace;
use embassy_nrf::saadc::Saadc;

use crate::power_logic::battery_percent;

/// SAADC reference: 0.6 V internal, gain 1/6, 12-bit => 3.6 V full scale.
const ADC_FULL_SCALE_VOLTS: f32 = 3.6;
const ADC_MAX: f32 = 4095.0;

/// Divider ratio on the battery sense input.
const BATTERY_DIVIDER: f32 = 2.0;

/// Rough lux-per-volt slope of the phototransistor divider.
const LUX_PER_VOLT: f32 = 250.0;

/// Two-channel sampler: channel 0 = light, channel 1 = battery.
pub struct Sensors<'d> {
    adc: Saadc<'d, 2>,
    last_lux: f32,
    last_battery_volts: f32,
}

impl<'d> Sensors<'d> {
    pub fn new(adc: Saadc<'d, 2>) -> Self {
        Self {
            adc,
            last_lux: 0.0,
            // Start mid-range rather than 0% until the first sample.
            last_battery_volts: 3.7,
        }
    }

    /// Run one conversion and refresh both readings.
    pub async fn sample(&mut self) {
        let mut buf = [0i16; 2];
        self.adc.sample(&mut buf).await;

        let light_volts = raw_to_volts(buf[0]);
        self.last_lux = light_volts * LUX_PER_VOLT;
        self.last_battery_volts = raw_to_volts(buf[1]) * BATTERY_DIVIDER;

        trace!(
            "sensors: lux={} batt={}",
            self.last_lux,
            self.last_battery_volts
        );
    }

    /// Last-known ambient light estimate (lux, >= 0).
    pub fn lux(&self) -> f32 {
        self.last_lux
    }

    /// Last-known battery voltage (volts).
    pub fn battery_volts(&self) -> f32 {
        self.last_battery_volts
    }

    /// Last-known battery charge as a percentage.
    pub fn battery_percent(&self) -> u8 {
        battery_percent(self.last_battery_volts)
    }
}

fn raw_to_volts(raw: i16) -> f32 {
    let clamped = raw.max(0) as f32;
    clamped / ADC_MAX * ADC_FULL_SCALE_VOLTS
}
