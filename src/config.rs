//! Application-wide constants and compile-time configuration.
//!
//! All hardware pin assignments, timing parameters, and capacity
//! limits live here so they can be tuned in one place.

// Note store

/// Maximum number of notes the store keeps. Appending past this
/// overwrites the last slot rather than growing or rejecting.
pub const MAX_NOTES: usize = 10;

/// Maximum stored length of one note, in bytes. Longer command bodies
/// are truncated at a character boundary on append.
pub const NOTE_MAX_LEN: usize = 96;

// Input

/// A release after holding at least this long is a long press;
/// anything shorter is a short press. Boundary inclusive on the
/// long side.
pub const LONG_PRESS_MS: u64 = 800;

/// Coarse debounce window for the wake-source edge detect (ms).
pub const WAKE_DEBOUNCE_MS: u64 = 50;

// Control loop

/// Main control loop tick period (ms). The loop polls the button,
/// drains encoder movement, and services timeouts at this cadence.
pub const LOOP_TICK_MS: u64 = 10;

/// Periodic dashboard/system re-render interval (ms) to refresh the
/// clock and battery readout.
pub const PERIODIC_RENDER_MS: u64 = 15_000;

// Ambient light / lamp

/// Minimum interval between ambient-light samples (ms). The sensor is
/// not worth oversampling; the lamp only needs ~1 Hz.
pub const LIGHT_POLL_MS: u64 = 1_000;

/// Below this lux reading the room counts as dark and the lamp goes on.
pub const LUX_DARK_THRESHOLD: f32 = 15.0;

/// Lamp PWM intensity when on (0-255).
pub const LAMP_ON_LEVEL: u8 = 180;

/// Lamp PWM intensity when off. Non-zero would give a faint glow;
/// we want fully dark.
pub const LAMP_OFF_LEVEL: u8 = 0;

// Power / lifecycle

/// Inactivity threshold before entering deep sleep (ms). Only applies
/// while the BLE channel is disabled.
pub const SLEEP_IDLE_MS: u64 = 120_000;

/// How long the BLE channel stays enabled before force-disable (ms),
/// regardless of activity.
pub const BLE_TIMEOUT_MS: u64 = 600_000;

/// Settle delay after the final render before System OFF (ms); lets
/// the bistable panel finish its refresh waveform.
pub const PRE_SLEEP_DELAY_MS: u64 = 500;

// Battery

/// Battery voltage mapped to 0% (volts).
pub const BATTERY_EMPTY_VOLTS: f32 = 3.3;

/// Battery voltage mapped to 100% (volts).
pub const BATTERY_FULL_VOLTS: f32 = 4.2;

// BLE

/// Device name used in the advertising payload.
pub const BLE_DEVICE_NAME: &str = "inknote";

/// Maximum inbound command length we accept from the channel (bytes).
pub const COMMAND_MAX_LEN: usize = 128;

/// Depth of the inbound command queue between the GATT task and the
/// control loop.
pub const COMMAND_QUEUE_DEPTH: usize = 4;

// GPIO pin assignments (nRF52840-DK defaults)
//
// These are logical names; actual `embassy_nrf::peripherals::*` types are
// selected in `main.rs`.  Adjust for your custom PCB.
//
//   Encoder A      → P0.11
//   Encoder B      → P0.12
//   Push button    → P0.24  (also the sole deep-sleep wake source)
//   Lamp PWM       → P0.06
//   Light sense    → AIN0 (P0.02)
//   Battery sense  → AIN1 (P0.03)

// Note storage (flash)

/// Flash page index where note storage starts (4 KB per page on nRF52840).
pub const STORAGE_FLASH_PAGE_START: u32 = 240;

/// Number of flash pages reserved for note storage.
pub const STORAGE_FLASH_PAGE_COUNT: u32 = 4;
