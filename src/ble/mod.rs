//! Bluetooth Low Energy subsystem.
//!
//! This module drives the Nordic SoftDevice S140 in **Peripheral**
//! role as a write-only command channel:
//!
//! 1. **Advertising** - connectable advertising while the channel is
//!    enabled (long-press toggle), stopped when disabled.
//! 2. **GATT server** - a single service with one write/write-without-
//!    response characteristic; whatever bytes a peer writes are the
//!    command text. There is no response path.
//!
//! Inbound writes are queued to the control loop via an Embassy
//! channel; enable/disable requests travel the other way on a signal.
//! The SoftDevice itself stays up across channel disable - only
//! advertising and connections are torn down, which is what the power
//! budget actually cares about.

pub mod gatt;

use crate::config::{COMMAND_MAX_LEN, COMMAND_QUEUE_DEPTH};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;
use heapless::Vec;

/// One inbound command as raw bytes (UTF-8 expected, degraded if not).
pub type CommandBytes = Vec<u8, COMMAND_MAX_LEN>;

/// Inbound command queue: GATT task -> control loop.
pub static COMMAND_QUEUE: Channel<CriticalSectionRawMutex, CommandBytes, COMMAND_QUEUE_DEPTH> =
    Channel::new();

/// Control requests: control loop -> BLE task.
#[derive(Clone, Copy, PartialEq, Eq, defmt::Format)]
pub enum RadioControl {
    /// Start advertising / accepting a connection.
    Enable,
    /// Drop any connection and stop advertising.
    Disable,
}

/// Latest radio control request (newer requests overwrite older ones;
/// only the final state matters).
pub static RADIO_CONTROL: Signal<CriticalSectionRawMutex, RadioControl> = Signal::new();
