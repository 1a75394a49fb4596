//! Unified error type for inknote.
//!
//! The control core itself has no fatal path: malformed commands,
//! out-of-range indices, and stale sensors all degrade in place
//! (an unattended device must not halt over a wrong note). This type
//! covers the embedded I/O surfaces only and is logged via `defmt`,
//! never propagated into the control loop. All variants carry only
//! fixed-size data - no `alloc`.

/// Top-level error type used across the embedded surfaces.
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    // BLE
    /// The SoftDevice returned a BLE-level error.
    Ble(BleError),

    /// No BLE adapter / SoftDevice could be initialised.
    BleNotAvailable,

    // Storage
    /// Flash read/write/erase failed.
    Storage,

    // Renderer
    /// Bus transaction to the panel failed.
    Display,

    // Sensors
    /// ADC conversion did not complete; last-known value stays in use.
    SensorNotReady,

    // Generic
    /// Buffer too small for the requested operation.
    BufferOverflow,
}

/// Subset of BLE errors we propagate (keeps the enum `Copy`-friendly).
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BleError {
    /// GAP / GATT raw error code from the SoftDevice.
    Raw(u32),
    /// Advertising could not start.
    AdvertiseFailed,
    /// GATT server setup failed.
    ServerFailed,
}

// Convenience conversions

impl From<BleError> for Error {
    fn from(e: BleError) -> Self {
        Error::Ble(e)
    }
}
