//! Rotary encoder GPIO plumbing.
//!
//! The encoder lines are watched by a dedicated task on GPIOTE edges
//! (the interrupt context); the control loop does the actual decoding.
//! Exactly one piece of state crosses that boundary uncontrolled:
//!
//! - [`ENCODER_MOVED`], a set-by-interrupt / cleared-by-loop flag,
//! - [`ENCODER_LINES`], the (A, B) levels sampled at the edge.
//!
//! No locks. An edge landing between the loop's flag-clear and its
//! line load costs at most one micro-transition, which the Gray decode
//! in `input_logic` already treats as noise; only the net delta since
//! the last observation matters.
//!
//! The push button is *not* handled here - it is level-sampled every
//! loop tick in `main.rs` and it doubles as the deep-sleep wake pin.

use core::sync::atomic::{AtomicBool, AtomicU8, Ordering};

use defmt::trace;
use embassy_futures::select::select;
use embassy_nrf::gpio::{AnyPin, Input, Pull};

use crate::input_logic::QuadDecoder;

/// Set by the encoder task on any edge, cleared by the control loop.
pub static ENCODER_MOVED: AtomicBool = AtomicBool::new(false);

/// Latest sampled line levels: bit 0 = A, bit 1 = B.
pub static ENCODER_LINES: AtomicU8 = AtomicU8::new(0);

fn pack(a: bool, b: bool) -> u8 {
    (a as u8) | ((b as u8) << 1)
}

fn unpack(bits: u8) -> (bool, bool) {
    (bits & 0x01 != 0, bits & 0x02 != 0)
}

/// Encoder edge watcher. Owns both line pins for the life of the
/// program; samples and publishes on every edge of either line.
#[embassy_executor::task]
pub async fn encoder_task(pin_a: AnyPin, pin_b: AnyPin) {
    let mut a = Input::new(pin_a, Pull::Up);
    let mut b = Input::new(pin_b, Pull::Up);

    // Publish the resting levels before the first edge so the loop's
    // decoder starts from the real phase.
    ENCODER_LINES.store(pack(a.is_high(), b.is_high()), Ordering::Relaxed);

    loop {
        select(a.wait_for_any_edge(), b.wait_for_any_edge()).await;
        ENCODER_LINES.store(pack(a.is_high(), b.is_high()), Ordering::Relaxed);
        ENCODER_MOVED.store(true, Ordering::Relaxed);
        trace!("encoder edge");
    }
}

/// Loop-side decode step: if movement was flagged, clear the flag,
/// load the latest line levels, and fold them through the decoder.
/// Returns the signed step (usually ±1, 0 for bounce/noise).
pub fn drain_encoder(quad: &mut QuadDecoder) -> i32 {
    if !ENCODER_MOVED.swap(false, Ordering::Relaxed) {
        return 0;
    }
    let (a, b) = unpack(ENCODER_LINES.load(Ordering::Relaxed));
    quad.step(a, b)
}

/// Resting levels published by the encoder task at startup, for
/// seeding the decoder.
pub fn initial_lines() -> (bool, bool) {
    unpack(ENCODER_LINES.load(Ordering::Relaxed))
}
