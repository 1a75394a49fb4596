//! Test-only library interface for inknote.
//!
//! This module re-exports the pure logic modules that can be tested
//! on the host (no embedded hardware required): the note store, the
//! input decoders, the command grammar, the page state machine, the
//! light policy, and the power lifecycle.
//!
//! Usage: `cargo test`
//!
//! Note: The embedded binary uses main.rs with #![no_std] and #![no_main].
//! This lib.rs provides a separate entry point for host-based testing.

#![cfg_attr(not(test), no_std)]

pub mod clock;
pub mod command;
pub mod config;
pub mod error;
pub mod input_logic;
pub mod light;
pub mod notes;
pub mod pages;
pub mod power;
pub mod power_logic;

// Generic over `NorFlash`, so it runs on the host against the
// in-memory flash in the tests below; the embedded build compiles its
// own copy via main.rs.
#[cfg(test)]
pub mod storage;

pub mod ui {
    pub mod views;
}

pub use command::Command;
pub use input_logic::PressKind;
pub use notes::NoteStore;
pub use pages::{Action, Page, PageMachine, UiEvent};
pub use power::{LifecycleEvent, LifecycleManager};

// ═══════════════════════════════════════════════════════════════════════════
// Unit Tests
// ═══════════════════════════════════════════════════════════════════════════
