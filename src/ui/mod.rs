//! User interface subsystem - bistable panel + rotary input.
//!
//! The control loop owns a page state machine (`crate::pages`) and
//! hands fully-populated view descriptors to the renderer for each
//! repaint. The panel driver itself is out of scope: `display` paints
//! into any monochrome `DrawTarget` and flushes through a trait, so
//! whichever e-ink controller the board carries stays opaque.
//!
//! ## Components
//!
//! - **views**: plain page-descriptor structs (host-testable)
//! - **display**: embedded-graphics paint routines for each page
//! - **buttons**: encoder GPIOTE plumbing + button level sampling

pub mod buttons;
pub mod display;
pub mod views;
