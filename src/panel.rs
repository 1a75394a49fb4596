//! Framebuffer-backed panel.
//!
//! The paint routines in `ui::display` target the [`Panel`] trait;
//! this is the concrete implementation for the board: a 1-bit
//! framebuffer sized to the glass, with the controller hand-off
//! happening in `flush`. The e-ink controller's waveform sequencing
//! is the display driver's problem, not the control core's - `flush`
//! is the single seam where that driver plugs in.

use embedded_graphics::framebuffer::{buffer_size, Framebuffer};
use embedded_graphics::pixelcolor::raw::{LittleEndian, RawU1};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;

use crate::ui::display::Panel;

/// Panel resolution in pixels.
pub const PANEL_WIDTH: usize = 200;
pub const PANEL_HEIGHT: usize = 200;

type Frame = Framebuffer<
    BinaryColor,
    RawU1,
    LittleEndian,
    PANEL_WIDTH,
    PANEL_HEIGHT,
    { buffer_size::<BinaryColor>(PANEL_WIDTH, PANEL_HEIGHT) },
>;

/// The board's bistable panel.
pub struct EinkPanel {
    frame: Frame,
}

impl EinkPanel {
    pub fn new() -> Self {
        Self {
            frame: Frame::new(),
        }
    }
}

impl Dimensions for EinkPanel {
    fn bounding_box(&self) -> embedded_graphics::primitives::Rectangle {
        self.frame.bounding_box()
    }
}

impl DrawTarget for EinkPanel {
    type Color = BinaryColor;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        self.frame.draw_iter(pixels)
    }
}

impl Panel for EinkPanel {
    fn clear_frame(&mut self) {
        let _ = self.frame.clear(BinaryColor::Off);
    }

    fn flush(&mut self) {
        // SPI hand-off to the panel controller goes here. The full
        // refresh takes hundreds of ms on bistable glass; the control
        // loop already treats every render as blocking.
        defmt::debug!("panel: full refresh, {} bytes", self.frame.data().len());
    }
}
