//! Rasterization of LST maps and forecast charts.
//!
//! Rendering is done by hand into RGBA buffers: a gradient color ramp for
//! the yearly map, line/marker drawing for the forecast chart, and a PNG
//! encoder built on `flate2` + `crc32fast` (indexed when the image has few
//! colors, RGBA otherwise).

pub mod canvas;
pub mod chart;
pub mod error;
pub mod glyphs;
pub mod gradient;
pub mod map;
pub mod png;
pub mod style;

pub use canvas::Canvas;
pub use error::{RenderError, RenderResult};
pub use gradient::{Color, Gradient};
pub use style::{ColorStop, StyleDefinition};

/// A finished RGBA image.
#[derive(Debug, Clone)]
pub struct RenderedImage {
    /// RGBA pixel data, 4 bytes per pixel.
    pub pixels: Vec<u8>,
    pub width: usize,
    pub height: usize,
}

impl RenderedImage {
    /// Encode as PNG bytes.
    pub fn to_png(&self) -> RenderResult<Vec<u8>> {
        png::create_png_auto(&self.pixels, self.width, self.height)
    }
}
