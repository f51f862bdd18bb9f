//! Rasterization seam.
//!
//! A [`Rasterizer`] turns a self-contained HTML document into pixels. The
//! production implementation is
//! [`ChromeRasterizer`](super::chrome::ChromeRasterizer); tests use a fake
//! that paints a solid image, so export logic runs without a browser.

use image::RgbaImage;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RasterError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("browser error: {0}")]
    Browser(String),
    #[error("could not decode capture: {0}")]
    Decode(#[from] image::ImageError),
    #[error("capture is {actual:?}, expected {expected:?}")]
    UnexpectedSize {
        expected: (u32, u32),
        actual: (u32, u32),
    },
}

/// What to capture.
#[derive(Debug, Clone, Copy)]
pub struct RasterRequest<'a> {
    /// Complete HTML document containing the element.
    pub html: &'a str,
    /// CSS selector of the element to capture, positioned at the page origin.
    pub selector: &'a str,
    /// Logical width in CSS pixels.
    pub width: u32,
    /// Logical height in CSS pixels.
    pub height: u32,
    /// Device pixels per CSS pixel.
    pub pixel_ratio: u32,
}

impl RasterRequest<'_> {
    /// Pixel dimensions of the expected capture.
    pub fn output_size(&self) -> (u32, u32) {
        (self.width * self.pixel_ratio, self.height * self.pixel_ratio)
    }
}

/// Renders an HTML element to an RGBA image of [`RasterRequest::output_size`].
pub trait Rasterizer {
    fn rasterize(&self, request: &RasterRequest<'_>) -> Result<RgbaImage, RasterError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_size_applies_pixel_ratio() {
        let request = RasterRequest {
            html: "",
            selector: "#github-card",
            width: 1200,
            height: 630,
            pixel_ratio: 3,
        };
        assert_eq!(request.output_size(), (3600, 1890));
    }
}
