//! Headless Chrome rasterizer.
//!
//! Writes the document to a temporary file, opens it in a browser window of
//! exactly the logical card size, and captures the card's clip rectangle with
//! the requested device scale. The browser is launched per capture; exports
//! are rare and serialized, and a fresh profile means no cached icons.

use super::raster::{RasterError, RasterRequest, Rasterizer};
use headless_chrome::protocol::cdp::Page;
use headless_chrome::{Browser, LaunchOptions};
use image::{ImageFormat, RgbaImage};
use std::fmt::Display;
use std::io::Write as _;

/// [`Rasterizer`] backed by a local Chrome/Chromium install.
#[derive(Debug, Clone)]
pub struct ChromeRasterizer {
    sandbox: bool,
}

impl Default for ChromeRasterizer {
    fn default() -> Self {
        Self::new(true)
    }
}

impl ChromeRasterizer {
    /// `sandbox = false` is needed when running as root (containers, CI).
    pub fn new(sandbox: bool) -> Self {
        Self { sandbox }
    }
}

fn browser_err(e: impl Display) -> RasterError {
    RasterError::Browser(e.to_string())
}

impl Rasterizer for ChromeRasterizer {
    fn rasterize(&self, request: &RasterRequest<'_>) -> Result<RgbaImage, RasterError> {
        let mut page = tempfile::Builder::new()
            .prefix("gitsnap-")
            .suffix(".html")
            .tempfile()?;
        page.write_all(request.html.as_bytes())?;
        page.flush()?;

        let browser = Browser::new(LaunchOptions {
            headless: true,
            sandbox: self.sandbox,
            window_size: Some((request.width, request.height)),
            ..Default::default()
        })
        .map_err(browser_err)?;
        let tab = browser.new_tab().map_err(browser_err)?;

        let url = format!("file://{}", page.path().display());
        tracing::debug!(%url, "loading capture document");
        tab.navigate_to(&url)
            .map_err(browser_err)?
            .wait_until_navigated()
            .map_err(browser_err)?;
        tab.wait_for_element(request.selector).map_err(browser_err)?;

        let clip = Page::Viewport {
            x: 0.0,
            y: 0.0,
            width: f64::from(request.width),
            height: f64::from(request.height),
            scale: f64::from(request.pixel_ratio),
        };
        let png = tab
            .capture_screenshot(
                Page::CaptureScreenshotFormatOption::Png,
                None,
                Some(clip),
                true,
            )
            .map_err(browser_err)?;

        Ok(image::load_from_memory_with_format(&png, ImageFormat::Png)?.to_rgba8())
    }
}
