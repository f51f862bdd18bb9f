//! Export pipeline: card → pixels → encoded file.
//!
//! The card is rendered to a standalone capture document at its logical
//! preset size (never the on-screen preview scale), rasterized at
//! [`ExportSettings::pixel_ratio`] device pixels per CSS pixel, then encoded:
//!
//! | Format | Encoding                       | Alpha   |
//! |--------|--------------------------------|---------|
//! | PNG    | lossless                       | kept    |
//! | JPEG   | quality [`DEFAULT_JPEG_QUALITY`] | dropped |
//!
//! [`Exporter`] serializes exports: while one is in flight, further requests
//! are ignored rather than queued.

mod chrome;
mod raster;

pub use chrome::ChromeRasterizer;
pub use raster::{RasterError, RasterRequest, Rasterizer};

use crate::card::CardModel;
use crate::render::{CARD_ELEMENT_ID, RenderOptions, capture_document};
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageFormat, RgbaImage};
use serde::{Deserialize, Serialize};
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;

pub const DEFAULT_PIXEL_RATIO: u32 = 3;
pub const DEFAULT_JPEG_QUALITY: u8 = 98;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("rasterization failed: {0}")]
    RasterizationFailure(#[from] RasterError),
    #[error("image encoding failed: {0}")]
    Encode(#[from] image::ImageError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Png,
    #[serde(alias = "jpg")]
    #[value(alias = "jpg")]
    Jpeg,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Jpeg => "jpeg",
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportSettings {
    pub pixel_ratio: u32,
    pub jpeg_quality: u8,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            pixel_ratio: DEFAULT_PIXEL_RATIO,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

/// `GitSnap-<unix millis>.<ext>`
pub fn export_file_name(format: ExportFormat, millis: i64) -> String {
    format!("GitSnap-{millis}.{}", format.extension())
}

/// Rasterize `card` at its logical preset size and encode it.
pub fn export_card(
    rasterizer: &impl Rasterizer,
    card: &CardModel,
    format: ExportFormat,
    settings: &ExportSettings,
) -> Result<Vec<u8>, ExportError> {
    let size = card.preset.logical_size();
    let token = chrono::Utc::now().timestamp_millis().to_string();
    let html = capture_document(card, &RenderOptions::cache_busted(token)).into_string();
    let selector = format!("#{CARD_ELEMENT_ID}");

    let request = RasterRequest {
        html: &html,
        selector: &selector,
        width: size.width,
        height: size.height,
        pixel_ratio: settings.pixel_ratio,
    };
    let image = rasterizer.rasterize(&request)?;

    let expected = request.output_size();
    if image.dimensions() != expected {
        return Err(RasterError::UnexpectedSize {
            expected,
            actual: image.dimensions(),
        }
        .into());
    }

    encode(image, format, settings.jpeg_quality)
}

/// Encode a capture. JPEG drops the alpha channel.
pub fn encode(image: RgbaImage, format: ExportFormat, jpeg_quality: u8) -> Result<Vec<u8>, ExportError> {
    let mut buf = Cursor::new(Vec::new());
    match format {
        ExportFormat::Png => image.write_to(&mut buf, ImageFormat::Png)?,
        ExportFormat::Jpeg => {
            let rgb = DynamicImage::ImageRgba8(image).to_rgb8();
            JpegEncoder::new_with_quality(&mut buf, jpeg_quality).encode_image(&rgb)?;
        }
    }
    Ok(buf.into_inner())
}

/// Clears the busy flag when dropped, including on error paths.
struct BusyGuard<'a>(&'a AtomicBool);

impl<'a> BusyGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Runs at most one export at a time.
#[derive(Debug, Default)]
pub struct Exporter {
    busy: AtomicBool,
}

impl Exporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Export `card` into `dir`. Returns `Ok(None)` without doing anything if
    /// another export is still running.
    pub fn export_to_dir(
        &self,
        rasterizer: &impl Rasterizer,
        card: &CardModel,
        format: ExportFormat,
        settings: &ExportSettings,
        dir: &Path,
    ) -> Result<Option<PathBuf>, ExportError> {
        let Some(_guard) = BusyGuard::acquire(&self.busy) else {
            tracing::debug!("export already in progress, ignoring request");
            return Ok(None);
        };

        let bytes = export_card(rasterizer, card, format, settings)?;
        std::fs::create_dir_all(dir)?;
        let path = dir.join(export_file_name(
            format,
            chrono::Utc::now().timestamp_millis(),
        ));
        std::fs::write(&path, &bytes)?;
        tracing::info!(path = %path.display(), bytes = bytes.len(), "exported card");
        Ok(Some(path))
    }
}
