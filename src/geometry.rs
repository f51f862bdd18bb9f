//! Responsive geometry for the card preview.
//!
//! The card is always laid out at its preset's logical pixel size. On screen
//! it is shrunk with a CSS `scale()` so it fits the viewport, and negative
//! margins pull in the layout space the unscaled box would otherwise still
//! occupy (trailing whitespace below, horizontal scroll overflow at the
//! sides). Export ignores all of this and always rasterizes the logical size.
//!
//! ```text
//! available_width  = viewport_width - padding(viewport_width)
//! available_height = viewport_height * fraction(viewport_width)
//! scale            = min(available_width / width, available_height / height, 1)
//! vertical_offset  = height * (1 - scale)
//! horizontal_offset = width * (1 - scale) / 2   (0 when scale == 1)
//! ```
//!
//! Every function here is pure.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Viewports narrower than this use the narrow padding.
pub const NARROW_BREAKPOINT: u32 = 480;
/// Viewports narrower than this (but not narrow) use the medium padding and
/// the reduced height fraction.
pub const MEDIUM_BREAKPOINT: u32 = 768;

const NARROW_PADDING: u32 = 32;
const MEDIUM_PADDING: u32 = 64;
const WIDE_PADDING: u32 = 128;

/// Share of the viewport height given to the card below the medium breakpoint,
/// leaving room for the controls.
const COMPACT_HEIGHT_FRACTION: f64 = 0.4;
const WIDE_HEIGHT_FRACTION: f64 = 0.6;

/// Aspect-ratio preset for the card canvas.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    /// 1200×675, 16:9
    #[default]
    Horizontal,
    /// 1000×1000
    Square,
    /// 1080×1920, story format
    Vertical,
    /// 1200×630, Open Graph link preview
    #[serde(rename = "og")]
    #[value(name = "og")]
    OpenGraph,
}

impl Preset {
    pub const ALL: [Preset; 4] = [
        Preset::Horizontal,
        Preset::Square,
        Preset::Vertical,
        Preset::OpenGraph,
    ];

    /// Fixed logical canvas size. This is also the export size before the
    /// pixel ratio is applied.
    pub fn logical_size(self) -> LogicalSize {
        let (width, height) = match self {
            Preset::Horizontal => (1200, 675),
            Preset::Square => (1000, 1000),
            Preset::Vertical => (1080, 1920),
            Preset::OpenGraph => (1200, 630),
        };
        LogicalSize { width, height }
    }

    /// CSS class selecting the card's internal layout.
    pub fn layout_class(self) -> &'static str {
        match self {
            Preset::Horizontal | Preset::OpenGraph => "layout-wide",
            Preset::Square => "layout-square",
            Preset::Vertical => "layout-story",
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            Preset::Horizontal => "horizontal",
            Preset::Square => "square",
            Preset::Vertical => "vertical",
            Preset::OpenGraph => "og",
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LogicalSize {
    pub width: u32,
    pub height: u32,
}

/// On-screen viewport size in CSS pixels, parsed from `WIDTHxHEIGHT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 800,
        }
    }
}

impl FromStr for Viewport {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (w, h) = s
            .split_once(['x', 'X'])
            .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{s}'"))?;
        let width = w
            .trim()
            .parse()
            .map_err(|_| format!("invalid viewport width '{w}'"))?;
        let height = h
            .trim()
            .parse()
            .map_err(|_| format!("invalid viewport height '{h}'"))?;
        Ok(Self { width, height })
    }
}

impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Derived on-screen layout for one (preset, viewport) pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeometryResult {
    pub preset: Preset,
    /// Logical canvas size; unaffected by `scale`.
    pub width: u32,
    pub height: u32,
    /// On-screen shrink factor, `0 <= scale <= 1`. Zero only for an unknown
    /// (zero-sized) viewport.
    pub scale: f64,
    /// Bottom margin collapsed by the scale, in CSS pixels.
    pub vertical_offset: f64,
    /// Margin pulled in on each side, in CSS pixels.
    pub horizontal_offset: f64,
    pub layout_class: &'static str,
}

impl GeometryResult {
    /// Inline style for the capture area wrapping the card.
    pub fn to_css(&self) -> String {
        format!(
            "width: {}px; height: {}px; transform: scale({}); transform-origin: top center; \
             margin-bottom: -{}px; margin-left: -{}px; margin-right: -{}px;",
            self.width,
            self.height,
            self.scale,
            self.vertical_offset,
            self.horizontal_offset,
            self.horizontal_offset,
        )
    }
}

/// Horizontal padding reserved around the card at a given viewport width.
pub fn container_padding(viewport_width: u32) -> u32 {
    if viewport_width < NARROW_BREAKPOINT {
        NARROW_PADDING
    } else if viewport_width < MEDIUM_BREAKPOINT {
        MEDIUM_PADDING
    } else {
        WIDE_PADDING
    }
}

/// Space available to the card on screen, in CSS pixels.
///
/// When the viewport is no wider than its padding, the padding is dropped
/// rather than producing a zero or negative width.
pub fn available_space(viewport_width: u32, viewport_height: u32) -> (f64, f64) {
    let padding = container_padding(viewport_width);
    let width = if viewport_width > padding {
        viewport_width - padding
    } else {
        viewport_width
    };
    let fraction = if viewport_width < MEDIUM_BREAKPOINT {
        COMPACT_HEIGHT_FRACTION
    } else {
        WIDE_HEIGHT_FRACTION
    };
    (f64::from(width), f64::from(viewport_height) * fraction)
}

/// Compute display scale and compensating offsets for the card.
pub fn compute_geometry(preset: Preset, viewport_width: u32, viewport_height: u32) -> GeometryResult {
    let LogicalSize { width, height } = preset.logical_size();
    let (w, h) = (f64::from(width), f64::from(height));

    let scale = if viewport_width == 0 || viewport_height == 0 {
        0.0
    } else {
        let (available_width, available_height) = available_space(viewport_width, viewport_height);
        (available_width / w).min(available_height / h).min(1.0)
    };

    let vertical_offset = h * (1.0 - scale);
    let horizontal_offset = if scale < 1.0 {
        w * (1.0 - scale) / 2.0
    } else {
        0.0
    };

    GeometryResult {
        preset,
        width,
        height,
        scale,
        vertical_offset,
        horizontal_offset,
        layout_class: preset.layout_class(),
    }
}
