//! Configuration module.
//!
//! Handles loading, validating, and merging `gitsnap.toml`. Stock defaults are
//! serialized to a TOML table, the user file is merged on top, and the result
//! is deserialized and validated. Command-line flags are applied afterwards by
//! the binary and win over both.
//!
//! ## Config File Location
//!
//! `gitsnap.toml` in the working directory, or any file passed with
//! `--config`. A missing default file is not an error; a missing `--config`
//! file is.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [github]
//! api_base = "https://api.github.com"
//! # token = "ghp_..."          # Falls back to $GITHUB_TOKEN
//! user_agent = "gitsnap"
//! timeout_secs = 15
//!
//! [card]
//! preset = "horizontal"        # horizontal | square | vertical | og
//! theme = "midnight"
//! show_explorer = true
//! show_readme = true
//!
//! [export]
//! format = "png"               # png | jpeg
//! pixel_ratio = 3
//! jpeg_quality = 98
//! output_dir = "."
//! chrome_sandbox = true
//!
//! [icons]
//! base_url = "https://raw.githubusercontent.com/PKief/vscode-material-icon-theme/master/icons"
//!
//! [viewport]
//! width = 1280
//! height = 800
//! ```
//!
//! Config files are sparse: override just the values you want. Unknown keys
//! are rejected to catch typos early.

use crate::card::{CardDisplayState, StatOverrides};
use crate::export::{DEFAULT_JPEG_QUALITY, DEFAULT_PIXEL_RATIO, ExportFormat, ExportSettings};
use crate::geometry::{Preset, Viewport};
use crate::icons::{DEFAULT_ICON_BASE_URL, IconTheme};
use crate::theme::{DEFAULT_THEME_ID, find_theme, theme_ids};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "gitsnap.toml";

/// Environment variable that supplies `github.token` when the file has none.
pub const TOKEN_ENV_VAR: &str = "GITHUB_TOKEN";

const MAX_PIXEL_RATIO: u32 = 8;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Application configuration loaded from `gitsnap.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// GitHub API access.
    pub github: GithubConfig,
    /// Initial card styling.
    pub card: CardConfig,
    /// Raster export settings.
    pub export: ExportConfig,
    /// Explorer icon source.
    pub icons: IconsConfig,
    /// Viewport assumed by `preview` and `layout` when none is given.
    pub viewport: Viewport,
}

impl AppConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.github.api_base.trim().is_empty() {
            return Err(ConfigError::Validation(
                "github.api_base must not be empty".into(),
            ));
        }
        if self.github.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "github.timeout_secs must be greater than 0".into(),
            ));
        }
        if find_theme(&self.card.theme).is_none() {
            return Err(ConfigError::Validation(format!(
                "card.theme '{}' is unknown (expected one of: {})",
                self.card.theme,
                theme_ids().join(", ")
            )));
        }
        if !(1..=MAX_PIXEL_RATIO).contains(&self.export.pixel_ratio) {
            return Err(ConfigError::Validation(format!(
                "export.pixel_ratio must be 1-{MAX_PIXEL_RATIO}"
            )));
        }
        if !(1..=100).contains(&self.export.jpeg_quality) {
            return Err(ConfigError::Validation(
                "export.jpeg_quality must be 1-100".into(),
            ));
        }
        if self.icons.base_url.trim().is_empty() {
            return Err(ConfigError::Validation(
                "icons.base_url must not be empty".into(),
            ));
        }
        Ok(())
    }

    /// Fill `github.token` from the environment when the file left it unset.
    pub fn apply_env_token(&mut self, env_token: Option<String>) {
        let unset = self.github.token.as_deref().is_none_or(str::is_empty);
        if unset {
            self.github.token = env_token.filter(|t| !t.is_empty());
        }
    }
}

/// `[github]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GithubConfig {
    /// REST API root, without trailing slash.
    pub api_base: String,
    /// Personal access token sent as `Authorization: token <t>`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    pub user_agent: String,
    /// Per-request timeout.
    pub timeout_secs: u64,
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.github.com".to_string(),
            token: None,
            user_agent: "gitsnap".to_string(),
            timeout_secs: 15,
        }
    }
}

/// `[card]` section: the display state a session starts with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CardConfig {
    pub preset: Preset,
    pub theme: String,
    pub show_explorer: bool,
    pub show_readme: bool,
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            preset: Preset::default(),
            theme: DEFAULT_THEME_ID.to_string(),
            show_explorer: true,
            show_readme: true,
        }
    }
}

impl CardConfig {
    pub fn display_state(&self) -> Result<CardDisplayState, ConfigError> {
        let theme = find_theme(&self.theme).ok_or_else(|| {
            ConfigError::Validation(format!("unknown theme '{}'", self.theme))
        })?;
        Ok(CardDisplayState {
            theme,
            preset: self.preset,
            show_explorer: self.show_explorer,
            show_readme: self.show_readme,
            overrides: StatOverrides::default(),
        })
    }
}

/// `[export]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportConfig {
    pub format: ExportFormat,
    /// Device pixels per CSS pixel in the exported image.
    pub pixel_ratio: u32,
    /// JPEG quality (1-100). Ignored for PNG.
    pub jpeg_quality: u8,
    /// Directory exported files are written to.
    pub output_dir: PathBuf,
    /// Run Chrome with its sandbox. Disable when running as root.
    pub chrome_sandbox: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            format: ExportFormat::default(),
            pixel_ratio: DEFAULT_PIXEL_RATIO,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            output_dir: PathBuf::from("."),
            chrome_sandbox: true,
        }
    }
}

impl ExportConfig {
    pub fn settings(&self) -> ExportSettings {
        ExportSettings {
            pixel_ratio: self.pixel_ratio,
            jpeg_quality: self.jpeg_quality,
        }
    }
}

/// `[icons]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IconsConfig {
    /// Directory URL holding `<icon>.svg` files.
    pub base_url: String,
}

impl Default for IconsConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_ICON_BASE_URL.to_string(),
        }
    }
}

impl IconsConfig {
    pub fn theme(&self) -> IconTheme {
        IconTheme::new(self.base_url.as_str())
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer user overrides are merged onto.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    Ok(toml::Value::try_from(AppConfig::default())?)
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Read a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<AppConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: AppConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load `gitsnap.toml` from `dir`, falling back to stock defaults when absent.
pub fn load_config(dir: &Path) -> Result<AppConfig, ConfigError> {
    resolve_config(
        stock_defaults_value()?,
        load_raw_config(&dir.join(CONFIG_FILE_NAME))?,
    )
}

/// Load an explicitly named config file, which must exist.
pub fn load_config_file(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let overlay: toml::Value = toml::from_str(&content)?;
    resolve_config(stock_defaults_value()?, Some(overlay))
}

/// Returns a fully-commented stock `gitsnap.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# GitSnap Configuration
# =====================
#
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Command-line flags override them.
#
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# GitHub API
# ---------------------------------------------------------------------------
[github]
# REST API root. Change for GitHub Enterprise.
api_base = "https://api.github.com"

# Personal access token. Raises the rate limit from 60 to 5000 requests/hour.
# When unset, $GITHUB_TOKEN is used if present.
# token = "ghp_..."

# User-Agent header (GitHub rejects requests without one).
user_agent = "gitsnap"

# Per-request timeout in seconds.
timeout_secs = 15

# ---------------------------------------------------------------------------
# Card styling
# ---------------------------------------------------------------------------
[card]
# Aspect preset: "horizontal" (1200x675), "square" (1000x1000),
# "vertical" (1080x1920), "og" (1200x630).
preset = "horizontal"

# Background theme. Run `gitsnap themes` for the list.
theme = "midnight"

# Show the file explorer sidebar.
show_explorer = true

# Show the rendered README.
show_readme = true

# ---------------------------------------------------------------------------
# Export
# ---------------------------------------------------------------------------
[export]
# "png" (lossless, keeps transparency) or "jpeg" (lossy, no alpha).
format = "png"

# Device pixels per CSS pixel. 3 turns a 1200x675 card into 3600x2025.
pixel_ratio = 3

# JPEG quality (1-100). Ignored for PNG.
jpeg_quality = 98

# Where exported GitSnap-<timestamp>.<ext> files are written.
output_dir = "."

# Run headless Chrome with its sandbox. Set to false when running as root
# (containers, CI).
chrome_sandbox = true

# ---------------------------------------------------------------------------
# Explorer icons
# ---------------------------------------------------------------------------
[icons]
# Directory URL holding <icon>.svg files.
base_url = "https://raw.githubusercontent.com/PKief/vscode-material-icon-theme/master/icons"

# ---------------------------------------------------------------------------
# Preview viewport
# ---------------------------------------------------------------------------
# Screen size assumed by `preview` and `layout` when --viewport is omitted.
[viewport]
width = 1280
height = 800
"##
}
