//! CLI output formatting.
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format functions
//! are pure: no I/O, no side effects.
//!
//! # Output Format
//!
//! ## Card
//!
//! ```text
//! octocat / Hello-World
//!     Language: Ruby
//!     Stats: 1.5k stars, 20 forks, 1.5k watchers
//!     Explorer (4 entries)
//!         001 lib/
//!         002 Gemfile
//!         003 hello.rb
//!         004 README
//!     Theme: Midnight (midnight), horizontal 1200x675
//! Exported ./GitSnap-1700000000000.png
//! ```
//!
//! ## Themes
//!
//! ```text
//! midnight   Midnight (dark, default)
//! paper      Paper (light)
//! ```

use crate::card::CardModel;
use crate::geometry::{GeometryResult, Viewport};
use crate::theme::{DEFAULT_THEME_ID, THEMES, ThemeMode};
use std::path::Path;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

// ============================================================================
// Card
// ============================================================================

pub fn format_card(card: &CardModel) -> Vec<String> {
    let mut lines = vec![format!("{} / {}", card.owner, card.name)];
    lines.push(format!("{}Language: {}", indent(1), card.language));
    lines.push(format!(
        "{}Stats: {} stars, {} forks, {} watchers",
        indent(1),
        card.stars,
        card.forks,
        card.watchers
    ));

    if card.show_explorer {
        lines.push(format!("{}Explorer ({} entries)", indent(1), card.entries.len()));
        for (i, entry) in card.entries.iter().enumerate() {
            let suffix = if entry.kind.is_dir() { "/" } else { "" };
            lines.push(format!(
                "{}{} {}{}",
                indent(2),
                format_index(i + 1),
                entry.name,
                suffix
            ));
        }
    } else {
        lines.push(format!("{}Explorer: hidden", indent(1)));
    }
    if !card.show_readme {
        lines.push(format!("{}README: hidden", indent(1)));
    }

    let size = card.preset.logical_size();
    lines.push(format!(
        "{}Theme: {} ({}), {} {}x{}",
        indent(1),
        card.theme.name,
        card.theme.id,
        card.preset,
        size.width,
        size.height
    ));
    lines
}

pub fn print_card(card: &CardModel) {
    for line in format_card(card) {
        println!("{}", line);
    }
}

// ============================================================================
// Export / preview
// ============================================================================

pub fn format_export(path: Option<&Path>) -> Vec<String> {
    match path {
        Some(path) => vec![format!("Exported {}", path.display())],
        None => vec!["Export already in progress, skipped".to_string()],
    }
}

pub fn print_export(path: Option<&Path>) {
    for line in format_export(path) {
        println!("{}", line);
    }
}

pub fn format_preview(path: &Path, viewport: Viewport, geometry: &GeometryResult) -> Vec<String> {
    vec![
        format!("Preview → {}", path.display()),
        format!(
            "{}Viewport {}: scale {:.3}",
            indent(1),
            viewport,
            geometry.scale
        ),
    ]
}

pub fn print_preview(path: &Path, viewport: Viewport, geometry: &GeometryResult) {
    for line in format_preview(path, viewport, geometry) {
        println!("{}", line);
    }
}

// ============================================================================
// Themes
// ============================================================================

pub fn format_themes() -> Vec<String> {
    let width = THEMES.iter().map(|t| t.id.len()).max().unwrap_or(0);
    THEMES
        .iter()
        .map(|theme| {
            let mode = match theme.mode {
                ThemeMode::Dark => "dark",
                ThemeMode::Light => "light",
            };
            let default = if theme.id == DEFAULT_THEME_ID {
                ", default"
            } else {
                ""
            };
            format!("{:<width$}  {} ({mode}{default})", theme.id, theme.name)
        })
        .collect()
}

pub fn print_themes() {
    for line in format_themes() {
        println!("{}", line);
    }
}
