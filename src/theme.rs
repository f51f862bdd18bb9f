//! Static styling tables: card themes and language swatch colors.

use serde::Serialize;

/// Whether a theme uses light or dark text treatment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Dark,
    Light,
}

/// A selectable card background.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Theme {
    pub id: &'static str,
    pub name: &'static str,
    /// CSS `background` value for the card.
    pub gradient: &'static str,
    pub mode: ThemeMode,
}

impl Theme {
    pub fn is_light(&self) -> bool {
        self.mode == ThemeMode::Light
    }
}

pub const DEFAULT_THEME_ID: &str = "midnight";

pub const THEMES: &[Theme] = &[
    Theme {
        id: "midnight",
        name: "Midnight",
        gradient: "linear-gradient(135deg, #0d1117 0%, #161b22 50%, #1f2937 100%)",
        mode: ThemeMode::Dark,
    },
    Theme {
        id: "aurora",
        name: "Aurora",
        gradient: "linear-gradient(135deg, #0f2027 0%, #203a43 50%, #2c5364 100%)",
        mode: ThemeMode::Dark,
    },
    Theme {
        id: "nebula",
        name: "Nebula",
        gradient: "linear-gradient(135deg, #41295a 0%, #2f0743 100%)",
        mode: ThemeMode::Dark,
    },
    Theme {
        id: "sunset",
        name: "Sunset",
        gradient: "linear-gradient(135deg, #ff512f 0%, #dd2476 100%)",
        mode: ThemeMode::Dark,
    },
    Theme {
        id: "ocean",
        name: "Ocean",
        gradient: "linear-gradient(135deg, #2193b0 0%, #6dd5ed 100%)",
        mode: ThemeMode::Dark,
    },
    Theme {
        id: "forest",
        name: "Forest",
        gradient: "linear-gradient(135deg, #134e5e 0%, #71b280 100%)",
        mode: ThemeMode::Dark,
    },
    Theme {
        id: "paper",
        name: "Paper",
        gradient: "linear-gradient(135deg, #ffffff 0%, #f3f4f6 100%)",
        mode: ThemeMode::Light,
    },
    Theme {
        id: "peach",
        name: "Peach",
        gradient: "linear-gradient(135deg, #ffecd2 0%, #fcb69f 100%)",
        mode: ThemeMode::Light,
    },
];

/// Look up a theme by id.
pub fn find_theme(id: &str) -> Option<&'static Theme> {
    THEMES.iter().find(|t| t.id == id)
}

pub fn default_theme() -> &'static Theme {
    &THEMES[0]
}

/// Ids of all built-in themes, in table order.
pub fn theme_ids() -> Vec<&'static str> {
    THEMES.iter().map(|t| t.id).collect()
}

/// Swatch color for languages without an entry in the table.
pub const NEUTRAL_LANGUAGE_COLOR: &str = "#8b949e";

const LANGUAGE_COLORS: &[(&str, &str)] = &[
    ("JavaScript", "#f1e05a"),
    ("TypeScript", "#3178c6"),
    ("Python", "#3572A5"),
    ("Java", "#b07219"),
    ("HTML", "#e34c26"),
    ("CSS", "#563d7c"),
    ("C++", "#f34b7d"),
    ("Rust", "#dea584"),
    ("Go", "#00ADD8"),
    ("PHP", "#4F5D95"),
    ("Ruby", "#701516"),
    ("Swift", "#F05138"),
    ("Kotlin", "#A97BFF"),
    ("Vue", "#41b883"),
    ("React", "#61dafb"),
];

/// Swatch color for a GitHub language name (exact, case-sensitive match).
pub fn language_color(language: &str) -> &'static str {
    LANGUAGE_COLORS
        .iter()
        .find(|(name, _)| *name == language)
        .map(|(_, color)| *color)
        .unwrap_or(NEUTRAL_LANGUAGE_COLOR)
}
