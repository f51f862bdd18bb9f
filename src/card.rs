//! Card model building.
//!
//! Combines an immutable [`RepositorySnapshot`] with the user's
//! [`CardDisplayState`] into a [`CardModel`]: every value the card template
//! needs, already formatted. The display state outlives snapshots, so styling
//! choices survive fetching a different repository.

use crate::format::format_count;
use crate::geometry::Preset;
use crate::markdown::render_markdown;
use crate::theme::{Theme, default_theme, language_color};
use crate::types::{ContentEntry, RepositorySnapshot};

/// Which stat an override applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stat {
    Stars,
    Forks,
    Watchers,
}

/// Manually edited stat values. `None` means untouched: the snapshot value
/// is shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatOverrides {
    pub stars: Option<u64>,
    pub forks: Option<u64>,
    pub watchers: Option<u64>,
}

impl StatOverrides {
    pub fn set(&mut self, stat: Stat, value: u64) {
        match stat {
            Stat::Stars => self.stars = Some(value),
            Stat::Forks => self.forks = Some(value),
            Stat::Watchers => self.watchers = Some(value),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// User-editable styling, persistent across generate actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardDisplayState {
    pub theme: &'static Theme,
    pub preset: Preset,
    pub show_explorer: bool,
    pub show_readme: bool,
    pub overrides: StatOverrides,
}

impl Default for CardDisplayState {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            preset: Preset::default(),
            show_explorer: true,
            show_readme: true,
            overrides: StatOverrides::default(),
        }
    }
}

/// Render-ready card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardModel {
    pub owner: String,
    pub name: String,
    pub browser_url: String,
    pub language: String,
    pub language_color: &'static str,
    pub stars: String,
    pub forks: String,
    pub watchers: String,
    pub entries: Vec<ContentEntry>,
    /// Sanitized README HTML.
    pub readme_html: String,
    pub theme: &'static Theme,
    pub preset: Preset,
    pub show_explorer: bool,
    pub show_readme: bool,
}

impl CardModel {
    /// Class list for the card root element.
    pub fn class_list(&self) -> String {
        let mut classes = vec!["github-card", self.preset.layout_class()];
        if self.theme.is_light() {
            classes.push("theme-light");
        }
        if !self.show_readme {
            classes.push("no-readme");
        }
        if !self.show_explorer {
            classes.push("no-explorer");
        }
        classes.join(" ")
    }
}

/// Build the render model for a snapshot under the current display state.
pub fn build_card(snapshot: &RepositorySnapshot, display: &CardDisplayState) -> CardModel {
    let overrides = display.overrides;
    CardModel {
        owner: snapshot.owner.clone(),
        name: snapshot.name.clone(),
        browser_url: snapshot.browser_url(),
        language: snapshot.primary_language.clone(),
        language_color: language_color(&snapshot.primary_language),
        stars: format_count(overrides.stars.unwrap_or(snapshot.stars)),
        forks: format_count(overrides.forks.unwrap_or(snapshot.forks)),
        watchers: format_count(overrides.watchers.unwrap_or(snapshot.watchers)),
        entries: snapshot.entries.clone(),
        readme_html: render_markdown(&snapshot.readme_markdown),
        theme: display.theme,
        preset: display.preset,
        show_explorer: display.show_explorer,
        show_readme: display.show_readme,
    }
}
