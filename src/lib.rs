//! # GitSnap
//!
//! Turns a GitHub repository URL into a styled social card: a browser-style
//! frame holding the repository's top-level files, its name, language and
//! popularity counts, and the rendered README, on a themed gradient. The card
//! can be previewed at any screen size and exported as a high-resolution
//! PNG or JPEG.
//!
//! # Architecture: Fetch, Build, Render
//!
//! ```text
//! 1. Aggregate  owner/repo         →  RepositorySnapshot  (three concurrent API calls)
//! 2. Build      snapshot + display →  CardModel           (formatting, overrides)
//! 3. Render     CardModel          →  HTML                (maud + embedded CSS)
//!    ├─ preview: scaled by the geometry engine for a viewport
//!    └─ export:  logical size × pixel ratio, rasterized, encoded
//! ```
//!
//! Snapshots are immutable; everything the user can change (theme, preset,
//! panel toggles, stat overrides) lives in [`card::CardDisplayState`], owned
//! by a [`session::Session`] and kept across repositories.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`github`] | `RepoSource` trait and the reqwest-based GitHub REST client |
//! | [`aggregate`] | Concurrent fetch, failure policy, entry normalization, README decoding |
//! | [`card`] | Display state, stat overrides, and the render-ready `CardModel` |
//! | [`geometry`] | Presets and responsive scale/offset computation for the preview |
//! | [`render`] | Maud templates for the capture document and preview page |
//! | [`markdown`] | README markdown → sanitized HTML |
//! | [`export`] | `Rasterizer` trait, headless Chrome implementation, PNG/JPEG encoding |
//! | [`session`] | URL parsing and the single owned session state |
//! | [`config`] | `gitsnap.toml` loading, validation, and merging |
//! | [`theme`] | Background themes and language colors |
//! | [`icons`] | File-type icon resolution |
//! | [`format`] | Compact count formatting (`1.5k`, `2.0m`) |
//! | [`types`] | Snapshot data types |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Export Ignores the Preview Scale
//!
//! On screen the card is shrunk with a CSS transform to fit the viewport. The
//! export path never sees that transform: it renders a separate capture
//! document at the preset's logical size and asks the rasterizer for a fixed
//! pixel ratio, so a 1200×675 card is always 3600×2025 pixels.
//!
//! ## Optional Sources Never Fail a Card
//!
//! Only repository metadata is required. A failed contents listing yields an
//! empty explorer and a failed README yields a short explanatory document, so
//! a card can always be produced once the repository itself is reachable.

pub mod aggregate;
pub mod card;
pub mod config;
pub mod export;
pub mod format;
pub mod geometry;
pub mod github;
pub mod icons;
pub mod markdown;
pub mod output;
pub mod render;
pub mod session;
pub mod theme;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
