//! The single owned state behind one card-editing session.
//!
//! A [`Session`] holds the display state (theme, preset, panel toggles, stat
//! overrides), the current snapshot, and the exporter's busy flag. Generating
//! a new card replaces the snapshot wholesale on success and leaves it alone
//! on failure, so a bad URL never blanks a card that is already showing.

use crate::aggregate::{AggregateError, aggregate};
use crate::card::{CardDisplayState, CardModel, Stat, StatOverrides, build_card};
use crate::export::{ExportError, ExportFormat, ExportSettings, Exporter, Rasterizer};
use crate::github::RepoSource;
use crate::icons::IconTheme;
use crate::types::RepositorySnapshot;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Please enter a GitHub repository URL.")]
    EmptyInput,
    #[error("Invalid GitHub URL '{0}'. Expected github.com/<owner>/<repo>.")]
    InvalidUrl(String),
    #[error(transparent)]
    Aggregate(#[from] AggregateError),
    #[error("Export failed: {0}. Please try again.")]
    Export(#[from] ExportError),
    #[error("No card has been generated yet.")]
    NoCard,
}

/// `owner/repo` extracted from a repository URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    pub owner: String,
    pub name: String,
}

/// Extract owner and repository name from anything containing
/// `github.com/<owner>/<repo>`.
///
/// Scheme, `www.`, extra path segments, query and fragment are ignored. A
/// trailing `.git` is stripped from the repository name.
pub fn parse_repo_url(input: &str) -> Result<RepoRef, SessionError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(SessionError::EmptyInput);
    }
    let invalid = || SessionError::InvalidUrl(input.to_string());

    let (_, path) = input.split_once("github.com/").ok_or_else(invalid)?;
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let mut segments = path.split('/').filter(|s| !s.is_empty());

    let owner = segments.next().ok_or_else(invalid)?;
    let repo = segments.next().ok_or_else(invalid)?;
    let repo = repo.strip_suffix(".git").unwrap_or(repo);
    if repo.is_empty() {
        return Err(invalid());
    }

    Ok(RepoRef {
        owner: owner.to_string(),
        name: repo.to_string(),
    })
}

pub struct Session<S> {
    source: S,
    icons: IconTheme,
    display: CardDisplayState,
    snapshot: Option<RepositorySnapshot>,
    exporter: Exporter,
}

impl<S: RepoSource> Session<S> {
    pub fn new(source: S, icons: IconTheme, display: CardDisplayState) -> Self {
        Self {
            source,
            icons,
            display,
            snapshot: None,
            exporter: Exporter::new(),
        }
    }

    /// Fetch `url` and make it the current snapshot.
    ///
    /// On success the stat overrides are cleared so the fetched values show.
    /// On any error the previous snapshot and overrides are kept.
    pub async fn generate(&mut self, url: &str) -> Result<&RepositorySnapshot, SessionError> {
        let repo = parse_repo_url(url)?;
        tracing::debug!(owner = %repo.owner, repo = %repo.name, "generating card");

        let snapshot = aggregate(&self.source, &self.icons, &repo.owner, &repo.name).await?;
        self.display.overrides = StatOverrides::default();
        Ok(self.snapshot.insert(snapshot))
    }

    pub fn snapshot(&self) -> Option<&RepositorySnapshot> {
        self.snapshot.as_ref()
    }

    pub fn display(&self) -> &CardDisplayState {
        &self.display
    }

    /// Styling persists across `generate` calls; only overrides are reset.
    pub fn display_mut(&mut self) -> &mut CardDisplayState {
        &mut self.display
    }

    pub fn set_stat(&mut self, stat: Stat, value: u64) {
        self.display.overrides.set(stat, value);
    }

    /// Render model for the current snapshot, if any.
    pub fn card(&self) -> Option<CardModel> {
        self.snapshot
            .as_ref()
            .map(|snapshot| build_card(snapshot, &self.display))
    }

    pub fn is_exporting(&self) -> bool {
        self.exporter.is_busy()
    }

    /// Export the current card into `dir`.
    ///
    /// Returns `Ok(None)` when an export is already in progress.
    pub fn export(
        &self,
        rasterizer: &impl Rasterizer,
        format: ExportFormat,
        settings: &ExportSettings,
        dir: &Path,
    ) -> Result<Option<PathBuf>, SessionError> {
        let card = self.card().ok_or(SessionError::NoCard)?;
        Ok(self
            .exporter
            .export_to_dir(rasterizer, &card, format, settings, dir)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Preset;
    use crate::test_helpers::{FakeRasterizer, MockSource, Outcome};
    use crate::theme::find_theme;
    use pretty_assertions::assert_eq;

    fn session() -> Session<MockSource> {
        Session::new(
            MockSource::healthy(),
            IconTheme::default(),
            CardDisplayState::default(),
        )
    }

    fn repo(owner: &str, name: &str) -> RepoRef {
        RepoRef {
            owner: owner.into(),
            name: name.into(),
        }
    }

    // =========================================================================
    // URL parsing
    // =========================================================================

    #[test]
    fn parses_plain_https_url() {
        assert_eq!(
            parse_repo_url("https://github.com/octocat/Hello-World").unwrap(),
            repo("octocat", "Hello-World")
        );
    }

    #[test]
    fn strips_git_suffix_and_extra_segments() {
        assert_eq!(
            parse_repo_url("git@github.com/rust-lang/rust.git").unwrap(),
            repo("rust-lang", "rust")
        );
        assert_eq!(
            parse_repo_url("github.com/o/r/tree/main/src?tab=readme#top").unwrap(),
            repo("o", "r")
        );
    }

    #[test]
    fn tolerates_surrounding_whitespace_and_trailing_slash() {
        assert_eq!(
            parse_repo_url("  https://www.github.com/o/r/  ").unwrap(),
            repo("o", "r")
        );
    }

    #[test]
    fn rejects_non_github_and_incomplete_urls() {
        for input in [
            "https://gitlab.com/o/r",
            "https://github.com/octocat",
            "https://github.com/",
            "https://github.com/o/.git",
        ] {
            assert!(
                matches!(parse_repo_url(input), Err(SessionError::InvalidUrl(_))),
                "{input}"
            );
        }
    }

    #[test]
    fn empty_input_is_its_own_error() {
        assert!(matches!(parse_repo_url("   "), Err(SessionError::EmptyInput)));
    }

    // =========================================================================
    // Generate
    // =========================================================================

    #[tokio::test]
    async fn generate_sets_snapshot() {
        let mut session = session();
        assert!(session.card().is_none());

        let snapshot = session
            .generate("https://github.com/octocat/Hello-World")
            .await
            .unwrap();
        assert_eq!(snapshot.owner, "octocat");
        assert_eq!(snapshot.stars, 1500);

        let card = session.card().unwrap();
        assert_eq!(card.stars, "1.5k");
    }

    #[tokio::test]
    async fn invalid_url_makes_no_requests() {
        let mut session = session();
        let err = session.generate("not a url").await.unwrap_err();
        assert!(matches!(err, SessionError::InvalidUrl(_)));
        assert!(session.source.calls().is_empty());
    }

    #[tokio::test]
    async fn failed_generate_keeps_previous_card() {
        let mut session = session();
        session.generate("github.com/octocat/Hello-World").await.unwrap();
        session.set_stat(Stat::Stars, 42);

        session.source.metadata = Outcome::NotFound;
        let err = session.generate("github.com/octocat/missing").await.unwrap_err();
        assert!(matches!(
            err,
            SessionError::Aggregate(AggregateError::RepositoryNotFound)
        ));

        let snapshot = session.snapshot().unwrap();
        assert_eq!(snapshot.name, "Hello-World");
        assert_eq!(session.card().unwrap().stars, "42");
    }

    #[tokio::test]
    async fn styling_persists_across_generates_and_overrides_reset() {
        let mut session = session();
        session.generate("github.com/octocat/Hello-World").await.unwrap();

        let display = session.display_mut();
        display.theme = find_theme("paper").unwrap();
        display.preset = Preset::Square;
        display.show_readme = false;
        session.set_stat(Stat::Forks, 999);
        assert_eq!(session.card().unwrap().forks, "999");

        session.generate("github.com/rust-lang/rust").await.unwrap();
        let card = session.card().unwrap();
        assert_eq!(card.name, "rust");
        assert_eq!(card.theme.id, "paper");
        assert_eq!(card.preset, Preset::Square);
        assert!(!card.show_readme);
        assert_eq!(card.forks, "20");
        assert!(session.display().overrides.is_empty());
    }

    // =========================================================================
    // Export
    // =========================================================================

    #[test]
    fn export_without_card_is_an_error() {
        let session = session();
        let dir = tempfile::tempdir().unwrap();
        let err = session
            .export(
                &FakeRasterizer::default(),
                ExportFormat::Png,
                &ExportSettings::default(),
                dir.path(),
            )
            .unwrap_err();
        assert!(matches!(err, SessionError::NoCard));
    }

    #[tokio::test]
    async fn export_uses_current_preset() {
        let mut session = session();
        session.generate("github.com/octocat/Hello-World").await.unwrap();
        session.display_mut().preset = Preset::Vertical;

        let rasterizer = FakeRasterizer::default();
        let dir = tempfile::tempdir().unwrap();
        let path = session
            .export(&rasterizer, ExportFormat::Jpeg, &ExportSettings::default(), dir.path())
            .unwrap()
            .unwrap();

        assert!(path.to_string_lossy().ends_with(".jpeg"));
        assert_eq!(*rasterizer.requests.lock().unwrap(), vec![(1080, 1920, 3)]);
        assert!(!session.is_exporting());
    }

    #[tokio::test]
    async fn export_failure_carries_retry_message() {
        let mut session = session();
        session.generate("github.com/octocat/Hello-World").await.unwrap();
        let dir = tempfile::tempdir().unwrap();

        let err = session
            .export(
                &FakeRasterizer::failing("tainted canvas"),
                ExportFormat::Png,
                &ExportSettings::default(),
                dir.path(),
            )
            .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("tainted canvas"), "{message}");
        assert!(message.contains("try again"), "{message}");
        assert!(!session.is_exporting());
    }
}
