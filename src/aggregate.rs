//! Remote data aggregation.
//!
//! Fetches repository metadata, the top-level contents listing, and the
//! README concurrently and normalizes them into one [`RepositorySnapshot`].
//! All three requests always run to completion before the snapshot is
//! assembled; only the metadata request can fail the call.
//!
//! ## Failure policy
//!
//! | Source | Failure | Result |
//! |---|---|---|
//! | metadata | 404 | [`AggregateError::RepositoryNotFound`] |
//! | metadata | 403 / 429 | [`AggregateError::RateLimited`] with reset time |
//! | metadata | anything else | [`AggregateError::UpstreamError`] |
//! | contents | anything | empty listing |
//! | README | 403 / 429 | [`README_RATE_LIMITED`] |
//! | README | 404 or other error status | [`README_MISSING`] |
//! | README | transport, base64, or UTF-8 error | [`README_UNAVAILABLE`] |

use crate::github::{FetchError, RawEntry, ReadmePayload, RepoSource};
use crate::icons::IconTheme;
use crate::types::{ContentEntry, EntryKind, RepositorySnapshot};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use std::cmp::Ordering;
use thiserror::Error;

/// Explorer panel capacity.
pub const MAX_ENTRIES: usize = 10;

/// Label used when GitHub reports no primary language.
pub const DEFAULT_LANGUAGE: &str = "Markdown";

pub const README_RATE_LIMITED: &str =
    "# Rate Limit Exceeded\nGitHub API rate limit reached. README preview unavailable.";
pub const README_MISSING: &str = "# No README.md\nThis repository does not have a README.";
pub const README_UNAVAILABLE: &str = "# Error\nCould not fetch README content.";

/// Failures of the required metadata source.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AggregateError {
    #[error("Repository not found. Please check the URL and try again.")]
    RepositoryNotFound,
    #[error(
        "GitHub API rate limit exceeded. Try again after {}. Tip: configure a GitHub personal access token for higher limits.",
        reset_time(.retry_after)
    )]
    RateLimited { retry_after: Option<String> },
    #[error("Failed to fetch repository: {0}")]
    UpstreamError(String),
}

fn reset_time(retry_after: &Option<String>) -> &str {
    retry_after.as_deref().unwrap_or("unknown")
}

impl From<FetchError> for AggregateError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::NotFound => Self::RepositoryNotFound,
            FetchError::RateLimited { retry_after } => Self::RateLimited { retry_after },
            FetchError::Status { text, .. } => Self::UpstreamError(text),
            FetchError::Http(e) => Self::UpstreamError(e.to_string()),
            FetchError::Decode(msg) => Self::UpstreamError(msg),
        }
    }
}

/// Fetch and normalize one repository.
///
/// Waits for all three sources to settle. Contents and README failures are
/// absorbed; a metadata failure is returned and no snapshot is produced.
pub async fn aggregate(
    source: &impl RepoSource,
    icons: &IconTheme,
    owner: &str,
    repo: &str,
) -> Result<RepositorySnapshot, AggregateError> {
    let (metadata, contents, readme) = tokio::join!(
        source.metadata(owner, repo),
        source.contents(owner, repo),
        source.readme(owner, repo),
    );

    let metadata = metadata.map_err(|e| {
        tracing::debug!(owner, repo, %e, "metadata fetch failed");
        AggregateError::from(e)
    })?;

    let raw_entries = contents.unwrap_or_else(|e| {
        tracing::warn!(owner, repo, %e, "contents fetch failed, explorer will be empty");
        Vec::new()
    });

    let readme_markdown = readme_or_fallback(readme);

    Ok(RepositorySnapshot {
        owner: owner.to_string(),
        name: repo.to_string(),
        primary_language: metadata
            .language
            .filter(|l| !l.is_empty())
            .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
        stars: metadata.stargazers_count,
        forks: metadata.forks_count,
        watchers: metadata.watchers_count,
        entries: normalize_entries(raw_entries, icons),
        readme_markdown,
    })
}

/// Sort directories before files, alphabetically within each group, keep the
/// first [`MAX_ENTRIES`], and resolve icons.
///
/// Names compare case-insensitively in dictionary order (see
/// [`compare_names`]).
pub fn normalize_entries(mut raw: Vec<RawEntry>, icons: &IconTheme) -> Vec<ContentEntry> {
    raw.sort_by(|a, b| {
        let (ka, kb) = (EntryKind::from_api(&a.kind), EntryKind::from_api(&b.kind));
        kb.is_dir()
            .cmp(&ka.is_dir())
            .then_with(|| compare_names(&a.name, &b.name))
    });
    raw.truncate(MAX_ENTRIES);
    raw.into_iter()
        .map(|entry| {
            let kind = EntryKind::from_api(&entry.kind);
            ContentEntry {
                icon: icons.resolve(&entry.name, kind),
                name: entry.name,
                kind,
            }
        })
        .collect()
}

/// ASCII punctuation in dictionary order; it all sorts before digits and
/// letters.
const PUNCTUATION_ORDER: &str = " _-,;:!?.'\"()[]{}@*/\\&#%`^+<=>|~$";

/// Primary weight of a character: punctuation, then digits, then letters
/// ignoring case, then everything else by code point.
fn primary_weight(c: char) -> u32 {
    if let Some(i) = PUNCTUATION_ORDER.find(c) {
        return i as u32;
    }
    let base = PUNCTUATION_ORDER.len() as u32;
    match c {
        '0'..='9' => base + (c as u32 - '0' as u32),
        'a'..='z' => base + 10 + (c as u32 - 'a' as u32),
        'A'..='Z' => base + 10 + (c as u32 - 'A' as u32),
        _ => base + 36 + c.to_lowercase().next().map_or(c as u32, |l| l as u32),
    }
}

/// Dictionary order for file names: punctuation before digits before
/// letters, case-insensitive, with lowercase before uppercase on case-only
/// ties. Falls back to byte order so the result is total.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    a.chars()
        .map(primary_weight)
        .cmp(b.chars().map(primary_weight))
        .then_with(|| {
            a.chars()
                .map(char::is_uppercase)
                .cmp(b.chars().map(char::is_uppercase))
        })
        .then_with(|| a.cmp(b))
}

fn readme_or_fallback(readme: Result<ReadmePayload, FetchError>) -> String {
    let fallback = match readme {
        Ok(payload) => match decode_readme(&payload) {
            Some(text) if !text.trim().is_empty() => return text,
            Some(_) => README_MISSING,
            None => README_UNAVAILABLE,
        },
        Err(FetchError::RateLimited { .. }) => README_RATE_LIMITED,
        Err(e @ (FetchError::NotFound | FetchError::Status { .. })) => {
            tracing::debug!(%e, "no README");
            README_MISSING
        }
        Err(e) => {
            tracing::warn!(%e, "README fetch failed");
            README_UNAVAILABLE
        }
    };
    fallback.to_string()
}

/// Decode a base64 README body as UTF-8. GitHub wraps the base64 at 60
/// columns, so all whitespace is stripped first.
pub fn decode_readme(payload: &ReadmePayload) -> Option<String> {
    let compact: String = payload
        .content
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    let bytes = STANDARD
        .decode(compact)
        .map_err(|e| tracing::warn!(%e, "README is not valid base64"))
        .ok()?;
    String::from_utf8(bytes)
        .map_err(|e| tracing::warn!(%e, "README is not valid UTF-8"))
        .ok()
}
