//! Shared test utilities: an in-memory [`RepoSource`], snapshot fixtures, and
//! a fake rasterizer.
//!
//! ```rust,ignore
//! use crate::test_helpers::*;
//!
//! let mut source = MockSource::healthy();
//! source.readme = Outcome::NotFound;
//! let snapshot = aggregate(&source, &IconTheme::default(), "o", "r").await?;
//! assert_eq!(snapshot.readme_markdown, README_MISSING);
//! ```

use crate::export::{RasterError, RasterRequest, Rasterizer};
use crate::github::{FetchError, RawEntry, ReadmePayload, RepoMetadata, RepoSource};
use crate::icons::IconTheme;
use crate::types::RepositorySnapshot;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use image::{Rgba, RgbaImage};
use std::sync::Mutex;
use std::time::Duration;

// =========================================================================
// Mock repository source
// =========================================================================

/// Scripted result for one mock endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Ok,
    NotFound,
    /// Rate limited with a reset time of `12:34:56`.
    RateLimited,
    Status(u16),
}

impl Outcome {
    fn into_result<T>(self, value: impl FnOnce() -> T) -> Result<T, FetchError> {
        match self {
            Outcome::Ok => Ok(value()),
            Outcome::NotFound => Err(FetchError::NotFound),
            Outcome::RateLimited => Err(FetchError::RateLimited {
                retry_after: Some("12:34:56".to_string()),
            }),
            Outcome::Status(status) => Err(FetchError::Status {
                status,
                text: reqwest::StatusCode::from_u16(status)
                    .ok()
                    .and_then(|s| s.canonical_reason())
                    .unwrap_or("Unknown")
                    .to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Call {
    Metadata,
    Contents,
    Readme,
}

/// In-memory source for `octocat/Hello-World`-shaped data.
///
/// Uses Mutex (not RefCell) so it stays `Sync` like the real client.
pub struct MockSource {
    pub metadata: Outcome,
    pub contents: Outcome,
    pub readme: Outcome,
    pub language: Option<String>,
    pub stars: u64,
    pub entries: Vec<RawEntry>,
    /// Base64 body returned by a successful README fetch.
    pub readme_content: String,
    pub contents_delay_ms: u64,
    calls: Mutex<Vec<Call>>,
}

impl MockSource {
    /// Every endpoint succeeds: 1500 stars, 20 forks, 1500 watchers, Ruby.
    pub fn healthy() -> Self {
        Self {
            metadata: Outcome::Ok,
            contents: Outcome::Ok,
            readme: Outcome::Ok,
            language: Some("Ruby".to_string()),
            stars: 1500,
            entries: vec![
                raw("README", "file"),
                raw("lib", "dir"),
                raw("hello.rb", "file"),
                raw("Gemfile", "file"),
            ],
            readme_content: encode_readme("# Hello World\nHi!"),
            contents_delay_ms: 0,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Endpoints hit so far, in completion order.
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

impl RepoSource for MockSource {
    async fn metadata(&self, _owner: &str, _repo: &str) -> Result<RepoMetadata, FetchError> {
        self.record(Call::Metadata);
        self.metadata.into_result(|| RepoMetadata {
            stargazers_count: self.stars,
            forks_count: 20,
            watchers_count: self.stars,
            language: self.language.clone(),
        })
    }

    async fn contents(&self, _owner: &str, _repo: &str) -> Result<Vec<RawEntry>, FetchError> {
        if self.contents_delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.contents_delay_ms)).await;
        }
        self.record(Call::Contents);
        self.contents.into_result(|| self.entries.clone())
    }

    async fn readme(&self, _owner: &str, _repo: &str) -> Result<ReadmePayload, FetchError> {
        self.record(Call::Readme);
        self.readme.into_result(|| ReadmePayload {
            content: self.readme_content.clone(),
            encoding: Some("base64".to_string()),
        })
    }
}

pub fn raw(name: &str, kind: &str) -> RawEntry {
    RawEntry {
        name: name.to_string(),
        kind: kind.to_string(),
    }
}

pub fn encode_readme(markdown: &str) -> String {
    STANDARD.encode(markdown)
}

// =========================================================================
// Snapshot fixtures
// =========================================================================

/// The snapshot [`MockSource::healthy`] aggregates to, built directly.
pub fn sample_snapshot() -> RepositorySnapshot {
    let icons = IconTheme::default();
    RepositorySnapshot {
        owner: "octocat".to_string(),
        name: "Hello-World".to_string(),
        primary_language: "Ruby".to_string(),
        stars: 1500,
        forks: 20,
        watchers: 1500,
        entries: crate::aggregate::normalize_entries(
            vec![
                raw("lib", "dir"),
                raw("Gemfile", "file"),
                raw("hello.rb", "file"),
                raw("README", "file"),
            ],
            &icons,
        ),
        readme_markdown: "# Hello World\nHi!".to_string(),
    }
}

// =========================================================================
// Fake rasterizer
// =========================================================================

/// Rasterizer that paints a solid image of the requested size and records
/// each request.
#[derive(Default)]
pub struct FakeRasterizer {
    pub requests: Mutex<Vec<(u32, u32, u32)>>,
    /// When set, every call fails with this message.
    pub fail_with: Option<String>,
}

impl FakeRasterizer {
    pub fn failing(message: &str) -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            fail_with: Some(message.to_string()),
        }
    }
}

impl Rasterizer for FakeRasterizer {
    fn rasterize(&self, request: &RasterRequest<'_>) -> Result<RgbaImage, RasterError> {
        self.requests
            .lock()
            .unwrap()
            .push((request.width, request.height, request.pixel_ratio));
        if let Some(message) = &self.fail_with {
            return Err(RasterError::Browser(message.clone()));
        }
        let (w, h) = request.output_size();
        Ok(RgbaImage::from_pixel(w, h, Rgba([13, 17, 23, 255])))
    }
}
