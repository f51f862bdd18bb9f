//! Repository data sources.
//!
//! [`RepoSource`] is the seam between the aggregator and the network: the
//! production implementation is [`GitHubClient`], tests substitute an
//! in-memory source. Each method maps to one GitHub REST endpoint:
//!
//! | Method | Endpoint | Required |
//! |---|---|---|
//! | [`metadata`](RepoSource::metadata) | `GET /repos/{owner}/{repo}` | yes |
//! | [`contents`](RepoSource::contents) | `GET /repos/{owner}/{repo}/contents` | no |
//! | [`readme`](RepoSource::readme) | `GET /repos/{owner}/{repo}/readme` | no |

mod client;
mod error;
mod http;

pub use client::GitHubClient;
pub use error::FetchError;

use serde::Deserialize;

/// Fields of the repository metadata response the card uses.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RepoMetadata {
    pub stargazers_count: u64,
    pub forks_count: u64,
    pub watchers_count: u64,
    #[serde(default)]
    pub language: Option<String>,
}

/// One item of a contents listing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawEntry {
    pub name: String,
    /// `file`, `dir`, `symlink`, or `submodule`.
    #[serde(rename = "type")]
    pub kind: String,
}

/// README response body. `content` is base64, wrapped with newlines.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReadmePayload {
    pub content: String,
    #[serde(default)]
    pub encoding: Option<String>,
}

/// A source of repository data.
///
/// The aggregator polls all three methods concurrently on one task, so the
/// returned futures need not be `Send`.
#[allow(async_fn_in_trait)]
pub trait RepoSource {
    async fn metadata(&self, owner: &str, repo: &str) -> Result<RepoMetadata, FetchError>;

    async fn contents(&self, owner: &str, repo: &str) -> Result<Vec<RawEntry>, FetchError>;

    async fn readme(&self, owner: &str, repo: &str) -> Result<ReadmePayload, FetchError>;
}
