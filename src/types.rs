//! Shared types passed between the aggregate, build, and render stages.
//!
//! A [`RepositorySnapshot`] is produced once per generate action and replaced
//! wholesale on the next one. Nothing in here is mutated after construction.

use crate::icons::IconRef;
use serde::{Deserialize, Serialize};

/// Kind of a top-level repository entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Directory,
    File,
}

impl EntryKind {
    /// Map a GitHub contents API `type` field to an entry kind.
    ///
    /// Only `dir` is a directory; files, symlinks, and submodules all render
    /// as files in the explorer.
    pub fn from_api(kind: &str) -> Self {
        if kind == "dir" {
            Self::Directory
        } else {
            Self::File
        }
    }

    pub fn is_dir(self) -> bool {
        self == Self::Directory
    }
}

/// One row of the explorer panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentEntry {
    pub name: String,
    pub kind: EntryKind,
    /// Remote icon URL, or an embedded fallback when the name has no mapping.
    pub icon: IconRef,
}

/// Immutable, normalized view of one repository fetch cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositorySnapshot {
    pub owner: String,
    pub name: String,
    /// Primary language, or the fallback label when GitHub reports none.
    pub primary_language: String,
    pub stars: u64,
    pub forks: u64,
    pub watchers: u64,
    /// Directories first, alphabetical within each group, at most ten entries.
    pub entries: Vec<ContentEntry>,
    /// Raw README markdown. Never empty: failures are replaced with a canned message.
    pub readme_markdown: String,
}

impl RepositorySnapshot {
    /// `github.com/<owner>/<name>`, shown in the card's address bar.
    pub fn browser_url(&self) -> String {
        format!("github.com/{}/{}", self.owner, self.name)
    }
}
