//! Explorer icon resolution.
//!
//! Icons come from the Material Icon Theme repository by default. Directory
//! names and file extensions are looked up in static tables; anything that
//! misses the file table gets an embedded data-URI icon instead of a remote
//! URL, so rasterizing the card never waits on a request that would 404.
//!
//! | Entry | Lookup | Miss |
//! |---|---|---|
//! | Directory | lowercase name → `folder-*` | remote `folder.svg` |
//! | File | lowercase extension → icon name | embedded file icon |

use crate::types::EntryKind;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

pub const DEFAULT_ICON_BASE_URL: &str =
    "https://raw.githubusercontent.com/PKief/vscode-material-icon-theme/master/icons";

const FOLDER_ICONS: &[(&str, &str)] = &[
    ("src", "folder-src"),
    ("public", "folder-public"),
    ("node_modules", "folder-node"),
    ("assets", "folder-resource"),
    ("scripts", "folder-scripts"),
    ("test", "folder-test"),
    ("tests", "folder-test"),
    ("dist", "folder-dist"),
    ("build", "folder-dist"),
    ("css", "folder-css"),
    ("style", "folder-css"),
    ("styles", "folder-css"),
    ("js", "folder-javascript"),
    ("javascript", "folder-javascript"),
    ("images", "folder-images"),
    ("img", "folder-images"),
    ("docs", "folder-docs"),
];

const FILE_ICONS: &[(&str, &str)] = &[
    ("js", "javascript"),
    ("ts", "typescript"),
    ("jsx", "react"),
    ("tsx", "react_ts"),
    ("css", "css"),
    ("html", "html"),
    ("json", "json"),
    ("md", "markdown"),
    ("py", "python"),
    ("java", "java"),
    ("rb", "ruby"),
    ("rs", "rust"),
    ("go", "go"),
    ("php", "php"),
    ("sql", "database"),
    ("sh", "console"),
    ("yml", "yaml"),
    ("yaml", "yaml"),
    ("dockerfile", "docker"),
    ("svg", "svg"),
    ("png", "image"),
    ("jpg", "image"),
    ("jpeg", "image"),
    ("gif", "image"),
    ("pdf", "pdf"),
    ("zip", "zip"),
    ("exe", "exe"),
    ("txt", "document"),
    ("gitignore", "git"),
];

const FILE_SVG: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="24" height="24" viewBox="0 0 24 24" fill="none" stroke="rgba(255,255,255,0.6)" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"><path d="M14 2H6a2 2 0 0 0-2 2v16a2 2 0 0 0 2 2h12a2 2 0 0 0 2-2V8z"/><path d="M14 2v6h6"/></svg>"#;

const FOLDER_SVG: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="24" height="24" viewBox="0 0 24 24" fill="none" stroke="rgba(255,220,100,0.8)" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"><path d="M22 19a2 2 0 0 1-2 2H4a2 2 0 0 1-2-2V5a2 2 0 0 1 2-2h5l2 3h9a2 2 0 0 1 2 2z"/></svg>"#;

static FILE_DATA_URI: LazyLock<String> = LazyLock::new(|| svg_data_uri(FILE_SVG));
static FOLDER_DATA_URI: LazyLock<String> = LazyLock::new(|| svg_data_uri(FOLDER_SVG));

fn svg_data_uri(svg: &str) -> String {
    format!("data:image/svg+xml;base64,{}", STANDARD.encode(svg))
}

/// Icon bundled into the binary as a data URI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmbeddedIcon {
    File,
    Folder,
}

impl EmbeddedIcon {
    /// Fallback used when a remote icon for an entry of `kind` fails to load.
    pub fn for_kind(kind: EntryKind) -> Self {
        match kind {
            EntryKind::Directory => Self::Folder,
            EntryKind::File => Self::File,
        }
    }

    pub fn data_uri(self) -> &'static str {
        match self {
            Self::File => &FILE_DATA_URI,
            Self::Folder => &FOLDER_DATA_URI,
        }
    }
}

/// Resolved icon for an explorer entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", content = "value", rename_all = "lowercase")]
pub enum IconRef {
    Remote(String),
    Embedded(EmbeddedIcon),
}

impl IconRef {
    /// Value for an `<img src>` attribute.
    pub fn src(&self) -> &str {
        match self {
            Self::Remote(url) => url,
            Self::Embedded(icon) => icon.data_uri(),
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Remote(_))
    }
}

/// Icon set rooted at a base URL serving `<icon-name>.svg` files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconTheme {
    base_url: String,
}

impl Default for IconTheme {
    fn default() -> Self {
        Self::new(DEFAULT_ICON_BASE_URL)
    }
}

impl IconTheme {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn remote(&self, icon: &str) -> IconRef {
        IconRef::Remote(format!("{}/{icon}.svg", self.base_url))
    }

    /// Resolve the icon for an entry.
    ///
    /// Directory names match case-insensitively. A file's extension is the
    /// text after its last dot, so `Dockerfile` is looked up as `dockerfile`
    /// and `.gitignore` as `gitignore`.
    pub fn resolve(&self, name: &str, kind: EntryKind) -> IconRef {
        match kind {
            EntryKind::Directory => {
                let lower = name.to_lowercase();
                let icon = lookup(FOLDER_ICONS, &lower).unwrap_or("folder");
                self.remote(icon)
            }
            EntryKind::File => {
                let ext = name.rsplit('.').next().unwrap_or(name).to_lowercase();
                match lookup(FILE_ICONS, &ext) {
                    Some(icon) => self.remote(icon),
                    None => IconRef::Embedded(EmbeddedIcon::File),
                }
            }
        }
    }
}

fn lookup(table: &[(&str, &'static str)], key: &str) -> Option<&'static str> {
    table.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn theme() -> IconTheme {
        IconTheme::new("https://icons.test/")
    }

    #[test]
    fn known_folder_is_case_insensitive() {
        assert_eq!(
            theme().resolve("SRC", EntryKind::Directory),
            IconRef::Remote("https://icons.test/folder-src.svg".into())
        );
    }

    #[test]
    fn unknown_folder_gets_generic_remote_folder() {
        assert_eq!(
            theme().resolve("vendor", EntryKind::Directory),
            IconRef::Remote("https://icons.test/folder.svg".into())
        );
    }

    #[test]
    fn file_matches_by_last_extension() {
        assert_eq!(
            theme().resolve("archive.tar.ZIP", EntryKind::File),
            IconRef::Remote("https://icons.test/zip.svg".into())
        );
        assert_eq!(
            theme().resolve("Dockerfile", EntryKind::File),
            IconRef::Remote("https://icons.test/docker.svg".into())
        );
        assert_eq!(
            theme().resolve(".gitignore", EntryKind::File),
            IconRef::Remote("https://icons.test/git.svg".into())
        );
    }

    #[test]
    fn unmapped_file_gets_embedded_icon() {
        let icon = theme().resolve("LICENSE", EntryKind::File);
        assert_eq!(icon, IconRef::Embedded(EmbeddedIcon::File));
        assert!(!icon.is_remote());
        assert!(icon.src().starts_with("data:image/svg+xml;base64,"));
    }

    #[test]
    fn embedded_icons_decode_to_svg() {
        for icon in [EmbeddedIcon::File, EmbeddedIcon::Folder] {
            let encoded = icon
                .data_uri()
                .strip_prefix("data:image/svg+xml;base64,")
                .unwrap();
            let svg = String::from_utf8(STANDARD.decode(encoded).unwrap()).unwrap();
            assert!(svg.starts_with("<svg"));
        }
    }

    #[test]
    fn trailing_slash_on_base_url_is_trimmed() {
        assert_eq!(theme().base_url(), "https://icons.test");
    }
}
