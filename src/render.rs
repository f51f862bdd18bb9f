//! HTML rendering of the card.
//!
//! Two documents are produced from the same card markup:
//!
//! - **Capture document** ([`capture_document`]): the card alone at its
//!   logical size on a zero-margin page. This is what the rasterizer loads.
//!   Remote icon URLs get a cache-busting query so a stale or blocked cached
//!   copy cannot end up in the capture.
//! - **Preview page** ([`preview_page`]): the card inside a capture area that
//!   is scaled and offset by a [`GeometryResult`], as it appears on screen.
//!
//! Markup uses [maud](https://maud.lambda.xyz/), so all interpolated values are
//! escaped except the README, which is already sanitized HTML.

use crate::card::CardModel;
use crate::geometry::GeometryResult;
use crate::icons::EmbeddedIcon;
use crate::types::ContentEntry;
use maud::{DOCTYPE, Markup, PreEscaped, html};

const CARD_CSS: &str = include_str!("../static/card.css");

/// DOM id of the card root; the rasterizer captures this element.
pub const CARD_ELEMENT_ID: &str = "github-card";

/// Per-render switches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Appended as `?t=<token>` to remote icon URLs.
    pub cache_bust: Option<String>,
}

impl RenderOptions {
    pub fn cache_busted(token: impl Into<String>) -> Self {
        Self {
            cache_bust: Some(token.into()),
        }
    }

    fn icon_src(&self, entry: &ContentEntry) -> String {
        let src = entry.icon.src();
        match (&self.cache_bust, entry.icon.is_remote()) {
            (Some(token), true) => {
                let sep = if src.contains('?') { '&' } else { '?' };
                format!("{src}{sep}t={token}")
            }
            _ => src.to_string(),
        }
    }
}

fn base_document(title: &str, body_class: Option<&str>, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (PreEscaped(CARD_CSS)) }
            }
            body class=[body_class] {
                (content)
            }
        }
    }
}

fn explorer_item(entry: &ContentEntry, options: &RenderOptions) -> Markup {
    let fallback = EmbeddedIcon::for_kind(entry.kind).data_uri();
    let onerror = format!("this.onerror=null;this.src='{fallback}';");
    html! {
        div.file-item {
            @if entry.kind.is_dir() {
                span.chevron { "›" }
            } @else {
                span.chevron-spacer {}
            }
            img.file-icon src=(options.icon_src(entry)) crossorigin="anonymous" onerror=(onerror) alt="icon";
            span.file-name { (entry.name) }
        }
    }
}

/// The card element itself, sized to its logical preset dimensions.
pub fn render_card(card: &CardModel, options: &RenderOptions) -> Markup {
    let size = card.preset.logical_size();
    let style = format!(
        "background: {}; width: {}px; height: {}px;",
        card.theme.gradient, size.width, size.height
    );
    let swatch = format!("background-color: {};", card.language_color);

    html! {
        div id=(CARD_ELEMENT_ID) class=(card.class_list()) style=(style) {
            div.browser-bar {
                div.browser-dots {
                    span.dot.red {}
                    span.dot.yellow {}
                    span.dot.green {}
                }
                div #browser-url.browser-url { (card.browser_url) }
            }
            div.card-body {
                @if card.show_explorer {
                    aside #explorer-sidebar.explorer {
                        div.explorer-title { "EXPLORER" }
                        div #explorer-list.explorer-list {
                            @for entry in &card.entries {
                                (explorer_item(entry, options))
                            }
                        }
                    }
                }
                main.card-main {
                    h1 #card-repo-full.repo-title {
                        span.repo-owner { (card.owner) " /" }
                        " "
                        span.repo-name { (card.name) }
                    }
                    div.card-stats {
                        span.stat.lang {
                            span #card-lang-color.lang-dot style=(swatch) {}
                            span #card-lang { (card.language) }
                        }
                        span.stat {
                            span.stat-icon { "★" }
                            span #card-stars { (card.stars) }
                            span.stat-label { "stars" }
                        }
                        span.stat {
                            span.stat-icon { "⑂" }
                            span #card-forks { (card.forks) }
                            span.stat-label { "forks" }
                        }
                        span.stat {
                            span.stat-icon { "◉" }
                            span #card-watchers { (card.watchers) }
                            span.stat-label { "watchers" }
                        }
                    }
                    @if card.show_readme {
                        div #readme-container.readme {
                            div #readme-rendered.markdown-body {
                                (PreEscaped(&card.readme_html))
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Standalone page containing only the card, for rasterization.
pub fn capture_document(card: &CardModel, options: &RenderOptions) -> Markup {
    let title = format!("{} / {}", card.owner, card.name);
    base_document(&title, Some("capture"), render_card(card, options))
}

/// On-screen preview: the card in a capture area transformed by `geometry`.
pub fn preview_page(card: &CardModel, geometry: &GeometryResult) -> Markup {
    let title = format!("{} / {} preview", card.owner, card.name);
    let content = html! {
        main.preview {
            div #capture-area.capture-area style=(geometry.to_css()) {
                (render_card(card, &RenderOptions::default()))
            }
        }
    };
    base_document(&title, Some("preview-page"), content)
}
