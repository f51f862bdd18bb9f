//! README markdown → sanitized HTML.
//!
//! GitHub-flavored extensions are enabled and rendering is line-break
//! sensitive: a single newline inside a paragraph becomes `<br>`, the way
//! GitHub renders comments. Headings get no generated anchor ids. The output
//! is cleaned with `ammonia` before it is embedded in the card.

use pulldown_cmark::{Event, Options, Parser, html};

/// Convert README markdown to HTML that is safe to inline.
pub fn render_markdown(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);
    options.insert(Options::ENABLE_FOOTNOTES);

    let parser = Parser::new_ext(markdown, options).map(|event| match event {
        Event::SoftBreak => Event::HardBreak,
        other => other,
    });

    let mut html_output = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut html_output, parser);

    ammonia::clean(&html_output)
}
