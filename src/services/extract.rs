// src/services/extract.rs

//! Content extraction from fetched pages.
//!
//! Turns a raw HTML body into plain text, a title, and the outbound anchors
//! in document order. Parsing is done with `scraper`; all text nodes are
//! collected (title and script text included), matching the whole-document
//! text the indexer expects.

use scraper::{Html, Selector};

use crate::error::{AppError, Result};

/// Title used when a page has no `<title>` element.
pub const DEFAULT_TITLE: &str = "No Title";

/// An `(href, visible text)` pair from an `<a href>` element.
#[derive(Debug, Clone)]
pub struct Anchor {
    pub href: String,
    pub text: String,
}

/// The extracted content of one fetched page.
#[derive(Debug, Clone)]
pub struct PageContent {
    /// Concatenation of every text node in the document
    pub text: String,
    /// First `<title>` element's trimmed text, or [`DEFAULT_TITLE`]
    pub title: String,
    /// Anchors in document order
    pub anchors: Vec<Anchor>,
}

/// Extract text, title, and anchors from a raw HTML body.
pub fn extract_page(html: &str) -> Result<PageContent> {
    let document = Html::parse_document(html);

    let title_sel = parse_selector("title")?;
    let anchor_sel = parse_selector("a[href]")?;

    let text: String = document.root_element().text().collect();

    let title = document
        .select(&title_sel)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .unwrap_or_else(|| DEFAULT_TITLE.to_string());

    let anchors = document
        .select(&anchor_sel)
        .filter_map(|el| {
            el.value().attr("href").map(|href| Anchor {
                href: href.to_string(),
                text: el.text().collect(),
            })
        })
        .collect();

    Ok(PageContent {
        text,
        title,
        anchors,
    })
}

/// Count case-insensitive, non-overlapping occurrences of `keyword` in `text`.
pub fn count_occurrences(text: &str, keyword: &str) -> usize {
    if keyword.is_empty() {
        return 0;
    }
    text.to_lowercase()
        .matches(&keyword.to_lowercase())
        .count()
}

fn parse_selector(s: &str) -> Result<Selector> {
    Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
}
