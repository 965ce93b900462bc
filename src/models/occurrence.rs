//! Per-page result records produced by a crawl.

use serde::{Deserialize, Serialize};

/// A page whose text contained the search keyword at least once.
///
/// `count` is the case-insensitive, non-overlapping substring count of the
/// keyword in the page's extracted text. Created once per indexed page and
/// immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordOccurrence {
    pub url: String,
    pub title: String,
    pub count: usize,
}

/// An outbound anchor whose visible text matched the keyword.
///
/// `url` is the href resolved to absolute form with the naive join in
/// [`crate::utils::url::resolve`]; `text` is the anchor's trimmed visible
/// text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelatedLink {
    pub url: String,
    pub text: String,
}
