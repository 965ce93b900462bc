//! Inverted index over crawled pages.
//!
//! Maps lowercase word tokens to the URLs of the pages containing them,
//! enabling keyword lookup after a crawl without re-fetching anything.
//!
//! Example: `{"scholarship": ["https://a/1", "https://b/2"]}`

use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

use regex::Regex;

/// Matches maximal runs of word characters (letters, digits, underscore).
fn word_pattern() -> &'static Regex {
    static WORD: OnceLock<Regex> = OnceLock::new();
    WORD.get_or_init(|| Regex::new(r"\w+").expect("valid word regex"))
}

/// Inverted index: token -> page URLs in insertion order.
///
/// A URL appears at most once per token per page (duplicate tokens within a
/// page are deduplicated before insertion), but the same URL may appear under
/// a token once for each distinct page that contains it. No stemming, no
/// stopword removal, no length filter.
#[derive(Debug, Clone, Default)]
pub struct InvertedIndex {
    entries: HashMap<String, Vec<String>>,
}

impl InvertedIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tokenize a page's text and record the page URL under each distinct
    /// token.
    pub fn add_page(&mut self, url: &str, text: &str) {
        let lowered = text.to_lowercase();
        let mut seen = HashSet::new();
        for token in word_pattern().find_iter(&lowered) {
            let token = token.as_str();
            if seen.insert(token) {
                self.entries
                    .entry(token.to_string())
                    .or_default()
                    .push(url.to_string());
            }
        }
    }

    /// Look up the pages containing a keyword (lowercased exact token).
    ///
    /// A missing token yields an empty slice; that is a normal outcome.
    pub fn lookup(&self, keyword: &str) -> &[String] {
        self.entries
            .get(&keyword.to_lowercase())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of distinct tokens in the index.
    pub fn token_count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
