//! Pipeline entry points for crawler operations.
//!
//! - `run_crawl`: fetch and index every configured source for a keyword
//! - `index`: the inverted index built during a crawl

pub mod crawl;
pub mod index;

pub use crawl::run_crawl;
pub use index::InvertedIndex;
