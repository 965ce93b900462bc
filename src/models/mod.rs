// src/models/mod.rs

//! Domain models for the crawler application.

mod config;
mod occurrence;
mod source;

// Re-export all public types
pub use config::{Config, CrawlConfig, CrawlerConfig};
pub use occurrence::{KeywordOccurrence, RelatedLink};
pub use source::Source;
