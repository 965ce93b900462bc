//! Service layer for the crawler application.
//!
//! This module contains the business logic for:
//! - Page fetching over HTTP (`PageFetcher` / `HttpFetcher`)
//! - HTTP status classification and backoff (`RetryPolicy`)
//! - Content extraction (`extract_page`)
//! - Crawl orchestration (`KeywordCrawler`)

pub mod crawler;
pub mod extract;
pub mod fetch;
pub mod retry;

pub use crawler::{CrawlOutcome, CrawlStats, KeywordCrawler};
pub use extract::{extract_page, PageContent};
pub use fetch::{FetchError, FetchResponse, HttpFetcher, PageFetcher};
pub use retry::{RetryConfig, RetryDecision, RetryPolicy};
