// src/pipeline/crawl.rs

//! Keyword crawling pipeline.

use std::sync::Arc;

use crate::error::Result;
use crate::models::Config;
use crate::services::{CrawlOutcome, KeywordCrawler};

/// Run one crawl for a keyword and log a summary.
pub async fn run_crawl(config: Arc<Config>, keyword: &str) -> Result<CrawlOutcome> {
    log::info!(
        "Crawling {} sources for '{}'...",
        config.sources.len(),
        keyword
    );

    let crawler = KeywordCrawler::new(Arc::clone(&config))?;
    let outcome = crawler.crawl(keyword).await?;

    let elapsed = outcome.stats.finished_at - outcome.stats.started_at;
    log::info!(
        "Crawl finished: {} of {} seeds indexed ({} failed), {} pages with occurrences, {} tokens, {}.{:03}s",
        outcome.stats.pages_indexed,
        outcome.stats.seed_count,
        outcome.stats.pages_failed,
        outcome.occurrences.len(),
        outcome.index.token_count(),
        elapsed.num_seconds(),
        elapsed.num_milliseconds().rem_euclid(1000)
    );

    Ok(outcome)
}
