// src/services/crawler.rs

//! Keyword crawl orchestrator.
//!
//! Drives the configured seed sources through fetch, retry, extraction, and
//! indexing, and accumulates the run result. Seeds run through a bounded
//! worker pool; a single merge loop applies every mutation to the index and
//! the accumulators.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use tokio::sync::Mutex;

use crate::error::{AppError, Result};
use crate::models::{Config, KeywordOccurrence, RelatedLink};
use crate::pipeline::index::InvertedIndex;
use crate::services::extract::{count_occurrences, extract_page};
use crate::services::fetch::{HttpFetcher, PageFetcher};
use crate::services::retry::{RetryConfig, RetryDecision, RetryPolicy};
use crate::utils::http;
use crate::utils::url::resolve;

/// Summary of a crawl run.
#[derive(Debug, Clone)]
pub struct CrawlStats {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub seed_count: usize,
    pub pages_indexed: usize,
    pub pages_failed: usize,
}

/// The result of one crawl invocation, owned by the caller.
#[derive(Debug)]
pub struct CrawlOutcome {
    /// Pages whose text contained the keyword, with counts
    pub occurrences: Vec<KeywordOccurrence>,
    /// Page URL -> keyword-matching outbound links (capped per page)
    pub related_links: HashMap<String, Vec<RelatedLink>>,
    /// Word -> page URLs, for post-crawl lookup
    pub index: InvertedIndex,
    pub stats: CrawlStats,
}

/// One page's terminal state after its branch finishes.
enum PageOutcome {
    Indexed(IndexedPage),
    Failed,
    Skipped,
}

struct IndexedPage {
    url: String,
    title: String,
    text: String,
    keyword_count: usize,
    related: Vec<RelatedLink>,
}

/// Service for crawling the configured search sources for a keyword.
pub struct KeywordCrawler {
    config: Arc<Config>,
    fetcher: Arc<dyn PageFetcher>,
    policy: RetryPolicy,
}

impl KeywordCrawler {
    /// Create a crawler with the production HTTP fetcher.
    pub fn new(config: Arc<Config>) -> Result<Self> {
        let client = http::create_async_client(&config.crawler)?;
        let fetcher = Arc::new(HttpFetcher::new(client));
        Ok(Self::with_fetcher(config, fetcher))
    }

    /// Create a crawler over an arbitrary fetcher implementation.
    pub fn with_fetcher(config: Arc<Config>, fetcher: Arc<dyn PageFetcher>) -> Self {
        let policy = RetryPolicy::new(RetryConfig {
            max_retries: config.crawler.max_retries,
            ..RetryConfig::default()
        });
        Self {
            config,
            fetcher,
            policy,
        }
    }

    /// Crawl every configured source for `keyword` and build the run result.
    ///
    /// The keyword must be non-empty after trimming. Per-URL failures are
    /// logged and never abort the run; the worst case is an empty outcome.
    pub async fn crawl(&self, keyword: &str) -> Result<CrawlOutcome> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Err(AppError::validation("keyword is empty"));
        }

        let started_at = Utc::now();
        let concurrency = self.config.crawler.max_concurrent.max(1);
        let visited = Arc::new(Mutex::new(HashSet::new()));

        let jobs: Vec<(String, String)> = self
            .config
            .sources
            .iter()
            .map(|source| (source.name.clone(), source.search_url(keyword)))
            .collect();
        let seed_count = jobs.len();

        let mut page_stream = stream::iter(jobs)
            .map(|(site, url)| {
                let visited = Arc::clone(&visited);
                async move {
                    log::info!("Starting crawl on {} with URL: {}", site, url);
                    self.visit(url, keyword, 0, &visited).await
                }
            })
            .buffer_unordered(concurrency);

        let mut index = InvertedIndex::new();
        let mut occurrences = Vec::new();
        let mut related_links = HashMap::new();
        let mut pages_indexed = 0;
        let mut pages_failed = 0;

        // Single writer: all index/accumulator mutations happen here.
        while let Some(outcome) = page_stream.next().await {
            match outcome {
                PageOutcome::Indexed(page) => {
                    index.add_page(&page.url, &page.text);
                    if page.keyword_count > 0 {
                        occurrences.push(KeywordOccurrence {
                            url: page.url.clone(),
                            title: page.title,
                            count: page.keyword_count,
                        });
                    }
                    related_links.entry(page.url).or_insert(page.related);
                    pages_indexed += 1;
                }
                PageOutcome::Failed => pages_failed += 1,
                PageOutcome::Skipped => {}
            }
        }

        let stats = CrawlStats {
            started_at,
            finished_at: Utc::now(),
            seed_count,
            pages_indexed,
            pages_failed,
        };

        Ok(CrawlOutcome {
            occurrences,
            related_links,
            index,
            stats,
        })
    }

    /// Visit one URL: dedup, fetch with retry, extract, and record.
    ///
    /// `depth` is checked on entry but no link ever schedules a deeper visit,
    /// so reach stays at one page per seed.
    async fn visit(
        &self,
        url: String,
        keyword: &str,
        depth: usize,
        visited: &Mutex<HashSet<String>>,
    ) -> PageOutcome {
        if depth > self.config.crawl.max_depth {
            return PageOutcome::Skipped;
        }

        // Insert before fetching so a URL recurring across seeds is never
        // queued twice.
        if !visited.lock().await.insert(url.clone()) {
            return PageOutcome::Skipped;
        }

        log::info!("Crawling URL: {}", url);

        let mut retries_remaining = self.policy.max_retries();
        loop {
            let response = match self.fetcher.fetch(&url).await {
                Ok(response) => response,
                Err(error) => {
                    // Transport failures are never retried
                    log::warn!("{}", error);
                    tokio::time::sleep(self.policy.transport_delay()).await;
                    return PageOutcome::Failed;
                }
            };

            match self.policy.classify(response.status, &url, retries_remaining) {
                RetryDecision::Proceed => {
                    log::info!("Successfully fetched: {}", url);
                    return self.index_page(url, keyword, &response.body);
                }
                RetryDecision::Retry { delay } => {
                    log::info!(
                        "Retrying {} in {:.2}s (status {})",
                        url,
                        delay.as_secs_f64(),
                        response.status
                    );
                    tokio::time::sleep(delay).await;
                    retries_remaining -= 1;
                }
                RetryDecision::Fail(error) => {
                    log::warn!("{}", error);
                    return PageOutcome::Failed;
                }
            }
        }
    }

    /// Extract a fetched body and build the page's records.
    fn index_page(&self, url: String, keyword: &str, body: &str) -> PageOutcome {
        let content = match extract_page(body) {
            Ok(content) => content,
            Err(error) => {
                log::warn!("Failed to extract {}: {}", url, error);
                return PageOutcome::Failed;
            }
        };

        let keyword_count = count_occurrences(&content.text, keyword);
        let keyword_lower = keyword.to_lowercase();
        let cap = self.config.crawl.max_links_per_site;

        // Scan anchors in document order, stopping once the cap is reached.
        let mut related = Vec::new();
        for anchor in &content.anchors {
            if related.len() >= cap {
                break;
            }
            if anchor.text.to_lowercase().contains(&keyword_lower) {
                related.push(RelatedLink {
                    url: resolve(&url, &anchor.href),
                    text: anchor.text.trim().to_string(),
                });
            }
        }

        PageOutcome::Indexed(IndexedPage {
            url,
            title: content.title,
            text: content.text,
            keyword_count,
            related,
        })
    }
}
