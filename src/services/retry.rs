// src/services/retry.rs

//! Retry policy for HTTP status handling.
//!
//! A closed decision table mapping a status code and the remaining retry
//! budget to one of three outcomes. All backoff timing lives here, including
//! the jitter slept after a transport failure.

use std::time::Duration;

use rand::Rng;

use crate::services::fetch::FetchError;

/// Retry policy configuration.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Additional attempts allowed per URL for retryable statuses. Default: 1
    pub max_retries: u32,
    /// Fixed delay before retrying a 404. Default: 2s
    pub not_found_delay: Duration,
    /// Inclusive bounds (seconds) of the uniform jitter before retrying a 429.
    /// Default: [10, 20]
    pub rate_limit_delay_secs: (f64, f64),
    /// Inclusive bounds (seconds) of the jitter slept after a transport
    /// failure. Default: [1, 3]
    pub transport_delay_secs: (f64, f64),
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 1,
            not_found_delay: Duration::from_secs(2),
            rate_limit_delay_secs: (10.0, 20.0),
            transport_delay_secs: (1.0, 3.0),
        }
    }
}

/// Outcome of classifying one HTTP response.
#[derive(Debug)]
pub enum RetryDecision {
    /// 200: hand the body to the extractor
    Proceed,
    /// Sleep `delay`, decrement the budget, and re-fetch the same URL
    Retry { delay: Duration },
    /// Terminal for this URL; the crawl moves on to the next seed
    Fail(FetchError),
}

/// Status classification and backoff timing.
#[derive(Debug, Clone, Default)]
pub struct RetryPolicy {
    config: RetryConfig,
}

impl RetryPolicy {
    pub fn new(config: RetryConfig) -> Self {
        Self { config }
    }

    /// The configured per-URL retry budget.
    pub fn max_retries(&self) -> u32 {
        self.config.max_retries
    }

    /// Classify an HTTP status against the remaining retry budget.
    pub fn classify(&self, status: u16, url: &str, retries_remaining: u32) -> RetryDecision {
        match (status, retries_remaining) {
            (200, _) => RetryDecision::Proceed,
            (403, _) => RetryDecision::Fail(FetchError::AccessRestricted {
                url: url.to_string(),
            }),
            (404, r) if r > 0 => RetryDecision::Retry {
                delay: self.config.not_found_delay,
            },
            (404, _) => RetryDecision::Fail(FetchError::NotFound {
                url: url.to_string(),
            }),
            (429, r) if r > 0 => RetryDecision::Retry {
                delay: jitter(self.config.rate_limit_delay_secs),
            },
            (429, _) => RetryDecision::Fail(FetchError::RateLimited {
                url: url.to_string(),
            }),
            (500, _) => RetryDecision::Fail(FetchError::ServerError {
                url: url.to_string(),
            }),
            (503, _) => RetryDecision::Fail(FetchError::Unavailable {
                url: url.to_string(),
            }),
            (status, _) => RetryDecision::Fail(FetchError::Http {
                url: url.to_string(),
                status,
            }),
        }
    }

    /// Jitter slept after a transport failure before the branch ends.
    pub fn transport_delay(&self) -> Duration {
        jitter(self.config.transport_delay_secs)
    }
}

fn jitter((low, high): (f64, f64)) -> Duration {
    Duration::from_secs_f64(rand::thread_rng().gen_range(low..=high))
}
