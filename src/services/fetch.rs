// src/services/fetch.rs

//! HTTP fetch capability.
//!
//! The crawler talks to the network through the [`PageFetcher`] trait so the
//! orchestrator can be exercised against scripted responses in tests.

use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;

/// A raw HTTP response: status code plus body text.
#[derive(Debug, Clone)]
pub struct FetchResponse {
    pub status: u16,
    pub body: String,
}

/// Terminal per-URL fetch outcomes.
///
/// Every variant ends that URL's branch only; the overall crawl always
/// continues with the remaining seeds.
#[derive(Debug, Error)]
pub enum FetchError {
    /// 403, never retried
    #[error("access to {url} is restricted (403 Forbidden)")]
    AccessRestricted { url: String },

    /// 404 with the retry budget exhausted
    #[error("the page at {url} was not found (404 Not Found)")]
    NotFound { url: String },

    /// 429 with the retry budget exhausted. Rendered with the generic
    /// status-code wording, matching the fallthrough of the original policy.
    #[error("an error occurred while accessing {url} (status code 429)")]
    RateLimited { url: String },

    /// 500, never retried
    #[error("{url} is experiencing internal issues (500 Server Error)")]
    ServerError { url: String },

    /// 503, never retried
    #[error("{url} is temporarily unavailable (503 Service Unavailable)")]
    Unavailable { url: String },

    /// Any other non-200 status
    #[error("an error occurred while accessing {url} (status code {status})")]
    Http { url: String, status: u16 },

    /// Network or timeout failure before an HTTP response arrived
    #[error("request failed for {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

impl FetchError {
    /// Wrap a reqwest error as a transport failure for a URL.
    pub fn transport(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Transport {
            url: url.into(),
            source,
        }
    }
}

/// Trait for fetching a page over HTTP.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch a URL, returning the status and body or a transport failure.
    async fn fetch(&self, url: &str) -> std::result::Result<FetchResponse, FetchError>;
}

/// Production fetcher over a configured `reqwest::Client`.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> std::result::Result<FetchResponse, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::transport(url, e))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| FetchError::transport(url, e))?;
        Ok(FetchResponse { status, body })
    }
}
