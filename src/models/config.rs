//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::Source;

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// HTTP and retry behavior settings
    #[serde(default)]
    pub crawler: CrawlerConfig,

    /// Crawl shape settings
    #[serde(default)]
    pub crawl: CrawlConfig,

    /// Search sources to seed each run from
    #[serde(default = "defaults::default_sources")]
    pub sources: Vec<Source>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.crawler.user_agent.trim().is_empty() {
            return Err(AppError::validation("crawler.user_agent is empty"));
        }
        if self.crawler.timeout_secs == 0 {
            return Err(AppError::validation("crawler.timeout_secs must be > 0"));
        }
        if self.crawler.max_concurrent == 0 {
            return Err(AppError::validation("crawler.max_concurrent must be > 0"));
        }
        if self.crawl.max_links_per_site == 0 {
            return Err(AppError::validation("crawl.max_links_per_site must be > 0"));
        }
        if self.sources.is_empty() {
            return Err(AppError::validation("No sources defined"));
        }
        for source in &self.sources {
            if source.name.trim().is_empty() {
                return Err(AppError::validation("Source with empty name"));
            }
            if !source.url_template.contains("{query}") {
                return Err(AppError::validation(format!(
                    "Source {} has no {{query}} placeholder in its URL template",
                    source.name
                )));
            }
            // Substitute a sample keyword so the template parses as a real URL.
            url::Url::parse(&source.search_url("probe"))?;
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            crawler: CrawlerConfig::default(),
            crawl: CrawlConfig::default(),
            sources: defaults::default_sources(),
        }
    }
}

/// HTTP client and retry behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlerConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Additional attempts allowed per URL on a retryable status (404/429)
    #[serde(default = "defaults::max_retries")]
    pub max_retries: u32,

    /// Maximum concurrent seed fetches
    #[serde(default = "defaults::max_concurrent")]
    pub max_concurrent: usize,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            max_retries: defaults::max_retries(),
            max_concurrent: defaults::max_concurrent(),
        }
    }
}

/// Crawl shape settings.
///
/// `max_depth` is accepted for compatibility with the crawl entry point, but
/// extracted links are never followed: effective reach is always one page per
/// seed (see README).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlConfig {
    /// Maximum crawl depth. Accepted but not honored beyond one hop per seed.
    #[serde(default = "defaults::max_depth")]
    pub max_depth: usize,

    /// Cap on related links recorded per page
    #[serde(default = "defaults::max_links_per_site")]
    pub max_links_per_site: usize,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            max_depth: defaults::max_depth(),
            max_links_per_site: defaults::max_links_per_site(),
        }
    }
}

mod defaults {
    use crate::models::Source;

    // Crawler defaults
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; trawl/0.1)".into()
    }
    pub fn timeout() -> u64 {
        10
    }
    pub fn max_retries() -> u32 {
        1
    }
    pub fn max_concurrent() -> usize {
        4
    }

    // Crawl defaults
    pub fn max_depth() -> usize {
        1
    }
    pub fn max_links_per_site() -> usize {
        20
    }

    // Source defaults
    pub fn default_sources() -> Vec<Source> {
        vec![
            Source {
                name: "Wikipedia".to_string(),
                url_template: "https://en.wikipedia.org/w/index.php?search={query}".to_string(),
                space_encoding: "%2Fwiki%2F".to_string(),
            },
            Source {
                name: "arXiv".to_string(),
                url_template: "https://arxiv.org/search/?query={query}&searchtype=all&abstracts=show&order=-announced_date_first&size=50".to_string(),
                space_encoding: "+".to_string(),
            },
            Source {
                name: "Google Scholar".to_string(),
                url_template: "https://scholar.google.com/scholar?hl=en&q={query}".to_string(),
                space_encoding: "+".to_string(),
            },
            Source {
                name: "PubMed".to_string(),
                url_template: "https://pubmed.ncbi.nlm.nih.gov/?term={query}".to_string(),
                space_encoding: "+".to_string(),
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn validate_default_config_ok() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn default_sources_cover_all_four_sites() {
        let config = Config::default();
        let names: Vec<_> = config.sources.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["Wikipedia", "arXiv", "Google Scholar", "PubMed"]);
    }

    #[test]
    fn validate_rejects_empty_user_agent() {
        let mut config = Config::default();
        config.crawler.user_agent = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_concurrency() {
        let mut config = Config::default();
        config.crawler.max_concurrent = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_template_without_placeholder() {
        let mut config = Config::default();
        config.sources[0].url_template = "https://example.com/search".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_unparseable_template() {
        let mut config = Config::default();
        config.sources[0].url_template = "not-a-url/{query}".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn load_reads_toml_overrides() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[crawler]
timeout_secs = 5
max_retries = 2

[crawl]
max_links_per_site = 3

[[sources]]
name = "Test"
url_template = "https://example.com/?q={{query}}"
"#
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.crawler.timeout_secs, 5);
        assert_eq!(config.crawler.max_retries, 2);
        assert_eq!(config.crawl.max_links_per_site, 3);
        assert_eq!(config.sources.len(), 1);
        // Omitted space_encoding falls back to "+"
        assert_eq!(config.sources[0].space_encoding, "+");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn load_or_default_falls_back_on_missing_file() {
        let config = Config::load_or_default("/nonexistent/config.toml");
        assert_eq!(config.crawl.max_depth, 1);
        assert_eq!(config.sources.len(), 4);
    }
}
