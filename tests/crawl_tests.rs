//! Integration tests for the keyword crawler
//!
//! These tests use wiremock to create mock HTTP servers and exercise the
//! full fetch/retry/extract/index cycle end-to-end.

use std::sync::Arc;

use trawl::models::{Config, Source};
use trawl::services::KeywordCrawler;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration pointing at the given mock server sources.
fn create_test_config(sources: Vec<Source>) -> Arc<Config> {
    let mut config = Config::default();
    config.crawler.timeout_secs = 5;
    config.sources = sources;
    Arc::new(config)
}

fn source(name: &str, base_url: &str, search_path: &str) -> Source {
    Source {
        name: name.to_string(),
        url_template: format!("{}{}?q={{query}}", base_url, search_path),
        space_encoding: "+".to_string(),
    }
}

#[tokio::test]
async fn test_full_crawl_single_seed() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "K"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"<title>T</title><a href="/x">K here</a> K K"#)
                .insert_header("content-type", "text/html"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = create_test_config(vec![source("Fixture", &mock_server.uri(), "/search")]);
    let seed_url = format!("{}/search?q=K", mock_server.uri());

    let crawler = KeywordCrawler::new(config).expect("Failed to build crawler");
    let outcome = crawler.crawl("K").await.expect("Crawl failed");

    // One occurrence record with the title and the substring count
    assert_eq!(outcome.occurrences.len(), 1);
    assert_eq!(outcome.occurrences[0].url, seed_url);
    assert_eq!(outcome.occurrences[0].title, "T");
    assert_eq!(outcome.occurrences[0].count, 3);

    // One related link, resolved against the page URL with the naive join
    let links = &outcome.related_links[&seed_url];
    assert_eq!(links.len(), 1);
    assert_eq!(links[0].text, "K here");
    assert_eq!(links[0].url, format!("{}/x", seed_url));

    // The lowercased token maps back to the page
    assert_eq!(outcome.index.lookup("k"), [seed_url.clone()]);
    assert_eq!(outcome.index.lookup("K"), [seed_url]);

    assert_eq!(outcome.stats.seed_count, 1);
    assert_eq!(outcome.stats.pages_indexed, 1);
    assert_eq!(outcome.stats.pages_failed, 0);
}

#[tokio::test]
async fn test_not_found_then_ok_retries_same_url() {
    let mock_server = MockServer::start().await;

    // First attempt 404, second attempt 200. Mocks match in mount order.
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(404))
        .up_to_n_times(1)
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("<title>Back</title>rust content"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = create_test_config(vec![source("Flaky", &mock_server.uri(), "/search")]);
    let crawler = KeywordCrawler::new(config).expect("Failed to build crawler");
    let outcome = crawler.crawl("rust").await.expect("Crawl failed");

    assert_eq!(outcome.stats.pages_indexed, 1);
    assert_eq!(outcome.occurrences.len(), 1);
    assert_eq!(outcome.occurrences[0].title, "Back");
}

#[tokio::test]
async fn test_forbidden_is_fetched_exactly_once() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(403))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut config = Config::default();
    config.crawler.timeout_secs = 5;
    // Even a generous budget never retries a 403
    config.crawler.max_retries = 3;
    config.sources = vec![source("Restricted", &mock_server.uri(), "/search")];

    let crawler = KeywordCrawler::new(Arc::new(config)).expect("Failed to build crawler");
    let outcome = crawler.crawl("rust").await.expect("Crawl failed");

    assert!(outcome.occurrences.is_empty());
    assert!(outcome.index.is_empty());
    assert_eq!(outcome.stats.pages_failed, 1);

    // MockServer verifies expect(1) on drop
}

#[tokio::test]
async fn test_failing_seed_does_not_block_others() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/healthy"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("<title>Up</title>rust lives here"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = create_test_config(vec![
        source("Broken", &mock_server.uri(), "/broken"),
        source("Healthy", &mock_server.uri(), "/healthy"),
    ]);

    let crawler = KeywordCrawler::new(config).expect("Failed to build crawler");
    let outcome = crawler.crawl("rust").await.expect("Crawl failed");

    assert_eq!(outcome.stats.seed_count, 2);
    assert_eq!(outcome.stats.pages_failed, 1);
    assert_eq!(outcome.stats.pages_indexed, 1);
    assert_eq!(outcome.occurrences.len(), 1);
    assert_eq!(outcome.occurrences[0].title, "Up");
}

#[tokio::test]
async fn test_same_url_across_seeds_is_fetched_once() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string("rust once"))
        .expect(1)
        .mount(&mock_server)
        .await;

    // Two sources resolve to the identical search URL
    let config = create_test_config(vec![
        source("Mirror A", &mock_server.uri(), "/search"),
        source("Mirror B", &mock_server.uri(), "/search"),
    ]);

    let crawler = KeywordCrawler::new(config).expect("Failed to build crawler");
    let outcome = crawler.crawl("rust").await.expect("Crawl failed");

    assert_eq!(outcome.stats.seed_count, 2);
    assert_eq!(outcome.stats.pages_indexed, 1);
    assert_eq!(outcome.occurrences.len(), 1);
}
