//! trawl CLI
//!
//! Local execution entry point: crawl the configured search sources for a
//! keyword, print the results, and look the keyword up in the fresh index.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use trawl::{error::Result, models::Config, pipeline, services::CrawlOutcome};

/// trawl - Keyword Search Crawler
#[derive(Parser, Debug)]
#[command(
    name = "trawl",
    version,
    about = "Searches Wikipedia, arXiv, Google Scholar, and PubMed for a keyword and indexes the result pages"
)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Crawl all sources for a keyword and print the results
    Crawl {
        /// Keyword to search for
        keyword: String,

        /// Maximum crawl depth (accepted but links are never followed
        /// beyond the seed pages; see README)
        #[arg(long)]
        max_depth: Option<usize>,

        /// Cap on related links recorded per page
        #[arg(long)]
        max_links: Option<usize>,
    },

    /// List the configured search sources
    Sources,

    /// Validate the configuration file
    Validate,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = Config::load_or_default(&cli.config);

    match cli.command {
        Command::Crawl {
            keyword,
            max_depth,
            max_links,
        } => {
            if let Some(depth) = max_depth {
                config.crawl.max_depth = depth;
            }
            if let Some(links) = max_links {
                config.crawl.max_links_per_site = links;
            }
            config.validate()?;

            let outcome = pipeline::run_crawl(Arc::new(config), &keyword).await?;
            print_report(&keyword, &outcome);
        }

        Command::Sources => {
            for source in &config.sources {
                println!("{}: {}", source.name, source.url_template);
            }
        }

        Command::Validate => {
            log::info!("Validating configuration...");
            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            log::info!("Config OK ({} sources)", config.sources.len());
        }
    }

    Ok(())
}

/// Print crawl results, then the index lookup for the same keyword.
fn print_report(keyword: &str, outcome: &CrawlOutcome) {
    println!("--- Crawler Results ---");

    println!("\nKeyword occurrences:");
    if outcome.occurrences.is_empty() {
        println!("  (none)");
    }
    for entry in &outcome.occurrences {
        println!("  {} [{}] - {} occurrence(s)", entry.url, entry.title, entry.count);
    }

    println!("\nRelated links (keyword in link text):");
    for (page, links) in &outcome.related_links {
        println!("  Page: {}", page);
        for link in links {
            println!("    {} -> {}", link.text, link.url);
        }
    }

    // The original flow always searches the index right after crawling.
    println!("\nIndex lookup for '{}':", keyword);
    let results = outcome.index.lookup(keyword);
    if results.is_empty() {
        println!("  no results found");
    } else {
        println!("  found in {} page(s):", results.len());
        for url in results {
            println!("  - {}", url);
        }
    }
}
