// src/lib.rs

//! trawl: keyword search crawler and inverted index.
//!
//! Crawls a fixed set of search endpoints for a keyword, indexes each result
//! page once, and returns keyword occurrences, keyword-matching outbound
//! links, and a word-to-page inverted index for later lookup.

pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod utils;
