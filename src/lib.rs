//! feedscan: concurrent regex search across content feeds.
//!
//! This crate wires the format-independent core (`feedscan-core`) to the
//! built-in matchers (`feedscan-feeds`) so the binary and the integration
//! tests share one entry point.
//!
//! # Architecture
//!
//! ```text
//! feed list ──► Registry ──► search::run ──► ResultStream ──► display ──► stdout
//!                  ▲
//!      feedscan_feeds::register_builtin
//! ```
//!
//! Each feed is searched on its own tokio task; results from every feed
//! funnel into one channel that the consumer drains until it closes.

use std::sync::Arc;

pub use feedscan_core::{
    collect, config, display, error, feed_list, matcher, registry, search, types,
};
pub use feedscan_core::{
    DisplayError, ErrorKind, FeedDescriptor, FeedListError, FeedOutcome, FeedReport, Matcher,
    Registry, ResultSink, ResultStream, SearchError, SearchOptions, SearchResult, SearchSummary,
    WriterSink,
};
pub use feedscan_feeds as feeds;

use feedscan_core::config::{Config, HttpConfig};

/// A registry holding every built-in matcher.
pub fn builtin_registry(http: &HttpConfig) -> anyhow::Result<Registry> {
    let mut registry = Registry::new();
    feedscan_feeds::register_builtin(&mut registry, http)?;
    Ok(registry)
}

/// Start searching `feeds` for `term` with the built-in matchers and the
/// search settings from `config`.
pub fn start_search(
    config: &Config,
    feeds: Vec<FeedDescriptor>,
    term: &str,
) -> anyhow::Result<ResultStream> {
    let registry = Arc::new(builtin_registry(&config.http)?);
    Ok(search::run(registry, feeds, term, config.search.options()))
}
