//! feedscan-feeds: concrete feed matchers for feedscan.
//!
//! Each module implements [`feedscan_core::Matcher`] for one feed type.
//! [`register_builtin`] installs all of them into a [`Registry`] and is meant
//! to be called once during startup, before any search is dispatched.

use std::sync::Arc;

use feedscan_core::config::HttpConfig;
use feedscan_core::Registry;

pub mod rss;

pub use rss::RssMatcher;

/// Register every built-in matcher into `registry`.
pub fn register_builtin(registry: &mut Registry, http: &HttpConfig) -> anyhow::Result<()> {
    registry.register(rss::FEED_TYPE, Arc::new(RssMatcher::new(http)?));
    Ok(())
}
