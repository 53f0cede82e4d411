//! The [`Matcher`] capability: search one feed for one term.
//!
//! Each feed type (`"rss"`, …) has exactly one matcher registered in the
//! [`Registry`](crate::registry::Registry). A matcher knows how to retrieve
//! and decode its source; the coordinator only ever calls [`Matcher::search`].

use async_trait::async_trait;

use crate::error::SearchError;
use crate::types::{FeedDescriptor, SearchResult};

/// Search strategy for one feed type.
///
/// Implementations must release any connection or handle they acquire before
/// returning, on success and on every error path. On error the whole call
/// fails: results gathered before the error are dropped.
#[async_trait]
pub trait Matcher: Send + Sync {
    /// Search `feed` for `term`, returning matches in document scan order.
    async fn search(
        &self,
        feed: &FeedDescriptor,
        term: &str,
    ) -> Result<Vec<SearchResult>, SearchError>;
}

/// Fallback used for feed types with no registration.
///
/// Always reports [`SearchError::UnsupportedType`], so the feed contributes
/// no results and the coordinator logs a diagnostic for it.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnsupportedMatcher;

#[async_trait]
impl Matcher for UnsupportedMatcher {
    async fn search(
        &self,
        feed: &FeedDescriptor,
        _term: &str,
    ) -> Result<Vec<SearchResult>, SearchError> {
        Err(SearchError::UnsupportedType {
            kind: feed.kind.clone(),
        })
    }
}
