//! Error types for the search pipeline.
//!
//! Every [`SearchError`] is local to one feed: the coordinator logs it,
//! records it in the [`SearchSummary`](crate::search::SearchSummary) and moves
//! on. Only failing to obtain the feed list ([`FeedListError`]) is fatal to a
//! run, and that happens before any search starts.

use std::io;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Errors a [`Matcher`](crate::matcher::Matcher) can report for a single feed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// The feed descriptor is unusable, e.g. it has no location.
    #[error("feed {feed:?} is misconfigured: {reason}")]
    Configuration { feed: String, reason: String },
    /// The source could not be reached.
    #[error("transport failure fetching {uri}: {reason}")]
    Transport { uri: String, reason: String },
    /// The source answered with something other than 200 OK.
    #[error("HTTP response error {status} from {uri}")]
    Status { uri: String, status: u16 },
    /// The payload could not be decoded into the expected document.
    #[error("could not decode {uri}: {reason}")]
    Decode { uri: String, reason: String },
    /// The search term is not a valid pattern.
    #[error("invalid search pattern {pattern:?}: {reason}")]
    Pattern { pattern: String, reason: String },
    /// No matcher is registered for the feed's type.
    #[error("no matcher registered for feed type {kind:?}")]
    UnsupportedType { kind: String },
    /// The search did not finish within the per-feed deadline.
    #[error("search of feed {feed:?} timed out after {after:?}")]
    Timeout { feed: String, after: Duration },
}

/// Coarse classification of a [`SearchError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Configuration,
    Transport,
    Decode,
    Pattern,
    UnsupportedType,
    Timeout,
}

impl SearchError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SearchError::Configuration { .. } => ErrorKind::Configuration,
            SearchError::Transport { .. } | SearchError::Status { .. } => ErrorKind::Transport,
            SearchError::Decode { .. } => ErrorKind::Decode,
            SearchError::Pattern { .. } => ErrorKind::Pattern,
            SearchError::UnsupportedType { .. } => ErrorKind::UnsupportedType,
            SearchError::Timeout { .. } => ErrorKind::Timeout,
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::Configuration => write!(f, "configuration"),
            ErrorKind::Transport => write!(f, "transport"),
            ErrorKind::Decode => write!(f, "decode"),
            ErrorKind::Pattern => write!(f, "pattern"),
            ErrorKind::UnsupportedType => write!(f, "unsupported-type"),
            ErrorKind::Timeout => write!(f, "timeout"),
        }
    }
}

/// Errors raised while obtaining the feed list.
#[derive(Debug, Error)]
pub enum FeedListError {
    #[error("could not read feed list {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("feed list is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    /// An entry parsed but is missing a required value.
    #[error("feed list entry {index} is invalid: {reason}")]
    Invalid { index: usize, reason: String },
}

/// Errors raised by the aggregating consumer.
#[derive(Debug, Error)]
pub enum DisplayError {
    #[error("failed to render result: {0}")]
    Sink(#[from] io::Error),
}
