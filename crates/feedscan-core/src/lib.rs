//! feedscan-core: concurrent feed search core.
//!
//! This crate holds everything that is independent of any particular feed
//! format: the [`Matcher`] capability, the [`Registry`] that maps feed types
//! to matchers, the fan-out/fan-in coordinator in [`search`], and the
//! aggregating consumer in [`display`].
//!
//! # Architecture
//!
//! ```text
//! feed list ──► search::run ──► per-feed tasks ──► mpsc ──► display ──► sink
//!                   │                                          │
//!               Registry                               SearchSummary
//! ```
//!
//! Concrete matchers live in `feedscan-feeds` and register themselves into a
//! [`Registry`] at startup.

pub mod config;
pub mod display;
pub mod error;
pub mod feed_list;
pub mod matcher;
pub mod registry;
pub mod search;
pub mod types;

pub use display::{collect, display, ResultSink, WriterSink};
pub use error::{DisplayError, ErrorKind, FeedListError, SearchError};
pub use matcher::{Matcher, UnsupportedMatcher};
pub use registry::Registry;
pub use search::{FeedOutcome, FeedReport, ResultStream, SearchOptions, SearchSummary};
pub use types::{FeedDescriptor, SearchResult};
