//! Shared test utilities for feedscan integration harnesses.
//!
//! Import everything you need via `mod common; use common::*;` at the top of
//! each harness file. Network-facing helpers bind to 127.0.0.1 on a random
//! port so harnesses can run in parallel.

pub mod assertions;
pub mod fake_rss_server;
pub mod fixtures;

pub use assertions::*;
pub use builders::*;
pub use fake_rss_server::FakeRssServer;
pub use fixtures::*;
