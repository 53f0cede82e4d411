//! Domain-specific assertion macros for feedscan harnesses.
//!
//! These add context-rich failure messages that make it clear *which* feed
//! misbehaved and *how* its search actually ended.

use feedscan::{SearchResult, SearchSummary};

// ---------------------------------------------------------------------------
// Summary assertions
// ---------------------------------------------------------------------------

/// Assert that `feed` finished successfully and delivered `n` results.
///
/// ```rust
/// assert_matched!(summary, "A", 2);
/// ```
#[macro_export]
macro_rules! assert_matched {
    ($summary:expr, $feed:expr, $n:expr) => {{
        let summary: &feedscan::SearchSummary = &$summary;
        let feed: &str = $feed;
        let expected: usize = $n;
        match summary.report(feed).map(|r| &r.outcome) {
            Some(feedscan::FeedOutcome::Matched(actual)) if *actual == expected => {}
            Some(other) => panic!(
                "assert_matched! failed for feed {:?}:\n  expected: Matched({})\n  actual:   {:?}",
                feed, expected, other
            ),
            None => panic!(
                "assert_matched! failed: feed {:?} has no report.\n  Reports: {:?}",
                feed, summary.reports
            ),
        }
    }};
}

/// Assert that `feed` failed with an error of the given [`feedscan::ErrorKind`].
///
/// ```rust
/// assert_failed!(summary, "B", ErrorKind::Transport);
/// ```
#[macro_export]
macro_rules! assert_failed {
    ($summary:expr, $feed:expr, $kind:expr) => {{
        let summary: &feedscan::SearchSummary = &$summary;
        let feed: &str = $feed;
        let expected: feedscan::ErrorKind = $kind;
        match summary.report(feed).map(|r| &r.outcome) {
            Some(feedscan::FeedOutcome::Failed(err)) if err.kind() == expected => {}
            Some(other) => panic!(
                "assert_failed! failed for feed {:?}:\n  expected: Failed({:?})\n  actual:   {:?}",
                feed, expected, other
            ),
            None => panic!(
                "assert_failed! failed: feed {:?} has no report.\n  Reports: {:?}",
                feed, summary.reports
            ),
        }
    }};
}

// ---------------------------------------------------------------------------
// Result-set helpers
// ---------------------------------------------------------------------------

/// Contents of every result from `feed`, in arrival order.
pub fn contents_from(results: &[SearchResult], feed: &str) -> Vec<String> {
    results
        .iter()
        .filter(|r| r.feed == feed)
        .map(|r| r.content.clone())
        .collect()
}

/// `(field, content)` pairs of every result, in arrival order.
pub fn field_pairs(results: &[SearchResult]) -> Vec<(String, String)> {
    results
        .iter()
        .map(|r| (r.field.clone(), r.content.clone()))
        .collect()
}

/// Assert that the summary accounts for exactly the results received.
pub fn assert_summary_consistent(summary: &SearchSummary, results: &[SearchResult]) {
    assert_eq!(
        summary.total_results(),
        results.len(),
        "summary reports {} results but {} were received",
        summary.total_results(),
        results.len()
    );
}
