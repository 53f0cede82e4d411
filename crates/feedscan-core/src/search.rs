//! Search coordinator: fans one search out per feed and fans the results
//! back in on a single channel.
//!
//! ```text
//!            ┌─► task(feed 0) ─┐
//! run() ─────┼─► task(feed 1) ─┼──► mpsc ──► ResultStream::next()
//!            └─► task(feed N) ─┘
//!                     │
//!                JoinSet ──► supervisor ──► SearchSummary
//! ```
//!
//! Every per-feed task owns one clone of the channel sender and `run` keeps
//! none, so the channel closes exactly when the last task ends, whether it
//! returned, failed, timed out or panicked. Consumers treat `None` from
//! [`ResultStream::next`] as the end of the search.
//!
//! Per-feed failures never leave their task: they are logged and recorded in
//! the [`SearchSummary`].

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, OwnedSemaphorePermit, Semaphore};
use tokio::task::{JoinHandle, JoinSet};
use tokio_util::sync::{CancellationToken, DropGuard};

use crate::error::SearchError;
use crate::matcher::Matcher;
use crate::registry::Registry;
use crate::types::{FeedDescriptor, SearchResult};

/// Tuning knobs for one call to [`run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOptions {
    /// Deadline for a single feed's search. `None` waits forever.
    pub feed_timeout: Option<Duration>,
    /// Capacity of the result channel. Clamped to `1..=Semaphore::MAX_PERMITS`.
    pub channel_capacity: usize,
    /// Maximum number of feeds searched at once. `0` means unlimited; larger
    /// values are capped at `Semaphore::MAX_PERMITS`.
    pub max_concurrent: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            feed_timeout: Some(Duration::from_secs(30)),
            channel_capacity: 64,
            max_concurrent: 0,
        }
    }
}

/// How one feed's search ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedOutcome {
    /// The search succeeded; this many results were delivered.
    Matched(usize),
    /// The matcher reported an error (or the deadline passed).
    Failed(SearchError),
    /// The search was cancelled before it finished.
    Cancelled,
    /// The task panicked.
    Panicked(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedReport {
    pub feed: String,
    pub kind: String,
    pub outcome: FeedOutcome,
}

/// Per-feed outcomes of a finished search, in completion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchSummary {
    pub reports: Vec<FeedReport>,
}

impl SearchSummary {
    pub fn total_results(&self) -> usize {
        self.reports
            .iter()
            .map(|r| match r.outcome {
                FeedOutcome::Matched(n) => n,
                _ => 0,
            })
            .sum()
    }

    /// Reports for feeds that did not complete successfully.
    pub fn failures(&self) -> impl Iterator<Item = &FeedReport> {
        self.reports
            .iter()
            .filter(|r| !matches!(r.outcome, FeedOutcome::Matched(_)))
    }

    pub fn is_clean(&self) -> bool {
        self.failures().next().is_none()
    }

    /// The report for the feed named `feed`, if it was searched.
    pub fn report(&self, feed: &str) -> Option<&FeedReport> {
        self.reports.iter().find(|r| r.feed == feed)
    }
}

/// The consumer's end of a running search.
///
/// Dropping the stream cancels any feeds still being searched.
pub struct ResultStream {
    results: mpsc::Receiver<SearchResult>,
    supervisor: JoinHandle<SearchSummary>,
    cancel: CancellationToken,
    _guard: DropGuard,
}

impl ResultStream {
    /// Receive the next result. Returns `None` once every feed has finished.
    pub async fn next(&mut self) -> Option<SearchResult> {
        self.results.recv().await
    }

    /// Cancel every feed still being searched. Results already queued can
    /// still be received.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Stop receiving, wait for every feed task, and return the summary.
    ///
    /// Results not yet received are discarded.
    pub async fn finish(mut self) -> SearchSummary {
        self.results.close();
        while self.results.recv().await.is_some() {}

        match (&mut self.supervisor).await {
            Ok(summary) => summary,
            Err(err) => {
                tracing::error!(error = %err, "search supervisor failed");
                SearchSummary::default()
            }
        }
    }
}

/// Search every feed in `feeds` for `term` concurrently.
///
/// Each feed's type is resolved through `registry`; unknown types use the
/// registry's fallback. Must be called from within a tokio runtime.
pub fn run(
    registry: Arc<Registry>,
    feeds: impl IntoIterator<Item = FeedDescriptor>,
    term: &str,
    options: SearchOptions,
) -> ResultStream {
    let capacity = options.channel_capacity.clamp(1, Semaphore::MAX_PERMITS);
    let (tx, results) = mpsc::channel(capacity);
    let cancel = CancellationToken::new();
    let permits = (options.max_concurrent > 0)
        .then(|| Arc::new(Semaphore::new(options.max_concurrent.min(Semaphore::MAX_PERMITS))));
    let term: Arc<str> = Arc::from(term);

    let mut tasks = JoinSet::new();
    let mut launched = HashMap::new();

    for feed in feeds {
        let matcher = registry.lookup(&feed.kind);
        let labels = (feed.name.clone(), feed.kind.clone());
        let job = FeedJob {
            feed,
            term: Arc::clone(&term),
            tx: tx.clone(),
            cancel: cancel.clone(),
            deadline: options.feed_timeout,
            permits: permits.clone(),
        };
        let handle = tasks.spawn(job.run(matcher));
        launched.insert(handle.id(), labels);
    }
    // The per-feed tasks now hold the only senders.
    drop(tx);

    tracing::debug!(feeds = launched.len(), term = %term, "search dispatched");
    let supervisor = tokio::spawn(supervise(tasks, launched));

    ResultStream {
        results,
        supervisor,
        _guard: cancel.clone().drop_guard(),
        cancel,
    }
}

/// Wait for every feed task and collect their reports.
async fn supervise(
    mut tasks: JoinSet<FeedReport>,
    mut launched: HashMap<tokio::task::Id, (String, String)>,
) -> SearchSummary {
    let mut reports = Vec::with_capacity(launched.len());

    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(report) => reports.push(report),
            Err(err) => {
                let (feed, kind) = launched.remove(&err.id()).unwrap_or_default();
                let outcome = if err.is_panic() {
                    tracing::error!(feed = %feed, kind = %kind, error = %err, "feed search panicked");
                    FeedOutcome::Panicked(err.to_string())
                } else {
                    FeedOutcome::Cancelled
                };
                reports.push(FeedReport {
                    feed,
                    kind,
                    outcome,
                });
            }
        }
    }

    let summary = SearchSummary { reports };
    tracing::info!(
        feeds = summary.reports.len(),
        results = summary.total_results(),
        failed = summary.failures().count(),
        "search complete"
    );
    summary
}

/// Everything one feed task needs.
struct FeedJob {
    feed: FeedDescriptor,
    term: Arc<str>,
    tx: mpsc::Sender<SearchResult>,
    cancel: CancellationToken,
    deadline: Option<Duration>,
    permits: Option<Arc<Semaphore>>,
}

impl FeedJob {
    async fn run(self, matcher: Arc<dyn Matcher>) -> FeedReport {
        let outcome = self.search(matcher.as_ref()).await;
        FeedReport {
            feed: self.feed.name,
            kind: self.feed.kind,
            outcome,
        }
    }

    async fn search(&self, matcher: &dyn Matcher) -> FeedOutcome {
        let Some(_permit) = self.acquire().await else {
            return FeedOutcome::Cancelled;
        };

        tracing::info!(
            kind = %self.feed.kind,
            feed = %self.feed.name,
            uri = %self.feed.uri,
            "searching feed"
        );

        let searched = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => None,
            searched = self.search_with_deadline(matcher) => Some(searched),
        };

        match searched {
            None => {
                tracing::debug!(feed = %self.feed.name, "feed search cancelled");
                FeedOutcome::Cancelled
            }
            Some(Err(err)) => {
                tracing::warn!(
                    feed = %self.feed.name,
                    kind = %err.kind(),
                    error = %err,
                    "feed search failed"
                );
                FeedOutcome::Failed(err)
            }
            Some(Ok(results)) => self.deliver(results).await,
        }
    }

    /// Wait for a concurrency permit. `Some(None)` when there is no limit,
    /// `None` when cancelled while waiting.
    async fn acquire(&self) -> Option<Option<OwnedSemaphorePermit>> {
        let Some(permits) = &self.permits else {
            return Some(None);
        };
        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => None,
            permit = Arc::clone(permits).acquire_owned() => Some(permit.ok()),
        }
    }

    async fn search_with_deadline(
        &self,
        matcher: &dyn Matcher,
    ) -> Result<Vec<SearchResult>, SearchError> {
        let search = matcher.search(&self.feed, &self.term);
        match self.deadline {
            Some(after) => tokio::time::timeout(after, search)
                .await
                .unwrap_or_else(|_| {
                    Err(SearchError::Timeout {
                        feed: self.feed.name.clone(),
                        after,
                    })
                }),
            None => search.await,
        }
    }

    /// Push results onto the shared channel in order.
    async fn deliver(&self, results: Vec<SearchResult>) -> FeedOutcome {
        let found = results.len();
        let mut sent = 0;

        for result in results {
            tokio::select! {
                biased;
                _ = self.cancel.cancelled() => {
                    tracing::debug!(feed = %self.feed.name, sent, found, "delivery cancelled");
                    return FeedOutcome::Cancelled;
                }
                delivered = self.tx.send(result) => {
                    if delivered.is_err() {
                        tracing::debug!(feed = %self.feed.name, sent, found, "result stream dropped");
                        break;
                    }
                }
            }
            sent += 1;
        }

        tracing::debug!(feed = %self.feed.name, results = sent, "feed search finished");
        FeedOutcome::Matched(sent)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
