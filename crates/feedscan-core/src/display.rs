//! Display: drains a [`ResultStream`] and renders each result.
//!
//! The consumer loop has no notion of how many feeds are in flight; it reads
//! until the stream reports closure, then hands back the search summary.

use std::io::Write;

use crate::error::DisplayError;
use crate::search::{ResultStream, SearchSummary};
use crate::types::SearchResult;

/// Destination for rendered results.
pub trait ResultSink {
    fn render(&mut self, result: &SearchResult) -> std::io::Result<()>;
}

/// Renders results as text:
///
/// ```text
/// Title:
/// President signs budget
///
/// ```
///
/// With `show_feed` set each block is prefixed by `[feed] `.
pub struct WriterSink<W> {
    out: W,
    show_feed: bool,
}

impl<W: Write> WriterSink<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            show_feed: false,
        }
    }

    pub fn show_feed(mut self, show: bool) -> Self {
        self.show_feed = show;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ResultSink for WriterSink<W> {
    fn render(&mut self, result: &SearchResult) -> std::io::Result<()> {
        if self.show_feed {
            write!(self.out, "[{}] ", result.feed)?;
        }
        write!(self.out, "{}:\n{}\n\n", result.field, result.content)?;
        self.out.flush()
    }
}

/// Collects results in memory.
impl ResultSink for Vec<SearchResult> {
    fn render(&mut self, result: &SearchResult) -> std::io::Result<()> {
        self.push(result.clone());
        Ok(())
    }
}

/// Render every result from `stream` into `sink` until the stream closes.
///
/// If the sink fails, the remaining search is cancelled and the error is
/// returned once every feed task has stopped.
pub async fn display<S: ResultSink + ?Sized>(
    mut stream: ResultStream,
    sink: &mut S,
) -> Result<SearchSummary, DisplayError> {
    while let Some(result) = stream.next().await {
        if let Err(err) = sink.render(&result) {
            tracing::error!(error = %err, "output sink failed; cancelling search");
            stream.cancel();
            stream.finish().await;
            return Err(err.into());
        }
    }
    Ok(stream.finish().await)
}

/// Drain `stream` into a vector.
pub async fn collect(stream: ResultStream) -> (Vec<SearchResult>, SearchSummary) {
    let mut results = Vec::new();
    match display(stream, &mut results).await {
        Ok(summary) => (results, summary),
        // Pushing onto a Vec cannot fail.
        Err(_) => (results, SearchSummary::default()),
    }
}
