//! Feed list: loads the [`FeedDescriptor`]s to search from a JSON file.
//!
//! The file is a JSON array:
//!
//! ```json
//! [
//!   { "site": "npr", "link": "http://www.npr.org/rss/rss.php?id=1001", "type": "rss" },
//!   { "name": "cnn", "uri": "http://rss.cnn.com/rss/cnn_world.rss", "type": "rss" }
//! ]
//! ```
//!
//! An entry without a location still loads; the matcher reports it when the
//! feed is searched, so one bad entry never blocks the rest of the list.

use std::path::Path;

use crate::error::FeedListError;
use crate::types::FeedDescriptor;

/// Read and parse the feed list at `path`.
pub fn load(path: &Path) -> Result<Vec<FeedDescriptor>, FeedListError> {
    let text = std::fs::read_to_string(path).map_err(|source| FeedListError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let feeds = parse(&text)?;
    tracing::debug!(path = %path.display(), feeds = feeds.len(), "loaded feed list");
    Ok(feeds)
}

/// Parse a feed list from JSON text.
pub fn parse(text: &str) -> Result<Vec<FeedDescriptor>, FeedListError> {
    let feeds: Vec<FeedDescriptor> = serde_json::from_str(text)?;

    for (index, feed) in feeds.iter().enumerate() {
        if feed.kind.trim().is_empty() {
            return Err(FeedListError::Invalid {
                index,
                reason: "empty feed type".into(),
            });
        }
        if feed.name.trim().is_empty() {
            return Err(FeedListError::Invalid {
                index,
                reason: "empty feed name".into(),
            });
        }
    }

    Ok(feeds)
}
