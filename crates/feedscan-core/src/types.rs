//! Core types for feedscan-core.
//!
//! This module defines the two values that flow through the search pipeline:
//! the [`FeedDescriptor`] a caller supplies, and the [`SearchResult`] a
//! matcher produces for every field that matched the search term.

use serde::Deserialize;

/// One searchable source: a typed, named location.
///
/// Descriptors are read-only to the search pipeline. The `kind` selects the
/// matcher from the [`Registry`](crate::registry::Registry); `uri` is opaque to
/// everything except that matcher.
///
/// The feed-list JSON uses `type` for the kind and accepts `site` / `link` as
/// aliases for `name` / `uri`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
pub struct FeedDescriptor {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(alias = "site")]
    pub name: String,
    #[serde(alias = "link", default)]
    pub uri: String,
}

impl FeedDescriptor {
    pub fn new(kind: impl Into<String>, name: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            name: name.into(),
            uri: uri.into(),
        }
    }
}

impl std::fmt::Display for FeedDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{} ({})", self.kind, self.name, self.uri)
    }
}

/// A single match found in a feed.
///
/// `field` names the part of the source document that matched (the RSS
/// matcher uses `"Title"` and `"Description"`), and `content` is the full text
/// of that field. `feed` is the [`FeedDescriptor::name`] of the feed that was
/// searched.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SearchResult {
    pub feed: String,
    pub field: String,
    pub content: String,
}

impl SearchResult {
    pub fn new(
        feed: impl Into<String>,
        field: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            feed: feed.into(),
            field: field.into(),
            content: content.into(),
        }
    }
}
