//! Registry: maps a feed type tag to the [`Matcher`] that searches it.
//!
//! A registry is populated during startup and then shared read-only with the
//! coordinator behind an `Arc`. Registering needs `&mut self`, so once a
//! registry has been handed to [`search::run`](crate::search::run) it cannot
//! change.
//!
//! Registering the same type twice replaces the earlier matcher (last write
//! wins) and logs a warning. The displaced matcher is returned to the caller.

use std::collections::HashMap;
use std::sync::Arc;

use crate::matcher::{Matcher, UnsupportedMatcher};

pub struct Registry {
    matchers: HashMap<String, Arc<dyn Matcher>>,
    fallback: Arc<dyn Matcher>,
}

impl Registry {
    /// An empty registry whose fallback is [`UnsupportedMatcher`].
    pub fn new() -> Self {
        Self::with_fallback(Arc::new(UnsupportedMatcher))
    }

    /// An empty registry that resolves unknown types to `fallback`.
    pub fn with_fallback(fallback: Arc<dyn Matcher>) -> Self {
        Self {
            matchers: HashMap::new(),
            fallback,
        }
    }

    /// Register `matcher` for feeds whose type is `kind`.
    ///
    /// Returns the matcher previously registered for `kind`, if any.
    pub fn register(
        &mut self,
        kind: impl Into<String>,
        matcher: Arc<dyn Matcher>,
    ) -> Option<Arc<dyn Matcher>> {
        let kind = kind.into();
        tracing::debug!(kind = %kind, "registering matcher");
        let previous = self.matchers.insert(kind.clone(), matcher);
        if previous.is_some() {
            tracing::warn!(kind = %kind, "matcher already registered; replacing it");
        }
        previous
    }

    /// Builder form of [`register`](Self::register).
    pub fn with_matcher(mut self, kind: impl Into<String>, matcher: Arc<dyn Matcher>) -> Self {
        self.register(kind, matcher);
        self
    }

    /// Resolve the matcher for `kind`, falling back when it is unregistered.
    pub fn lookup(&self, kind: &str) -> Arc<dyn Matcher> {
        match self.matchers.get(kind) {
            Some(matcher) => Arc::clone(matcher),
            None => {
                tracing::debug!(kind, "no matcher registered; using fallback");
                Arc::clone(&self.fallback)
            }
        }
    }

    pub fn contains(&self, kind: &str) -> bool {
        self.matchers.contains_key(kind)
    }

    /// Registered type tags, sorted.
    pub fn kinds(&self) -> Vec<&str> {
        let mut kinds: Vec<&str> = self.matchers.keys().map(String::as_str).collect();
        kinds.sort_unstable();
        kinds
    }

    pub fn len(&self) -> usize {
        self.matchers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("kinds", &self.kinds())
            .finish_non_exhaustive()
    }
}
