//! Explicit logging context.
//!
//! A `Context` is passed down the call chain by the caller and handed to every
//! logging call. It carries the tags that end up on each message and,
//! for HTTP services, the metadata of the request being served.
//!
//! # Design Decisions
//! - Immutable: every `with_*` method returns a new context and leaves the
//!   receiver untouched
//! - Cheap to clone (shared `Arc` storage), so it can be stored in request
//!   extensions and copied into spawned tasks

use std::sync::Arc;

use crate::http::RequestMetadata;
use crate::message::Tags;

/// Carrier of request-scoped logging data.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Context {
    tags: Arc<Tags>,
    request: Option<Arc<RequestMetadata>>,
}

impl Context {
    /// An empty context: no tags, no request metadata.
    pub fn background() -> Self {
        Self::default()
    }

    /// Return a copy of this context with `tags` added. Keys already present
    /// are overwritten by the new values.
    pub fn with_tags<I, K, V>(&self, tags: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut merged = Tags::clone(&self.tags);
        merged.extend(tags.into_iter().map(|(k, v)| (k.into(), v.into())));
        Self {
            tags: Arc::new(merged),
            request: self.request.clone(),
        }
    }

    /// Return a copy of this context with a single tag added.
    pub fn with_tag(&self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.with_tags([(key.into(), value.into())])
    }

    /// Return a copy of this context with `metadata` attached, replacing any
    /// metadata already present.
    pub fn with_request_metadata(&self, metadata: RequestMetadata) -> Self {
        Self {
            tags: Arc::clone(&self.tags),
            request: Some(Arc::new(metadata)),
        }
    }

    /// The tags attached to this context. Empty if none were set.
    pub fn tags(&self) -> Tags {
        Tags::clone(&self.tags)
    }

    /// The request metadata attached to this context, if any.
    pub fn request_metadata(&self) -> Option<&RequestMetadata> {
        self.request.as_deref()
    }
}
