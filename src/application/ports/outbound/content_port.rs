//! Content store port - Interface for querying the headless CMS
//!
//! Repositories depend on this trait, not on the HTTP client, so the
//! resolution logic can be exercised against canned documents.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::Serialize;

/// Whether a query may be served from the CDN cache
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CacheMode {
    /// Cached, eventually consistent edge responses
    Cdn,
    /// Always hit the live API ("no-store")
    NoStore,
}

/// Per-call overrides
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchOptions {
    /// `None` falls back to the client's configured mode
    pub cache: Option<CacheMode>,
}

impl FetchOptions {
    pub fn no_store() -> Self {
        Self {
            cache: Some(CacheMode::NoStore),
        }
    }
}

/// Named query parameters, bound as `$name` in the query text
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryParams(BTreeMap<String, serde_json::Value>);

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.0.insert(name.into(), value.into());
        self
    }

    #[cfg(test)]
    pub fn get(&self, name: &str) -> Option<&serde_json::Value> {
        self.0.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &serde_json::Value)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// A content query failed
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("content request failed: {0}")]
    Transport(String),
    #[error("content request timed out")]
    Timeout,
    #[error("content API returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("could not decode content response: {0}")]
    Decode(String),
    #[error("invalid {kind} document '{id}': {reason}")]
    InvalidDocument {
        kind: &'static str,
        id: String,
        reason: String,
    },
}

/// Port for running queries against the content store
#[async_trait]
pub trait ContentQueryPort: Send + Sync {
    /// Run a query and return the `result` payload (JSON `null` when empty)
    async fn query(
        &self,
        query: &str,
        params: &QueryParams,
        options: FetchOptions,
    ) -> Result<serde_json::Value, FetchError>;
}
