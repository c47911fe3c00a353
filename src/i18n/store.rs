//! Message stores: where per-locale message documents come from.
//!
//! A store only knows how to fetch the raw document for a locale code. Parsing,
//! caching and fallback are the loader's and resolver's business.

use futures::future::BoxFuture;
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Failure to fetch a messages document.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no messages document for locale '{0}'")]
    NotFound(String),

    #[error("failed to read messages for locale '{locale}': {source}")]
    Io {
        locale: String,
        #[source]
        source: io::Error,
    },
}

/// Per-locale document store collaborator.
pub trait MessageStore: Send + Sync {
    /// Fetch the raw JSON messages document for `locale`.
    fn fetch<'a>(&'a self, locale: &'a str) -> BoxFuture<'a, Result<String, StoreError>>;
}

/// Reads `{root}/{locale}/messages.json` from disk.
#[derive(Debug, Clone)]
pub struct FsMessageStore {
    root: PathBuf,
}

impl FsMessageStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the messages document for a locale.
    pub fn document_path(&self, locale: &str) -> PathBuf {
        self.root.join(locale).join("messages.json")
    }
}

impl MessageStore for FsMessageStore {
    fn fetch<'a>(&'a self, locale: &'a str) -> BoxFuture<'a, Result<String, StoreError>> {
        Box::pin(async move {
            let path = self.document_path(locale);
            match tokio::fs::read_to_string(&path).await {
                Ok(document) => Ok(document),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    Err(StoreError::NotFound(locale.to_string()))
                }
                Err(e) => Err(StoreError::Io {
                    locale: locale.to_string(),
                    source: e,
                }),
            }
        })
    }
}

/// Documents held in memory, keyed by locale code.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMessageStore {
    documents: HashMap<String, String>,
}

impl InMemoryMessageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) the document for a locale.
    pub fn with_document(mut self, locale: &str, document: impl Into<String>) -> Self {
        self.documents.insert(locale.to_string(), document.into());
        self
    }
}

impl MessageStore for InMemoryMessageStore {
    fn fetch<'a>(&'a self, locale: &'a str) -> BoxFuture<'a, Result<String, StoreError>> {
        Box::pin(async move {
            self.documents
                .get(locale)
                .cloned()
                .ok_or_else(|| StoreError::NotFound(locale.to_string()))
        })
    }
}
