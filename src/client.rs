use crate::document::{Document, IndexTarget};
use crate::error::IndexError;
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;

/// Acknowledgement returned by the index API for one document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct IndexAck {
    #[serde(rename = "_index", default)]
    pub index: Option<String>,
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    #[serde(default)]
    pub result: Option<String>,
}

/// Destination for formatted [`Document`]s.
///
/// Implementations own transport concerns (connection reuse, auth,
/// timeouts). A single call indexes a single document; callers never
/// retry.
#[async_trait]
pub trait IndexClient: Send + Sync {
    /// Store `document` under `target`.
    ///
    /// **Returns**
    /// - `Ok(ack)` once the backend accepted the document.
    /// - `Err(..)` on network failure or backend rejection.
    async fn index(&self, target: &IndexTarget, document: &Document) -> Result<IndexAck, IndexError>;
}

#[async_trait]
impl<C: IndexClient + ?Sized> IndexClient for Arc<C> {
    async fn index(&self, target: &IndexTarget, document: &Document) -> Result<IndexAck, IndexError> {
        (**self).index(target, document).await
    }
}
