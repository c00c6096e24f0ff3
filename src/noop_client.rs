use crate::client::{IndexAck, IndexClient};
use crate::document::{Document, IndexTarget};
use crate::error::IndexError;
use async_trait::async_trait;

/// A client that acknowledges every document without any I/O.
///
/// Useful for measuring the overhead of the pipeline itself, and for
/// wiring a logger in environments with no index backend.
#[derive(Clone, Default)]
pub struct NoopClient;

#[async_trait]
impl IndexClient for NoopClient {
    async fn index(&self, target: &IndexTarget, _document: &Document) -> Result<IndexAck, IndexError> {
        Ok(IndexAck {
            index: Some(target.index.clone()),
            id: None,
            result: Some("noop".to_string()),
        })
    }
}
