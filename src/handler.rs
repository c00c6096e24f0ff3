use crate::client::IndexClient;
use crate::document::IndexTarget;
use crate::error::IndexError;
use crate::formatter::DocumentFormatter;
use crate::level::Level;
use crate::record::LogRecord;
use async_trait::async_trait;

/// A pipeline stage that processes records accepted by the [`Logger`].
///
/// The handler only reports its minimum level and bubble flag; the
/// [`Logger`] applies both before and after calling [`write`].
///
/// [`Logger`]: crate::logger::Logger
/// [`write`]: ProcessingHandler::write
#[async_trait]
pub trait ProcessingHandler: Send + Sync {
    /// Lowest level this handler accepts.
    fn level(&self) -> Level;

    /// Whether records continue to the next handler after this one.
    fn bubble(&self) -> bool;

    fn is_handling(&self, level: Level) -> bool {
        level >= self.level()
    }

    /// Process a record that already passed the level check.
    async fn write(&self, record: LogRecord) -> Result<(), IndexError>;
}

/// Handler that ships every accepted record to an index as one document.
///
/// Failures from the client are returned as-is: no retry, no buffering
/// and no suppression. Whether a delivery error is fatal is up to the
/// caller of the pipeline.
pub struct SinkHandler<C> {
    client: C,
    index: String,
    level: Level,
    bubble: bool,
    formatter: DocumentFormatter,
}

impl<C: IndexClient> SinkHandler<C> {
    /// Create a handler with the default level (`Info`) and bubbling on.
    pub fn new(client: C, index: impl Into<String>) -> Self {
        Self::with_options(client, index, Level::default(), true)
    }

    pub fn with_options(client: C, index: impl Into<String>, level: Level, bubble: bool) -> Self {
        SinkHandler {
            client,
            index: index.into(),
            level,
            bubble,
            formatter: DocumentFormatter::new(),
        }
    }
}

#[async_trait]
impl<C: IndexClient> ProcessingHandler for SinkHandler<C> {
    fn level(&self) -> Level {
        self.level
    }

    fn bubble(&self) -> bool {
        self.bubble
    }

    async fn write(&self, record: LogRecord) -> Result<(), IndexError> {
        let target = IndexTarget::new(self.index.as_str());
        let document = self.formatter.format(record);
        let ack = self.client.index(&target, &document).await?;
        tracing::trace!(index = %target.index, id = ?ack.id, "log record indexed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::DOCUMENT_TYPE;
    use crate::record::{FieldValue, DATETIME_FIELD};
    use crate::test_support::RecordingClient;
    use chrono::DateTime;
    use serde_json::json;
    use std::sync::Arc;

    #[tokio::test]
    async fn write_indexes_formatted_record_once() {
        let client = Arc::new(RecordingClient::default());
        let handler = SinkHandler::new(Arc::clone(&client), "app-logs");

        let dt = DateTime::parse_from_rfc3339("2024-01-15T10:30:00Z").unwrap();
        let record = LogRecord::default()
            .with_field("message", "x")
            .with_field("level", 200u64)
            .with_field(DATETIME_FIELD, dt);

        handler.write(record).await.unwrap();

        let calls = client.calls();
        assert_eq!(calls.len(), 1);
        let (target, document) = &calls[0];
        assert_eq!(target.index, "app-logs");
        assert_eq!(target.doc_type, DOCUMENT_TYPE);
        assert_eq!(
            serde_json::to_value(document).unwrap(),
            json!({"message": "x", "level": 200, "@timestamp": "2024-01-15T10:30:00+00:00"})
        );
    }

    #[tokio::test]
    async fn record_without_datetime_is_sent_unchanged() {
        let client = Arc::new(RecordingClient::default());
        let handler = SinkHandler::new(Arc::clone(&client), "app-logs");
        let record = LogRecord::default()
            .with_field("message", "x")
            .with_field("level", 200u64);

        handler.write(record.clone()).await.unwrap();

        assert_eq!(client.calls()[0].1.fields, record.fields);
    }

    #[tokio::test]
    async fn client_failure_propagates_without_retry() {
        let client = Arc::new(RecordingClient::failing(503));
        let handler = SinkHandler::new(Arc::clone(&client), "app-logs");

        let err = handler
            .write(LogRecord::default().with_field("message", FieldValue::from("x")))
            .await
            .unwrap_err();

        assert!(matches!(err, IndexError::Rejected { status: 503, .. }));
        assert_eq!(client.calls().len(), 1);
    }

    #[test]
    fn defaults_to_info_and_bubbling() {
        let handler = SinkHandler::new(RecordingClient::default(), "app-logs");
        assert_eq!(handler.level(), Level::Info);
        assert!(handler.bubble());
        assert!(!handler.is_handling(Level::Debug));
        assert!(handler.is_handling(Level::Info));
        assert!(handler.is_handling(Level::Emergency));
    }
}
