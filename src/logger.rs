use crate::error::IndexError;
use crate::handler::ProcessingHandler;
use crate::level::Level;
use crate::record::{FieldValue, LogRecord};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Named logging channel holding a stack of [`ProcessingHandler`]s.
///
/// The logger owns the pipeline semantics: a handler only sees records at
/// or above its level, and a handler with bubbling disabled stops the
/// record from reaching the handlers below it. Handlers pushed last run
/// first.
#[derive(Clone)]
pub struct Logger {
    name: String,
    handlers: Vec<Arc<dyn ProcessingHandler>>,
}

impl Logger {
    pub fn new(name: impl Into<String>) -> Self {
        Logger {
            name: name.into(),
            handlers: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Put a handler on top of the stack.
    pub fn push_handler(&mut self, handler: Arc<dyn ProcessingHandler>) {
        self.handlers.insert(0, handler);
    }

    pub fn with_handler(mut self, handler: Arc<dyn ProcessingHandler>) -> Self {
        self.push_handler(handler);
        self
    }

    pub fn handlers_len(&self) -> usize {
        self.handlers.len()
    }

    /// Whether any handler would accept a record at `level`.
    pub fn is_handling(&self, level: Level) -> bool {
        self.handlers.iter().any(|h| h.is_handling(level))
    }

    /// Run `record` through the handler stack.
    ///
    /// **Returns**
    /// - `Ok(true)` if at least one handler wrote the record.
    /// - `Ok(false)` if no handler accepted it.
    /// - `Err(..)` with the first handler failure; handlers below the
    ///   failing one are not called.
    ///
    /// Levels are compared by numeric code, so a code between two known
    /// levels (e.g. `450`) still reaches an `Error` handler. Records without
    /// a numeric `level` are treated as `Debug`.
    pub async fn handle(&self, record: LogRecord) -> Result<bool, IndexError> {
        let code = record
            .level_code()
            .unwrap_or_else(|| u64::from(Level::Debug.code()));
        let mut handled = false;

        for handler in &self.handlers {
            if code < u64::from(handler.level().code()) {
                continue;
            }
            handler.write(record.clone()).await?;
            handled = true;
            if !handler.bubble() {
                break;
            }
        }

        Ok(handled)
    }

    /// Build a record on this channel and run it through the pipeline.
    pub async fn log(
        &self,
        level: Level,
        message: impl Into<String>,
        context: BTreeMap<String, FieldValue>,
    ) -> Result<bool, IndexError> {
        if !self.is_handling(level) {
            return Ok(false);
        }
        let record = LogRecord::new(self.name.as_str(), level, message).with_context(context);
        self.handle(record).await
    }

    pub async fn debug(&self, message: impl Into<String>) -> Result<bool, IndexError> {
        self.log(Level::Debug, message, BTreeMap::new()).await
    }

    pub async fn info(&self, message: impl Into<String>) -> Result<bool, IndexError> {
        self.log(Level::Info, message, BTreeMap::new()).await
    }

    pub async fn notice(&self, message: impl Into<String>) -> Result<bool, IndexError> {
        self.log(Level::Notice, message, BTreeMap::new()).await
    }

    pub async fn warning(&self, message: impl Into<String>) -> Result<bool, IndexError> {
        self.log(Level::Warning, message, BTreeMap::new()).await
    }

    pub async fn error(&self, message: impl Into<String>) -> Result<bool, IndexError> {
        self.log(Level::Error, message, BTreeMap::new()).await
    }

    pub async fn critical(&self, message: impl Into<String>) -> Result<bool, IndexError> {
        self.log(Level::Critical, message, BTreeMap::new()).await
    }

    pub async fn alert(&self, message: impl Into<String>) -> Result<bool, IndexError> {
        self.log(Level::Alert, message, BTreeMap::new()).await
    }

    pub async fn emergency(&self, message: impl Into<String>) -> Result<bool, IndexError> {
        self.log(Level::Emergency, message, BTreeMap::new()).await
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name)
            .field("handlers", &self.handlers.len())
            .finish()
    }
}
