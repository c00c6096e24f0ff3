use crate::level::Level;
use crate::logger::Logger;
use crate::record::{FieldValue, LogRecord};
use std::collections::BTreeMap;
use std::sync::{Arc, atomic::{AtomicU64, Ordering}};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::instrument::WithSubscriber;
use tracing::subscriber::NoSubscriber;
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::registry::LookupSpan;

/// Events emitted by this crate are never forwarded, so a failing index
/// call cannot feed back into the pipeline.
const OWN_TARGET: &str = env!("CARGO_CRATE_NAME");

/// Targets of the HTTP stack under the index client. Their connection
/// tasks are spawned outside the logger task and report to the global
/// subscriber, so they are dropped by target as well.
const TRANSPORT_TARGETS: &[&str] = &["hyper", "reqwest", "h2", "rustls", "want", "mio", "tokio_util"];

fn is_internal(target: &str) -> bool {
    target.starts_with(OWN_TARGET)
        || TRANSPORT_TARGETS.iter().any(|t| {
            target
                .strip_prefix(t)
                .map_or(false, |rest| rest.is_empty() || rest.starts_with("::"))
        })
}

/// `tracing_subscriber` layer that turns events into [`LogRecord`]s and
/// hands them to a [`Logger`] running on a background task.
///
/// Each record is offered to the logger exactly once. Level filtering and
/// bubbling are the logger's business; delivery errors are reported on
/// stderr because a `tracing` event has no caller to return them to.
pub struct SinkLayer {
    channel: String,
    sender: mpsc::Sender<LogRecord>,
    /// Total events seen by the layer.
    pub total_events: Arc<AtomicU64>,
    /// Records the logger failed to deliver.
    pub failed_events: Arc<AtomicU64>,
    /// Dropped because the channel was full.
    pub dropped_events: Arc<AtomicU64>,
}

impl SinkLayer {
    /// Create a new layer and spawn a background task that pulls records
    /// from a bounded channel and runs them through `logger`.
    ///
    /// `buffer` is clamped to at least 16 entries. Must be called from
    /// within a Tokio runtime.
    pub fn new(logger: Arc<Logger>, buffer: usize) -> (Self, JoinHandle<()>) {
        let buffer = buffer.max(16);
        let (tx, mut rx) = mpsc::channel::<LogRecord>(buffer);

        let total_events = Arc::new(AtomicU64::new(0));
        let failed_events = Arc::new(AtomicU64::new(0));
        let dropped_events = Arc::new(AtomicU64::new(0));

        let failed_events_bg = Arc::clone(&failed_events);
        let channel = logger.name().to_string();

        let handle = tokio::spawn(async move {
            while let Some(record) = rx.recv().await {
                // Events raised while shipping a record must not become records.
                let shipped = logger.handle(record).with_subscriber(NoSubscriber::default()).await;
                if let Err(e) = shipped {
                    failed_events_bg.fetch_add(1, Ordering::Relaxed);
                    eprintln!("error shipping log record: {}", e);
                }
            }
        });

        (
            Self {
                channel,
                sender: tx,
                total_events,
                failed_events,
                dropped_events,
            },
            handle,
        )
    }

    fn to_record(&self, event: &Event<'_>) -> LogRecord {
        let mut context = BTreeMap::new();
        let mut message: Option<String> = None;

        let mut visitor = FieldVisitor { fields: &mut context, message: &mut message };
        event.record(&mut visitor);

        let meta = event.metadata();
        let mut extra = BTreeMap::new();
        extra.insert("target".to_string(), FieldValue::from(meta.target()));
        extra.insert("module_path".to_string(), FieldValue::from(meta.module_path()));
        extra.insert("file".to_string(), FieldValue::from(meta.file()));
        extra.insert("line".to_string(), FieldValue::from(meta.line()));

        LogRecord::new(
            self.channel.as_str(),
            Level::from(*meta.level()),
            message.unwrap_or_default(),
        )
        .with_context(context)
        .with_field("extra", extra)
    }
}

impl<S> Layer<S> for SinkLayer
where
    S: Subscriber + for<'span> LookupSpan<'span>,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if is_internal(event.metadata().target()) {
            return;
        }
        self.total_events.fetch_add(1, Ordering::Relaxed);

        let record = self.to_record(event);
        if let Err(_e) = self.sender.try_send(record) {
            self.dropped_events.fetch_add(1, Ordering::Relaxed);
            eprintln!("log channel full, dropping log record");
        }
    }
}

use tracing::field::{Field, Visit};

pub struct FieldVisitor<'a> {
    pub fields: &'a mut BTreeMap<String, FieldValue>,
    pub message: &'a mut Option<String>,
}

impl<'a> Visit for FieldVisitor<'a> {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            *self.message = Some(value.to_string());
        } else {
            self.fields.insert(field.name().to_string(), FieldValue::from(value));
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.fields.insert(field.name().to_string(), FieldValue::from(value));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.fields.insert(field.name().to_string(), FieldValue::from(value));
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.fields.insert(field.name().to_string(), FieldValue::from(value));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.fields.insert(field.name().to_string(), FieldValue::from(value));
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            *self.message = Some(format!("{:?}", value));
        } else {
            self.fields.insert(field.name().to_string(), FieldValue::Str(format!("{:?}", value)));
        }
    }
}
