use crate::document::{Document, TIMESTAMP_FIELD};
use crate::record::{to_w3c, FieldValue, LogRecord, DATETIME_FIELD};

/// Turns a [`LogRecord`] into a [`Document`] ready for the index API.
///
/// The only transformation is the creation time: a `datetime` field that
/// holds a date/time value is removed and re-emitted as a W3C string under
/// `@timestamp`. Every other field, and a `datetime` of any other type, is
/// passed through untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentFormatter;

impl DocumentFormatter {
    pub fn new() -> Self {
        DocumentFormatter
    }

    pub fn format(&self, record: LogRecord) -> Document {
        let mut fields = record.fields;

        let stamp = fields
            .get(DATETIME_FIELD)
            .and_then(FieldValue::as_datetime)
            .map(to_w3c);
        if let Some(stamp) = stamp {
            fields.remove(DATETIME_FIELD);
            fields.insert(TIMESTAMP_FIELD.to_string(), FieldValue::Str(stamp));
        }

        Document { fields }
    }
}
