use crate::level::Level;
use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

/// Field carrying the creation time of a record.
pub const DATETIME_FIELD: &str = "datetime";

/// W3C profile of ISO-8601: second precision with a numeric offset.
pub const W3C_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%:z";

/// Render a date/time in the W3C profile, e.g. `2024-01-15T10:30:00+00:00`.
pub fn to_w3c<Tz: TimeZone>(value: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    value.format(W3C_FORMAT).to_string()
}

/// Dynamically-typed value stored in a [`LogRecord`].
///
/// `DateTime` is the only variant treated as a date/time by the formatter;
/// a string that merely looks like a timestamp stays a string.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Str(String),
    #[serde(serialize_with = "serialize_w3c")]
    DateTime(DateTime<FixedOffset>),
    List(Vec<FieldValue>),
    Map(BTreeMap<String, FieldValue>),
}

fn serialize_w3c<S: Serializer>(value: &DateTime<FixedOffset>, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&to_w3c(value))
}

impl FieldValue {
    pub fn as_datetime(&self) -> Option<&DateTime<FixedOffset>> {
        match self {
            FieldValue::DateTime(dt) => Some(dt),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            FieldValue::UInt(v) => Some(*v),
            FieldValue::Int(v) => u64::try_from(*v).ok(),
            _ => None,
        }
    }
}

impl From<bool> for FieldValue {
    fn from(v: bool) -> Self {
        FieldValue::Bool(v)
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        FieldValue::Int(v)
    }
}

impl From<i32> for FieldValue {
    fn from(v: i32) -> Self {
        FieldValue::Int(i64::from(v))
    }
}

impl From<u64> for FieldValue {
    fn from(v: u64) -> Self {
        FieldValue::UInt(v)
    }
}

impl From<u32> for FieldValue {
    fn from(v: u32) -> Self {
        FieldValue::UInt(u64::from(v))
    }
}

impl From<u16> for FieldValue {
    fn from(v: u16) -> Self {
        FieldValue::UInt(u64::from(v))
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        FieldValue::Float(v)
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        FieldValue::Str(v.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        FieldValue::Str(v)
    }
}

impl From<DateTime<FixedOffset>> for FieldValue {
    fn from(v: DateTime<FixedOffset>) -> Self {
        FieldValue::DateTime(v)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(v: DateTime<Utc>) -> Self {
        FieldValue::DateTime(v.fixed_offset())
    }
}

impl From<BTreeMap<String, FieldValue>> for FieldValue {
    fn from(v: BTreeMap<String, FieldValue>) -> Self {
        FieldValue::Map(v)
    }
}

impl<T: Into<FieldValue>> From<Vec<T>> for FieldValue {
    fn from(v: Vec<T>) -> Self {
        FieldValue::List(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(FieldValue::Null, Into::into)
    }
}

impl From<serde_json::Value> for FieldValue {
    fn from(v: serde_json::Value) -> Self {
        use serde_json::Value;
        match v {
            Value::Null => FieldValue::Null,
            Value::Bool(b) => FieldValue::Bool(b),
            Value::Number(n) => {
                if let Some(u) = n.as_u64() {
                    FieldValue::UInt(u)
                } else if let Some(i) = n.as_i64() {
                    FieldValue::Int(i)
                } else {
                    FieldValue::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            Value::String(s) => FieldValue::Str(s),
            Value::Array(items) => FieldValue::List(items.into_iter().map(Into::into).collect()),
            Value::Object(map) => {
                FieldValue::Map(map.into_iter().map(|(k, v)| (k, v.into())).collect())
            }
        }
    }
}

/// A log record as produced by the logging pipeline: field name → value.
///
/// Records built with [`LogRecord::new`] carry `message`, `context`,
/// `level`, `level_name`, `channel`, `datetime` and `extra`. Any other
/// shape can be wrapped with [`LogRecord::from_fields`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct LogRecord {
    pub fields: BTreeMap<String, FieldValue>,
}

impl LogRecord {
    /// Build a record with the standard fields, stamped with the current time.
    pub fn new(channel: impl Into<String>, level: Level, message: impl Into<String>) -> Self {
        Self::at(channel, level, message, Utc::now().fixed_offset())
    }

    /// Same as [`LogRecord::new`] with an explicit creation time.
    pub fn at(
        channel: impl Into<String>,
        level: Level,
        message: impl Into<String>,
        datetime: DateTime<FixedOffset>,
    ) -> Self {
        let mut fields = BTreeMap::new();
        fields.insert("message".to_string(), FieldValue::Str(message.into()));
        fields.insert("context".to_string(), FieldValue::Map(BTreeMap::new()));
        fields.insert("level".to_string(), FieldValue::from(level.code()));
        fields.insert("level_name".to_string(), FieldValue::from(level.name()));
        fields.insert("channel".to_string(), FieldValue::Str(channel.into()));
        fields.insert(DATETIME_FIELD.to_string(), FieldValue::DateTime(datetime));
        fields.insert("extra".to_string(), FieldValue::Map(BTreeMap::new()));
        LogRecord { fields }
    }

    pub fn from_fields(fields: BTreeMap<String, FieldValue>) -> Self {
        LogRecord { fields }
    }

    /// Replace the `context` map.
    pub fn with_context(mut self, context: BTreeMap<String, FieldValue>) -> Self {
        self.fields.insert("context".to_string(), FieldValue::Map(context));
        self
    }

    /// Insert or replace one field.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    /// Raw numeric `level` field, known code or not.
    pub fn level_code(&self) -> Option<u64> {
        self.fields.get("level").and_then(FieldValue::as_u64)
    }

    /// Severity of the record, read from the numeric `level` field.
    ///
    /// Returns `None` when the field is missing or not a known code.
    pub fn level(&self) -> Option<Level> {
        self.level_code().and_then(Level::from_code)
    }

    pub fn message(&self) -> Option<&str> {
        self.fields.get("message").and_then(FieldValue::as_str)
    }
}
