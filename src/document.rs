use crate::record::FieldValue;
use serde::Serialize;
use std::collections::BTreeMap;

/// Document type label sent with every indexing call.
///
/// Older index APIs reject documents without a mapping type, so the value
/// is a fixed literal rather than a configurable option.
pub const DOCUMENT_TYPE: &str = "weird-deprecated-but-mandatory";

/// Key under which the formatted creation time is stored.
pub const TIMESTAMP_FIELD: &str = "@timestamp";

/// Body of one indexing call. Serializes as a flat JSON object.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Document {
    pub fields: BTreeMap<String, FieldValue>,
}

impl Document {
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    pub fn timestamp(&self) -> Option<&str> {
        self.fields.get(TIMESTAMP_FIELD).and_then(FieldValue::as_str)
    }
}

/// Where a [`Document`] is stored: index name plus the fixed type label.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IndexTarget {
    pub index: String,
    pub doc_type: &'static str,
}

impl IndexTarget {
    pub fn new(index: impl Into<String>) -> Self {
        IndexTarget {
            index: index.into(),
            doc_type: DOCUMENT_TYPE,
        }
    }
}
