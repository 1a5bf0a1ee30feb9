//! Document model and query filters
//!
//! A [`Document`] is one record from the hosted store: a stable id, the
//! store's ownership metadata, and an opaque bag of attribute fields whose
//! values may be arbitrarily nested. Field order is preserved so downstream
//! flattening and CSV column derivation stay deterministic.

use crate::domain::ids::DocumentId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One record from the document store
///
/// System fields use the store's `$`-prefixed wire names; everything else
/// lands in `fields` untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Stable unique identifier
    #[serde(rename = "$id")]
    pub id: DocumentId,

    /// Creation timestamp, if the store reports one
    #[serde(rename = "$createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    /// Ordered permission metadata strings, e.g. `read("user:abc")`
    #[serde(rename = "$permissions", default)]
    pub permissions: Vec<String>,

    /// Id of the account that created the record, if the store reports one
    #[serde(rename = "$createdBy", default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,

    /// All remaining attributes, insertion-ordered
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Document {
    /// Look up an attribute field by name
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Look up a string-valued attribute field by name
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }

    /// Serialize the whole document (system fields included) to a JSON object
    ///
    /// This is the shape the flattener consumes, matching what the store
    /// returns on the wire.
    pub fn to_object(&self) -> Map<String, Value> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        }
    }
}

/// One page of a collection listing
#[derive(Debug, Clone, Deserialize)]
pub struct DocumentList {
    /// Total matching records reported by the store
    pub total: u64,

    /// Records in this page, in store-defined order
    pub documents: Vec<Document>,
}

/// A predicate on a named document field
///
/// Filters serialize to the store's JSON query objects, e.g.
/// `{"method":"equal","attribute":"result","values":["pending"]}`.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Field equals the given value
    Equal { attribute: String, value: Value },

    /// Field is less than or equal to the given value
    LessThanEqual { attribute: String, value: Value },
}

impl Filter {
    /// Equality predicate
    pub fn equal(attribute: impl Into<String>, value: impl Into<Value>) -> Self {
        Filter::Equal {
            attribute: attribute.into(),
            value: value.into(),
        }
    }

    /// Less-than-or-equal predicate
    pub fn less_than_equal(attribute: impl Into<String>, value: impl Into<Value>) -> Self {
        Filter::LessThanEqual {
            attribute: attribute.into(),
            value: value.into(),
        }
    }

    /// Encode as the store's wire query object
    pub fn to_query(&self) -> Value {
        let (method, attribute, value) = match self {
            Filter::Equal { attribute, value } => ("equal", attribute, value),
            Filter::LessThanEqual { attribute, value } => ("lessThanEqual", attribute, value),
        };
        serde_json::json!({
            "method": method,
            "attribute": attribute,
            "values": [value],
        })
    }
}
