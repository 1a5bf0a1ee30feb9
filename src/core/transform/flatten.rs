//! Record flattening
//!
//! Converts an arbitrarily nested document object into a single-level
//! mapping suitable for tabular export:
//!
//! - `{"a": {"b": 1}}` becomes `{"a_b": 1}`
//! - `{"a": [1, 2]}` becomes `{"a": "[1,2]"}` (arrays keep their canonical
//!   JSON text so every output value is a scalar)
//! - scalars and nulls pass through under the joined key

use crate::domain::{CustodianError, Result};
use serde_json::{Map, Value};

/// Nesting levels tolerated before the flattener fails fast. Well-formed
/// store records sit at two or three levels; anything deeper is pathological.
const MAX_DEPTH: usize = 32;

/// Flatten a nested object into a flat key-to-scalar mapping
///
/// Nested object keys join with `_`. When two distinct paths collapse to
/// the same joined key, the later one overwrites the earlier - collisions
/// are not an error. Key order follows first encounter, so the output is
/// deterministic for a given input shape.
///
/// # Errors
///
/// Fails with a serialization error when nesting exceeds [`MAX_DEPTH`].
///
/// # Examples
///
/// ```
/// use custodian::core::transform::flatten_object;
/// use serde_json::json;
///
/// let object = json!({"ctx": {"language": "en"}, "tags": ["a", "b"]});
/// let flat = flatten_object(object.as_object().unwrap()).unwrap();
///
/// assert_eq!(flat["ctx_language"], json!("en"));
/// assert_eq!(flat["tags"], json!("[\"a\",\"b\"]"));
/// ```
pub fn flatten_object(object: &Map<String, Value>) -> Result<Map<String, Value>> {
    let mut flattened = Map::new();
    flatten_into(object, "", 0, &mut flattened)?;
    Ok(flattened)
}

fn flatten_into(
    object: &Map<String, Value>,
    prefix: &str,
    depth: usize,
    out: &mut Map<String, Value>,
) -> Result<()> {
    if depth > MAX_DEPTH {
        return Err(CustodianError::Serialization(format!(
            "Record nesting exceeds {MAX_DEPTH} levels at key prefix '{prefix}'"
        )));
    }

    for (key, value) in object {
        let joined = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}_{key}")
        };

        match value {
            Value::Object(nested) => {
                flatten_into(nested, &joined, depth + 1, out)?;
            }
            Value::Array(_) => {
                let serialized = serde_json::to_string(value)
                    .map_err(|e| CustodianError::Serialization(e.to_string()))?;
                out.insert(joined, Value::String(serialized));
            }
            scalar => {
                out.insert(joined, scalar.clone());
            }
        }
    }

    Ok(())
}
