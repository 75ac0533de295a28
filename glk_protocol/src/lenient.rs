//! Forgiving decoders for optional and list-valued fields.
//!
//! A single malformed element must never take its siblings down with it, so
//! lists are decoded element by element and the failures are logged and dropped.
//! Optional scalar fields that do not fit their type decode as absent.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Decode an optional JSON array, skipping elements that do not fit `T`.
///
/// `null` and non-array values decode as absent.
pub(crate) fn seq<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(Value::Array(items)) => Some(decode_elements(items)),
        Some(other) => {
            tracing::warn!(
                element = std::any::type_name::<T>(),
                found = json_kind(&other),
                "expected an array, treating field as absent"
            );
            None
        }
    })
}

/// Decode an optional field; a value that does not fit `T` decodes as absent.
pub(crate) fn opt<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(value) => decode_value(value),
    })
}

/// Like [`opt`] for fields with a default.
pub(crate) fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    opt(deserializer).map(Option::unwrap_or_default)
}

/// Keep JSON `null` distinct from an absent field.
///
/// A present value that does not fit `T` counts as absent, not as `null`.
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Null => Some(None),
        value => decode_value(value).map(Some),
    })
}

fn decode_value<T: DeserializeOwned>(value: Value) -> Option<T> {
    let found = json_kind(&value);
    match serde_json::from_value::<T>(value) {
        Ok(decoded) => Some(decoded),
        Err(err) => {
            tracing::warn!(
                field = std::any::type_name::<T>(),
                found,
                error = %err,
                "ignoring malformed field"
            );
            None
        }
    }
}

fn decode_elements<T: DeserializeOwned>(items: Vec<Value>) -> Vec<T> {
    items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value::<T>(item) {
            Ok(decoded) => Some(decoded),
            Err(err) => {
                tracing::warn!(
                    index,
                    element = std::any::type_name::<T>(),
                    error = %err,
                    "dropping malformed element"
                );
                None
            }
        })
        .collect()
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
