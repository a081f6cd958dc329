//! Result extraction from the envelope's `data` object

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::trace;

use crate::cache::{CacheCategory, ResponseCache};
use crate::error::{RestError, RestResult};

/// Extract the payload named by `data.result_type`
///
/// With `extract == false`, `data` is returned untouched and nothing is
/// cached. Otherwise the payload under `data[result_type]` is returned and,
/// for cacheable result types, every entity in it carrying an `id` is stored
/// in `cache`. Without a `result_type`, the first value under `data` is
/// returned.
pub fn extract_result(data: Value, extract: bool, cache: &mut ResponseCache) -> RestResult<Value> {
    if !extract {
        return Ok(data);
    }

    let mut data = match data {
        Value::Object(map) => map,
        other => {
            return Err(RestError::shape(format!(
                "expected data to be an object, got {}",
                type_name(&other)
            )))
        }
    };

    let result_type = match data.get("result_type") {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => {
            return Err(RestError::shape(format!(
                "result_type is {}, not a string",
                type_name(other)
            )))
        }
    };

    // A null result_type counts as absent, but its key is never the payload
    let Some(result_type) = result_type else {
        return data
            .into_iter()
            .find(|(key, _)| key != "result_type")
            .map(|(_, value)| value)
            .ok_or_else(|| RestError::shape("data is empty"));
    };

    let payload = data
        .remove(&result_type)
        .ok_or_else(|| RestError::shape(format!("data has no '{}' entry", result_type)))?;

    if let Some(category) = CacheCategory::for_result_type(&result_type) {
        let stored = cache.put_entities(category, &payload);
        trace!(%category, stored, "Cached entities");
    }

    Ok(payload)
}

/// Deserialize an extracted payload into a typed model
pub fn decode<T: DeserializeOwned>(payload: Value) -> RestResult<T> {
    serde_json::from_value(payload).map_err(|e| RestError::shape(e.to_string()))
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
