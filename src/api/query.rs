//! Query-string encoding for filter structs.

use serde::Serialize;
use serde_json::Value;

use crate::error::ApiError;

/// Encode the fields of `params` as `key=value` pairs.
///
/// `params` must serialize to a JSON object. `null` fields are omitted;
/// strings, numbers and booleans are sent as their plain text; arrays are
/// comma-joined. Keys come out in sorted order.
pub fn encode<Q: Serialize + ?Sized>(params: &Q) -> Result<String, ApiError> {
    let value = serde_json::to_value(params).map_err(|e| ApiError::Encode {
        message: e.to_string(),
    })?;

    let map = match value {
        Value::Object(map) => map,
        Value::Null => return Ok(String::new()),
        other => {
            return Err(ApiError::Encode {
                message: format!("query must be an object, got {}", other),
            })
        }
    };

    let pairs: Vec<String> = map
        .iter()
        .filter_map(|(key, value)| {
            scalar(value).map(|text| {
                format!(
                    "{}={}",
                    urlencoding::encode(key),
                    urlencoding::encode(&text)
                )
            })
        })
        .collect();

    Ok(pairs.join("&"))
}

/// Append the encoded `params` to `path`, adding `?` only when non-empty.
pub fn with_query<Q: Serialize + ?Sized>(path: &str, params: &Q) -> Result<String, ApiError> {
    let query = encode(params)?;
    if query.is_empty() {
        Ok(path.to_string())
    } else {
        let sep = if path.contains('?') { '&' } else { '?' };
        Ok(format!("{}{}{}", path, sep, query))
    }
}

fn scalar(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Array(items) => {
            let parts: Vec<String> = items.iter().filter_map(scalar).collect();
            Some(parts.join(","))
        }
        Value::Object(_) => Some(value.to_string()),
    }
}
