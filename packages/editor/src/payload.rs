use crate::suggestions::SuggestionMap;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SuggestError {
    #[error("Malformed suggestion payload: {0}")]
    Malformed(String),
}

/// Parse a provider response into a flat suggestion map.
///
/// Providers are expected to return a JSON object, but in practice wrap it
/// in prose. Strict parse first; on failure, salvage the first balanced
/// `{...}` span and retry. If both fail, a single error is returned and
/// nothing is applied.
pub fn parse_suggestion_payload(raw: &str) -> Result<SuggestionMap, SuggestError> {
    if let Ok(value) = serde_json::from_str::<Value>(raw) {
        if let Some(map) = suggestion_map(value) {
            return Ok(map);
        }
    }

    let span = extract_balanced_object(raw)
        .ok_or_else(|| SuggestError::Malformed("no JSON object found".to_string()))?;
    debug!(bytes = span.len(), "Salvaging object span from payload");

    let value = serde_json::from_str::<Value>(span)
        .map_err(|e| SuggestError::Malformed(e.to_string()))?;
    suggestion_map(value)
        .ok_or_else(|| SuggestError::Malformed("payload is not a flat object".to_string()))
}

/// Flatten a JSON object into key → string. Strings pass through, numbers
/// and booleans are stringified, anything nested is dropped.
fn suggestion_map(value: Value) -> Option<SuggestionMap> {
    let object = match value {
        Value::Object(object) => object,
        _ => return None,
    };

    let mut map = SuggestionMap::new();
    for (key, value) in object {
        match value {
            Value::String(s) => {
                map.insert(key, s);
            }
            Value::Number(n) => {
                map.insert(key, n.to_string());
            }
            Value::Bool(b) => {
                map.insert(key, b.to_string());
            }
            other => {
                warn!(key = %key, value_type = value_type(&other), "Dropping non-scalar suggestion value");
            }
        }
    }
    Some(map)
}

fn value_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// First balanced `{...}` span, tracking string literals and escapes so
/// braces inside values don't break the balance count
fn extract_balanced_object(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (at, c) in raw[start..].char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' if in_string => escaped = true,
            '"' => in_string = !in_string,
            '{' if !in_string => depth += 1,
            '}' if !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(&raw[start..start + at + 1]);
                }
            }
            _ => {}
        }
    }

    None
}
