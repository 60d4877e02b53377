//! JSON shape decoders for Apertium responses
//!
//! Each decoder assumes one top-level shape and fails with
//! [`TranslatorError::MalformedResponse`] when the parsed value does not match.

use serde_json::Value;

use crate::core::errors::{Result, TranslatorError};

/// Parse the whole response text
fn parse(text: &str) -> Result<Value> {
    Ok(serde_json::from_str(text)?)
}

/// Render a JSON value as text: strings verbatim, everything else as JSON.
/// `null` has no text form.
fn value_to_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Short name of a value's JSON type, for error messages
fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Decode a top-level JSON string
pub fn as_string(text: &str) -> Result<String> {
    match parse(text)? {
        Value::String(s) => Ok(s),
        other => Err(TranslatorError::malformed(format!(
            "expected a string, got {}",
            kind(&other)
        ))),
    }
}

/// Decode a JSON array of objects or strings into one slot per element.
///
/// With a non-empty `key`, each element must be an object and the slot holds
/// the text of `element[key]`, or `None` when the element has no such key.
/// Without a key each element's own text is used.
pub fn as_string_array(text: &str, key: Option<&str>) -> Result<Vec<Option<String>>> {
    let items = match parse(text)? {
        Value::Array(items) => items,
        other => {
            return Err(TranslatorError::malformed(format!(
                "expected an array, got {}",
                kind(&other)
            )))
        }
    };

    let key = key.filter(|k| !k.is_empty());

    items
        .iter()
        .enumerate()
        .map(|(idx, item)| match key {
            Some(key) => {
                let object = item.as_object().ok_or_else(|| {
                    TranslatorError::malformed(format!(
                        "element {} is {}, expected an object",
                        idx,
                        kind(item)
                    ))
                })?;
                match object.get(key) {
                    None => Ok(None),
                    Some(value) => value_to_text(value).map(Some).ok_or_else(|| {
                        TranslatorError::malformed(format!("element {} has null \"{}\"", idx, key))
                    }),
                }
            }
            None => value_to_text(item)
                .map(Some)
                .ok_or_else(|| TranslatorError::malformed(format!("element {} is null", idx))),
        })
        .collect()
}

/// Decode `object[key][sub_key]` where `object[key]` is itself JSON text.
///
/// The service sends the inner object as a JSON document embedded in the
/// outer one, so the value at `key` is rendered as text and parsed again.
pub fn as_nested_string(text: &str, key: &str, sub_key: &str) -> Result<String> {
    let outer = parse(text)?;
    let outer = outer.as_object().ok_or_else(|| {
        TranslatorError::malformed(format!("expected an object, got {}", kind(&outer)))
    })?;

    let inner_text = outer
        .get(key)
        .and_then(value_to_text)
        .ok_or_else(|| TranslatorError::malformed(format!("missing \"{}\"", key)))?;

    let inner = parse(&inner_text)?;
    let inner = inner.as_object().ok_or_else(|| {
        TranslatorError::malformed(format!(
            "\"{}\" is {}, expected an object",
            key,
            kind(&inner)
        ))
    })?;

    inner
        .get(sub_key)
        .and_then(value_to_text)
        .ok_or_else(|| TranslatorError::malformed(format!("missing \"{}.{}\"", key, sub_key)))
}

/// Decode a JSON array of integers that fit in 32 bits.
///
/// Out-of-range values are rejected, not wrapped.
pub fn as_int_array(text: &str) -> Result<Vec<i32>> {
    let items = match parse(text)? {
        Value::Array(items) => items,
        other => {
            return Err(TranslatorError::malformed(format!(
                "expected an array, got {}",
                kind(&other)
            )))
        }
    };

    items
        .iter()
        .enumerate()
        .map(|(idx, item)| {
            item.as_i64()
                .and_then(|n| i32::try_from(n).ok())
                .ok_or_else(|| {
                    TranslatorError::malformed(format!(
                        "element {} is not a 32-bit integer: {}",
                        idx, item
                    ))
                })
        })
        .collect()
}
