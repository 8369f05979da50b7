use std::collections::BTreeMap;

use serde_json::Value;
use thiserror::Error;

/// Parsed suggestions: word to proposed glyph, `None` when the source
/// declined or answered with a non-string value.
pub type Suggestions = BTreeMap<String, Option<String>>;

/// A suggestion payload that could not be parsed.
#[derive(Debug, Error)]
pub enum ResponseError {
    #[error("suggestion payload is empty")]
    Empty,

    #[error("suggestion payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("suggestion payload is a JSON {found}, expected an object")]
    NotAnObject { found: &'static str },
}

/// Strips known wrapping around a JSON object: Markdown code fences
/// (```` ```json ````) and any prose before the first `{` or after the
/// last `}`.
///
/// # Example
///
/// ```
/// use lexmoji::suggest::strip_wrapping;
///
/// let raw = "```json\n{\"chat\": \"🐱\"}\n```";
/// assert_eq!(strip_wrapping(raw), "{\"chat\": \"🐱\"}");
/// ```
pub fn strip_wrapping(raw: &str) -> &str {
    let mut text = raw.trim();
    if let Some(rest) = text.strip_prefix("```") {
        text = rest.trim_start_matches(|c: char| c.is_ascii_alphanumeric());
    }
    if let Some(rest) = text.trim_end().strip_suffix("```") {
        text = rest;
    }
    let text = text.trim();

    match (text.find('{'), text.rfind('}')) {
        (Some(start), Some(end)) if start < end => &text[start..=end],
        _ => text,
    }
}

/// Parses a raw suggestion payload into a word to glyph map.
///
/// Values that are not strings (typically `null`) map to `None`.
pub fn parse_suggestions(raw: &str) -> Result<Suggestions, ResponseError> {
    let body = strip_wrapping(raw);
    if body.is_empty() {
        return Err(ResponseError::Empty);
    }

    match serde_json::from_str::<Value>(body)? {
        Value::Object(map) => Ok(map
            .into_iter()
            .map(|(word, value)| match value {
                Value::String(glyph) => (word, Some(glyph)),
                _ => (word, None),
            })
            .collect()),
        other => Err(ResponseError::NotAnObject {
            found: json_kind(&other),
        }),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
