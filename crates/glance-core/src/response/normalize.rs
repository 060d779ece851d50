//! Recovery of JSON objects from LLM chat output.
//!
//! Models are asked for a bare JSON object but routinely wrap it in a
//! markdown code fence or "prettify" the structural quotes into typographic
//! ones. [`parse`] undoes both, in an order that never touches a response
//! which is already valid JSON.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

/// Error text carried by [`ParseFallback`] when nothing could be parsed.
pub const PARSE_FAILURE_MESSAGE: &str = "Failed to parse LLM response as JSON";

// Whole-text fenced block with an optional `json` tag.
static CODE_FENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?si)^```(?:json)?[ \t]*\r?\n?(.*?)\r?\n?[ \t]*```$")
        .expect("code fence pattern is valid")
});

/// Plain-text stand-in for a response that could not be structured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseFallback {
    /// The model's original wording, trimmed
    pub summary: String,
    pub error: String,
}

/// Outcome of [`parse`].
#[derive(Debug, Clone, PartialEq)]
pub enum NormalizedResponse {
    /// A JSON object recovered from the text
    Parsed(Map<String, Value>),
    /// The text was not JSON, even after normalization
    Fallback(ParseFallback),
}

impl NormalizedResponse {
    pub fn is_ok(&self) -> bool {
        matches!(self, NormalizedResponse::Parsed(_))
    }

    /// The payload as a JSON object: the parsed object, or
    /// `{ "summary": ..., "error": ... }` for a fallback.
    pub fn value(&self) -> Value {
        match self {
            NormalizedResponse::Parsed(map) => Value::Object(map.clone()),
            NormalizedResponse::Fallback(fallback) => serde_json::json!({
                "summary": fallback.summary,
                "error": fallback.error,
            }),
        }
    }
}

/// Serialized as `{ "ok": bool, "value": object }`.
impl Serialize for NormalizedResponse {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("NormalizedResponse", 2)?;
        match self {
            NormalizedResponse::Parsed(map) => {
                state.serialize_field("ok", &true)?;
                state.serialize_field("value", map)?;
            }
            NormalizedResponse::Fallback(fallback) => {
                state.serialize_field("ok", &false)?;
                state.serialize_field("value", fallback)?;
            }
        }
        state.end()
    }
}

/// Recover a JSON object from raw LLM output.
///
/// Steps, stopping at the first success:
///
/// 1. trim surrounding whitespace
/// 2. unwrap a fenced code block (optionally tagged `json`)
/// 3. strict JSON parse
/// 4. replace typographic double/single quotes with ASCII ones and parse again
/// 5. fall back to the trimmed original text
///
/// Quote replacement only runs after the strict attempt fails, so curly
/// quotes inside string values of valid JSON survive untouched.
///
/// # Examples
///
/// ```
/// use glance_core::response::parse;
///
/// let response = parse("```json\n{\"summary\": \"x\"}\n```");
/// assert!(response.is_ok());
/// assert_eq!(response.value()["summary"], "x");
/// ```
pub fn parse(raw: &str) -> NormalizedResponse {
    let trimmed = raw.trim();
    let candidate = strip_code_fence(trimmed);

    if let Some(object) = parse_object(candidate) {
        return NormalizedResponse::Parsed(object);
    }

    if let Cow::Owned(normalized) = normalize_quotes(candidate) {
        if let Some(object) = parse_object(&normalized) {
            tracing::debug!("parsed LLM response after quote normalization");
            return NormalizedResponse::Parsed(object);
        }
    }

    tracing::debug!(chars = trimmed.len(), "LLM response is not JSON; using plain text");
    NormalizedResponse::Fallback(ParseFallback {
        summary: trimmed.to_string(),
        error: PARSE_FAILURE_MESSAGE.to_string(),
    })
}

/// Return the inner content of a whole-text fenced code block, trimmed, or
/// the input unchanged when it is not fenced.
pub fn strip_code_fence(text: &str) -> &str {
    CODE_FENCE
        .captures(text)
        .and_then(|captures| captures.get(1))
        .map(|inner| inner.as_str().trim())
        .unwrap_or(text)
}

/// Replace U+201C/U+201D with `"` and U+2018/U+2019 with `'`.
///
/// Borrows the input when there is nothing to replace.
pub fn normalize_quotes(text: &str) -> Cow<'_, str> {
    if !text.contains(is_typographic_quote) {
        return Cow::Borrowed(text);
    }
    Cow::Owned(
        text.chars()
            .map(|c| match c {
                '\u{201C}' | '\u{201D}' => '"',
                '\u{2018}' | '\u{2019}' => '\'',
                other => other,
            })
            .collect(),
    )
}

fn is_typographic_quote(c: char) -> bool {
    matches!(c, '\u{201C}' | '\u{201D}' | '\u{2018}' | '\u{2019}')
}

fn parse_object(text: &str) -> Option<Map<String, Value>> {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(map)) => Some(map),
        _ => None,
    }
}
