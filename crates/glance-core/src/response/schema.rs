//! Typed response schemas for the two analysis modes.
//!
//! The normalizer only guarantees "some JSON object". This module checks the
//! object against the schema the request asked for and gives every optional
//! field an explicit type.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use super::normalize::{NormalizedResponse, ParseFallback};
use crate::error::GlanceError;

/// Error text used when a parsed object does not fit the requested schema.
pub const SCHEMA_MISMATCH_MESSAGE: &str = "Response did not match the expected schema";

/// What the user asked the model to do with the selected text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnalysisMode {
    Explain,
    FactCheck,
}

impl AnalysisMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisMode::Explain => "explain",
            AnalysisMode::FactCheck => "fact-check",
        }
    }
}

impl fmt::Display for AnalysisMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnalysisMode {
    type Err = GlanceError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "explain" | "explanation" => Ok(AnalysisMode::Explain),
            "fact-check" | "factcheck" | "fact_check" => Ok(AnalysisMode::FactCheck),
            other => Err(GlanceError::InvalidInput(format!(
                "Unknown mode: {} (use explain or fact-check)",
                other
            ))),
        }
    }
}

/// Result of an `explain` request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Explanation {
    pub summary: String,
    pub explanation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

/// Result of a `fact-check` request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactCheck {
    pub summary: String,
    pub verdict: Verdict,
    pub details: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sources: Option<Vec<String>>,
}

/// Fact-check verdict.
///
/// Parsing is lenient about case and separators since models write
/// "Partially True", "partially-true" and "partially_true" interchangeably.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    True,
    False,
    PartiallyTrue,
    Misleading,
    Unverifiable,
}

impl Verdict {
    /// Canonical wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::True => "true",
            Verdict::False => "false",
            Verdict::PartiallyTrue => "partially_true",
            Verdict::Misleading => "misleading",
            Verdict::Unverifiable => "unverifiable",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Verdict::True => "True",
            Verdict::False => "False",
            Verdict::PartiallyTrue => "Partially true",
            Verdict::Misleading => "Misleading",
            Verdict::Unverifiable => "Unverifiable",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Verdict {
    type Err = GlanceError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let key: String = value
            .trim()
            .to_ascii_lowercase()
            .chars()
            .map(|c| if c == ' ' || c == '-' { '_' } else { c })
            .collect();
        match key.as_str() {
            "true" | "correct" | "accurate" => Ok(Verdict::True),
            "false" | "incorrect" | "inaccurate" => Ok(Verdict::False),
            "partially_true" | "partly_true" | "mostly_true" | "mixed" => {
                Ok(Verdict::PartiallyTrue)
            }
            "misleading" => Ok(Verdict::Misleading),
            "unverifiable" | "unverified" | "unknown" => Ok(Verdict::Unverifiable),
            _ => Err(GlanceError::Validation(format!(
                "Unknown verdict: {}",
                value
            ))),
        }
    }
}

impl Serialize for Verdict {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Verdict {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// A response checked against the requested mode's schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StructuredResponse {
    Explanation(Explanation),
    FactCheck(FactCheck),
    /// Displayable text with a notice that it could not be structured
    Unstructured(ParseFallback),
}

impl StructuredResponse {
    /// Match a normalized response against the schema for `mode`.
    ///
    /// A parsed object that does not fit keeps its `summary` string when it
    /// has one, otherwise the compact JSON text is shown.
    pub fn interpret(mode: AnalysisMode, response: NormalizedResponse) -> Self {
        let map = match response {
            NormalizedResponse::Parsed(map) => map,
            NormalizedResponse::Fallback(fallback) => {
                return StructuredResponse::Unstructured(fallback)
            }
        };

        let value = Value::Object(map);
        let typed = match mode {
            AnalysisMode::Explain => {
                serde_json::from_value(value.clone()).map(StructuredResponse::Explanation)
            }
            AnalysisMode::FactCheck => {
                serde_json::from_value(value.clone()).map(StructuredResponse::FactCheck)
            }
        };

        match typed {
            Ok(structured) => structured,
            Err(err) => {
                tracing::debug!(%mode, "response does not match schema: {}", err);
                StructuredResponse::Unstructured(ParseFallback {
                    summary: summary_of(&value),
                    error: SCHEMA_MISMATCH_MESSAGE.to_string(),
                })
            }
        }
    }

    pub fn summary(&self) -> &str {
        match self {
            StructuredResponse::Explanation(explanation) => &explanation.summary,
            StructuredResponse::FactCheck(fact_check) => &fact_check.summary,
            StructuredResponse::Unstructured(fallback) => &fallback.summary,
        }
    }

    pub fn is_structured(&self) -> bool {
        !matches!(self, StructuredResponse::Unstructured(_))
    }
}

fn summary_of(value: &Value) -> String {
    value
        .as_object()
        .and_then(|map: &Map<String, Value>| map.get("summary"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| value.to_string())
}
