//! Chat-completion request payloads and response bodies.
//!
//! Only the JSON shapes live here. Sending the request, authentication
//! headers and retries belong to the HTTP client.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{GlanceError, Result};
use crate::response::AnalysisMode;

/// OpenRouter chat-completions endpoint.
pub const CHAT_COMPLETIONS_URL: &str = "https://openrouter.ai/api/v1/chat/completions";

/// Model used when the config does not name one.
pub const DEFAULT_MODEL: &str = "openai/gpt-4o-mini";

/// Sampling temperature for both modes; low to keep the JSON shape stable.
pub const DEFAULT_TEMPERATURE: f32 = 0.2;

const EXPLAIN_PROMPT: &str = "You explain text that a user selected on a web page. \
Respond with only a JSON object of the form \
{\"summary\": string, \"explanation\": string, \"context\": string}. \
\"summary\" is one sentence, \"explanation\" is a few plain-language paragraphs, \
and \"context\" is optional background. Do not wrap the JSON in markdown.";

const FACT_CHECK_PROMPT: &str = "You fact-check a claim that a user selected on a web page. \
Respond with only a JSON object of the form \
{\"summary\": string, \"verdict\": \"true\" | \"false\" | \"partially_true\" | \"misleading\" | \"unverifiable\", \
\"details\": string, \"sources\": [string]}. \
\"sources\" is optional and lists URLs or publications supporting the verdict. \
Do not wrap the JSON in markdown.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Body of a chat-completions POST.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

/// System prompt describing the JSON schema expected for `mode`.
pub fn system_prompt(mode: AnalysisMode) -> &'static str {
    match mode {
        AnalysisMode::Explain => EXPLAIN_PROMPT,
        AnalysisMode::FactCheck => FACT_CHECK_PROMPT,
    }
}

/// Build the request for analysing `selected_text`.
///
/// # Errors
///
/// Returns `GlanceError::InvalidInput` if the selection or model is blank.
pub fn build_request(mode: AnalysisMode, model: &str, selected_text: &str) -> Result<ChatRequest> {
    let selection = selected_text.trim();
    if selection.is_empty() {
        return Err(GlanceError::InvalidInput(
            "Selected text cannot be empty".to_string(),
        ));
    }
    let model = model.trim();
    if model.is_empty() {
        return Err(GlanceError::InvalidInput(
            "Model name cannot be empty".to_string(),
        ));
    }

    Ok(ChatRequest {
        model: model.to_string(),
        messages: vec![
            ChatMessage::system(system_prompt(mode)),
            ChatMessage::user(selection),
        ],
        temperature: Some(DEFAULT_TEMPERATURE),
    })
}

/// Pull the assistant text out of a chat-completions response body.
///
/// # Errors
///
/// Returns `GlanceError::Validation` if the body is not JSON, carries an
/// `error` object, or has no `choices[0].message.content` string.
pub fn extract_content(body: &str) -> Result<String> {
    let value: Value = serde_json::from_str(body)?;

    if let Some(error) = value.get("error") {
        let message = error
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("unknown error");
        return Err(GlanceError::Validation(format!(
            "API returned an error: {}",
            message
        )));
    }

    value
        .pointer("/choices/0/message/content")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| {
            GlanceError::Validation("Completion has no message content".to_string())
        })
}
