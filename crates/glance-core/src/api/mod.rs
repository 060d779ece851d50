//! Chat-completion API shapes: request payloads, response content
//! extraction, and failure classification.

pub mod error;
pub mod request;

pub use error::{ApiError, ApiErrorKind};
pub use request::{
    build_request, extract_content, system_prompt, ChatMessage, ChatRequest, Role,
    CHAT_COMPLETIONS_URL, DEFAULT_MODEL, DEFAULT_TEMPERATURE,
};
