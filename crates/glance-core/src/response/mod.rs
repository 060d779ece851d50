//! LLM response handling.
//!
//! - **normalize**: recover a JSON object from raw model text, with a
//!   plain-text fallback
//! - **schema**: typed explanation / fact-check results

pub mod normalize;
pub mod schema;

pub use normalize::{
    normalize_quotes, parse, strip_code_fence, NormalizedResponse, ParseFallback,
    PARSE_FAILURE_MESSAGE,
};
pub use schema::{
    AnalysisMode, Explanation, FactCheck, StructuredResponse, Verdict, SCHEMA_MISMATCH_MESSAGE,
};
