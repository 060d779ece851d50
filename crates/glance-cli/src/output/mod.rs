//! Output formatting helpers for the CLI.

mod json;
mod text;

pub use json::{key_info_json, structured_json};
pub use text::print_structured;
