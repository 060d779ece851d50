use glance_core::api::{extract_content, ApiError};
use glance_core::{parse, NormalizedResponse, StructuredResponse};

use crate::app::AppContext;
use crate::cli::ParseArgs;
use crate::helpers::read_text_input;
use crate::output::{print_structured, structured_json};
use crate::ui::{badge, Badge};

pub fn handle_parse(ctx: &AppContext, args: &ParseArgs) -> anyhow::Result<()> {
    let input = read_text_input(args.file.as_deref())?;

    let raw = if args.completion {
        if let Some(status) = args.status.filter(|s| !(200..300).contains(s)) {
            let err = ApiError::from_response(status, &input);
            tracing::debug!(kind = ?err.kind, transient = err.kind.is_transient(), "completion failed");
            return Err(err.into());
        }
        extract_content(&input)?
    } else {
        input
    };

    let normalized = parse(&raw);
    let ui_ctx = ctx.ui_context(args.json);

    match args.mode {
        Some(mode) => {
            let structured = StructuredResponse::interpret(mode, normalized);
            if ui_ctx.mode.is_json() {
                println!("{}", serde_json::to_string_pretty(&structured_json(&structured)?)?);
            } else {
                print_structured(&ui_ctx, &structured);
            }
        }
        None => {
            if ui_ctx.mode.is_json() {
                println!("{}", serde_json::to_string_pretty(&normalized)?);
                return Ok(());
            }
            match &normalized {
                NormalizedResponse::Parsed(_) => {
                    println!("{}", serde_json::to_string_pretty(&normalized.value())?);
                }
                NormalizedResponse::Fallback(fallback) => {
                    eprintln!("{}", badge(&ui_ctx, Badge::Warn, &fallback.error));
                    println!("{}", fallback.summary);
                }
            }
        }
    }
    Ok(())
}
