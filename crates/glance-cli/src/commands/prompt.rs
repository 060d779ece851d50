use glance_core::api::build_request;

use crate::app::AppContext;
use crate::cli::PromptArgs;
use crate::helpers::read_text_input;

/// Print the chat-completion request body for a selection.
pub fn handle_prompt(ctx: &AppContext, args: &PromptArgs) -> anyhow::Result<()> {
    let text = match args.text.clone() {
        Some(text) => text,
        None => read_text_input(None)?,
    };
    let model = match args.model.as_deref() {
        Some(model) => model,
        None => ctx.model()?,
    };

    let request = build_request(args.mode, model, &text)?;
    println!("{}", serde_json::to_string_pretty(&request)?);
    Ok(())
}
