//! Human-readable output for analysis results.

use glance_core::response::{Explanation, FactCheck, ParseFallback};
use glance_core::StructuredResponse;

use crate::ui::theme::{styled, styles, verdict_style};
use crate::ui::{badge, kv, Badge, UiContext};

/// Print a structured response.
pub fn print_structured(ctx: &UiContext, response: &StructuredResponse) {
    match response {
        StructuredResponse::Explanation(explanation) => print_explanation(ctx, explanation),
        StructuredResponse::FactCheck(fact_check) => print_fact_check(ctx, fact_check),
        StructuredResponse::Unstructured(fallback) => print_fallback(ctx, fallback),
    }
}

fn print_explanation(ctx: &UiContext, explanation: &Explanation) {
    println!("{}", styled(&explanation.summary, styles::bold(), ctx.color));
    println!();
    println!("{}", explanation.explanation);
    if let Some(context) = explanation.context.as_deref() {
        println!();
        println!("{}", kv(ctx, "Context", context));
    }
}

fn print_fact_check(ctx: &UiContext, fact_check: &FactCheck) {
    let verdict = styled(
        fact_check.verdict.label(),
        verdict_style(fact_check.verdict),
        ctx.color,
    );
    println!("{}", kv(ctx, "Verdict", &verdict));
    println!("{}", styled(&fact_check.summary, styles::bold(), ctx.color));
    println!();
    println!("{}", fact_check.details);
    if let Some(sources) = fact_check.sources.as_ref().filter(|s| !s.is_empty()) {
        println!();
        println!("{}", styled("Sources:", styles::dim(), ctx.color));
        for source in sources {
            println!("  - {}", source);
        }
    }
}

fn print_fallback(ctx: &UiContext, fallback: &ParseFallback) {
    eprintln!("{}", badge(ctx, Badge::Warn, &fallback.error));
    println!("{}", fallback.summary);
}
