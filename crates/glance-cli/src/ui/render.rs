//! Rendering primitives for CLI output.

use super::context::UiContext;
use super::mode::OutputMode;
use super::theme::{styled, styles, Badge};

/// Render a header line for a command.
///
/// Pretty mode: "Glance · command"
/// Plain mode: "glance command"
pub fn header(ctx: &UiContext, command: &str) -> String {
    match ctx.mode {
        OutputMode::Pretty => {
            let title = styled("Glance", styles::bold(), ctx.color);
            format!("{} \u{00B7} {}", title, command)
        }
        OutputMode::Plain => format!("glance {}", command),
        OutputMode::Json => String::new(),
    }
}

/// Render a `label: value` line with a dimmed label.
pub fn kv(ctx: &UiContext, label: &str, value: &str) -> String {
    let label = format!("{}:", label);
    format!("{} {}", styled(&label, styles::dim(), ctx.color), value)
}

/// Render a status badge followed by a message.
pub fn badge(ctx: &UiContext, badge: Badge, message: &str) -> String {
    format!(
        "{} {}",
        styled(badge.text(), badge.style(), ctx.color),
        message
    )
}

/// Render a hint line.
pub fn hint(ctx: &UiContext, text: &str) -> String {
    styled(&format!("Hint: {}", text), styles::dim(), ctx.color)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain() -> UiContext {
        UiContext {
            color: false,
            mode: OutputMode::Plain,
        }
    }

    #[test]
    fn test_header_plain() {
        assert_eq!(header(&plain(), "key show"), "glance key show");
    }

    #[test]
    fn test_header_json_is_empty() {
        let ctx = UiContext {
            color: false,
            mode: OutputMode::Json,
        };
        assert!(header(&ctx, "parse").is_empty());
    }

    #[test]
    fn test_kv_and_badge_plain() {
        assert_eq!(kv(&plain(), "Store", "/tmp/s.json"), "Store: /tmp/s.json");
        assert_eq!(badge(&plain(), Badge::Ok, "Key decrypts"), "[OK] Key decrypts");
        assert_eq!(hint(&plain(), "glance init"), "Hint: glance init");
    }
}
