//! Badges and color styles.

use owo_colors::{OwoColorize, Style};

use glance_core::response::Verdict;

/// Badge types for status indicators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Badge {
    Ok,
    Warn,
    Info,
}

impl Badge {
    /// Get badge text (e.g., "[OK]")
    pub fn text(&self) -> &'static str {
        match self {
            Self::Ok => "[OK]",
            Self::Warn => "[WARN]",
            Self::Info => "[INFO]",
        }
    }

    pub fn style(&self) -> Style {
        match self {
            Self::Ok => styles::success(),
            Self::Warn => styles::warning(),
            Self::Info => styles::info(),
        }
    }
}

/// Named styles used across the CLI.
pub mod styles {
    use owo_colors::Style;

    pub fn bold() -> Style {
        Style::new().bold()
    }

    pub fn dim() -> Style {
        Style::new().dimmed()
    }

    pub fn success() -> Style {
        Style::new().green()
    }

    pub fn warning() -> Style {
        Style::new().yellow()
    }

    pub fn error() -> Style {
        Style::new().red()
    }

    pub fn info() -> Style {
        Style::new().cyan()
    }
}

/// Style for a fact-check verdict.
pub fn verdict_style(verdict: Verdict) -> Style {
    match verdict {
        Verdict::True => styles::success().bold(),
        Verdict::False => styles::error().bold(),
        Verdict::PartiallyTrue | Verdict::Misleading => styles::warning().bold(),
        Verdict::Unverifiable => styles::dim(),
    }
}

/// Apply `style` when color is enabled.
pub fn styled(text: &str, style: Style, color: bool) -> String {
    if color {
        text.style(style).to_string()
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_badge_text() {
        assert_eq!(Badge::Ok.text(), "[OK]");
        assert_eq!(Badge::Warn.text(), "[WARN]");
        assert_eq!(Badge::Info.text(), "[INFO]");
    }

    #[test]
    fn test_styled_without_color_is_plain() {
        assert_eq!(styled("True", verdict_style(Verdict::True), false), "True");
    }

    #[test]
    fn test_styled_with_color_adds_escapes() {
        let out = styled("False", verdict_style(Verdict::False), true);
        assert!(out.contains("\x1b["));
        assert!(out.contains("False"));
    }
}
