use crate::editor::SYNTAX_MODE;
use crate::theme::Theme;
use std::sync::LazyLock;
use syntect::easy::HighlightLines;
use syntect::highlighting::ThemeSet;
use syntect::parsing::SyntaxSet;
use syntect::util::as_24_bit_terminal_escaped;
use tracing::trace;

static SYNTAX_SET: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_nonewlines);
static THEME_SET: LazyLock<ThemeSet> = LazyLock::new(ThemeSet::load_defaults);

const RESET: &str = "\x1b[0m";

/// Highlight a single Java line with 24-bit terminal escapes.
/// Falls back to the plain line if highlighting fails.
pub fn highlight_line(code: &str, theme: Theme) -> String {
    let syntax = SYNTAX_SET
        .find_syntax_by_extension(SYNTAX_MODE)
        .unwrap_or_else(|| SYNTAX_SET.find_syntax_plain_text());
    let Some(theme) = THEME_SET.themes.get(theme.syntect_theme()) else {
        return code.to_string();
    };

    let mut highlighter = HighlightLines::new(syntax, theme);
    match highlighter.highlight_line(code, &SYNTAX_SET) {
        Ok(ranges) => format!("{}{}", as_24_bit_terminal_escaped(&ranges[..], false), RESET),
        Err(e) => {
            trace!("Highlighting failed, using plain text: {}", e);
            code.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_java_syntax_is_bundled() {
        assert!(SYNTAX_SET.find_syntax_by_extension(SYNTAX_MODE).is_some());
    }

    #[test]
    fn test_highlight_keeps_text() {
        let out = highlight_line("int count = 0;", Theme::Github);
        assert!(out.ends_with(RESET));
        assert!(out.contains("count"));
        assert_ne!(out, "int count = 0;");
    }

    #[test]
    fn test_themes_differ() {
        let dark = highlight_line("return x;", Theme::Monokai);
        let light = highlight_line("return x;", Theme::Github);
        assert_ne!(dark, light);
    }
}
