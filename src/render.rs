//! Result renderer: turns a violation list into cards and formats them

pub mod highlight;
pub mod markdown;
pub mod markup;

use crate::error::FailureKind;
use crate::theme::Theme;
use crate::types::{Summary, ViolationRecord};
use crossterm::style::Stylize;
use markup::{Target, render_markup};

pub const SUMMARY_HEADING: &str = "Error Summary:";
pub const LOOKS_GOOD: &str = "Looks good :)";

/// One rendered violation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub title: String,
    pub forbidden: bool,
    pub line: u32,
    /// Source line with surrounding whitespace trimmed
    pub code: String,
    /// Message as sent by the service, possibly with style tags
    pub message: String,
    pub occurrences: u32,
}

impl From<&ViolationRecord> for Card {
    fn from(record: &ViolationRecord) -> Self {
        Self {
            title: record.display_category().to_string(),
            forbidden: record.is_forbidden(),
            line: record.line_number,
            code: record.source_line.trim().to_string(),
            message: record.message.clone(),
            occurrences: record.occurrence_count,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    LooksGood,
    Cards(Vec<Card>),
}

/// Map violations to a view. Order is kept exactly as given.
pub fn render(violations: &[ViolationRecord]) -> View {
    if violations.is_empty() {
        View::LooksGood
    } else {
        View::Cards(violations.iter().map(Card::from).collect())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TextOptions {
    pub color: bool,
    pub theme: Theme,
}

/// Format violations for the terminal
pub fn format_text(violations: &[ViolationRecord], options: TextOptions) -> String {
    let heading = if options.color {
        SUMMARY_HEADING.bold().to_string()
    } else {
        SUMMARY_HEADING.to_string()
    };

    let cards = match render(violations) {
        View::LooksGood => return format!("{}\n{}", heading, LOOKS_GOOD),
        View::Cards(cards) => cards,
    };

    let mut output = format!("{}\n", heading);
    for (i, card) in cards.iter().enumerate() {
        output.push('\n');
        output.push_str(&format_card(i + 1, card, options));
    }

    output.push('\n');
    output.push_str(&format_summary(&Summary::of(violations)));
    output
}

fn format_card(index: usize, card: &Card, options: TextOptions) -> String {
    let title = match (card.forbidden, options.color) {
        (true, true) => format!("FORBIDDEN: {}", card.title).red().bold().to_string(),
        (true, false) => format!("FORBIDDEN: {}", card.title),
        (false, true) => card.title.as_str().yellow().bold().to_string(),
        (false, false) => card.title.clone(),
    };
    let line = format!("(line {})", card.line);
    let line = if options.color {
        line.dim().to_string()
    } else {
        line
    };
    let code = if options.color {
        highlight::highlight_line(&card.code, options.theme)
    } else {
        card.code.clone()
    };

    let mut output = format!("{}. {} {}\n", index, title, line);
    if !card.code.is_empty() {
        output.push_str(&format!("    {}\n", code));
    }
    if !card.message.is_empty() {
        let target = if options.color {
            Target::Terminal
        } else {
            Target::Plain
        };
        output.push_str(&format!("   {}\n", render_markup(&card.message, target)));
    }
    output
}

fn format_summary(summary: &Summary) -> String {
    format!(
        "Total Errors: {}\nUnique Errors: {}\nUnique Forbidden Features: {}",
        summary.total, summary.unique_categories, summary.unique_forbidden
    )
}

/// Format a failed check so it is never mistaken for an empty result
pub fn format_failure(kind: FailureKind, message: &str, color: bool) -> String {
    let heading = format!("Check failed ({})", kind);
    let heading = if color {
        heading.red().bold().to_string()
    } else {
        heading
    };
    format!("{}\n{}", heading, message)
}

/// JSON document with the raw records and their summary
pub fn format_json(violations: &[ViolationRecord]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&serde_json::json!({
        "violations": violations,
        "summary": Summary::of(violations),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;

    const PLAIN: TextOptions = TextOptions {
        color: false,
        theme: Theme::SolarizedDark,
    };

    #[test]
    fn test_empty_list_looks_good() {
        assert_eq!(render(&[]), View::LooksGood);
        assert_eq!(format_text(&[], PLAIN), "Error Summary:\nLooks good :)");
    }

    #[test]
    fn test_forbidden_card() {
        let list = vec![ViolationRecord::new(
            "[FORBIDDEN] Unused Import",
            12,
            1,
            "Remove this",
            "   import foo;  \n",
        )];

        let View::Cards(cards) = render(&list) else {
            panic!("expected cards");
        };
        assert_eq!(
            cards,
            vec![Card {
                title: "Unused Import".into(),
                forbidden: true,
                line: 12,
                code: "import foo;".into(),
                message: "Remove this".into(),
                occurrences: 1,
            }]
        );

        let text = format_text(&list, PLAIN);
        assert!(text.contains("1. FORBIDDEN: Unused Import (line 12)\n    import foo;\n   Remove this\n"));
        assert!(text.ends_with("Total Errors: 1\nUnique Errors: 1\nUnique Forbidden Features: 1"));
    }

    #[test]
    fn test_same_category_renders_separate_cards_in_order() {
        let list = vec![
            ViolationRecord::new("Long lines", 30, 2, "Too long", "a"),
            ViolationRecord::new("Long lines", 7, 2, "Too long", "b"),
        ];
        let View::Cards(cards) = render(&list) else {
            panic!("expected cards");
        };
        let lines: Vec<u32> = cards.iter().map(|c| c.line).collect();
        assert_eq!(lines, vec![30, 7]);

        let text = format_text(&list, PLAIN);
        let first = text.find("1. Long lines (line 30)").unwrap();
        let second = text.find("2. Long lines (line 7)").unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_message_tags_are_not_printed() {
        let list = vec![ViolationRecord::new(
            "[FORBIDDEN] Break",
            4,
            1,
            "Break is a [bold]forbidden[/bold] feature",
            "break;",
        )];
        let text = format_text(&list, PLAIN);
        assert!(text.contains("   Break is a forbidden feature\n"));

        let colored = format_text(
            &list,
            TextOptions {
                color: true,
                theme: Theme::Monokai,
            },
        );
        assert!(!colored.contains("[bold]"));
        assert!(colored.contains("forbidden"));
    }

    #[test]
    fn test_colored_output_highlights_code() {
        let list = vec![ViolationRecord::new("[FORBIDDEN] Break", 2, 1, "m", "break;")];
        let text = format_text(
            &list,
            TextOptions {
                color: true,
                theme: Theme::Monokai,
            },
        );
        assert!(text.contains("\x1b["));
        assert!(text.contains("FORBIDDEN: Break"));
        assert!(text.contains("break"));
    }

    #[test]
    fn test_failure_is_visible() {
        let err = FetchError::malformed("invalid JSON: expected value at line 1 column 1");
        assert_eq!(
            format_failure(err.kind(), &err.to_string(), false),
            "Check failed (malformed response)\nMalformed response: invalid JSON: expected value at line 1 column 1"
        );
    }

    #[test]
    fn test_json_output() {
        let list = vec![ViolationRecord::new("Var", 1, 1, "m", "var x;")];
        let value: serde_json::Value = serde_json::from_str(&format_json(&list).unwrap()).unwrap();
        assert_eq!(value["violations"][0]["category"], "Var");
        assert_eq!(value["violations"][0]["line_number"], 1);
        assert_eq!(value["summary"]["total"], 1);
    }
}
