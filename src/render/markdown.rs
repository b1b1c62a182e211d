use super::markup::{Target, render_markup};
use super::{Card, LOOKS_GOOD, View, render};
use crate::editor::SYNTAX_MODE;
use crate::types::{Summary, ViolationRecord};

/// Format violations as Markdown, one section per card
pub fn format_markdown(violations: &[ViolationRecord]) -> String {
    let mut output = String::from("# Error Summary\n\n");

    let cards = match render(violations) {
        View::LooksGood => {
            output.push_str(LOOKS_GOOD);
            output.push('\n');
            return output;
        }
        View::Cards(cards) => cards,
    };

    for card in &cards {
        output.push_str(&format_card(card));
    }

    let summary = Summary::of(violations);
    output.push_str(&format!(
        "---\n\n**Total Errors:** {}  \n**Unique Errors:** {}  \n**Unique Forbidden Features:** {}\n",
        summary.total, summary.unique_categories, summary.unique_forbidden
    ));
    output
}

fn format_card(card: &Card) -> String {
    let flag = if card.forbidden { " **FORBIDDEN**" } else { "" };
    let mut output = format!("## {} (line {}){}\n\n", card.title, card.line, flag);
    if !card.code.is_empty() {
        let backticks = get_fence_backticks(&card.code);
        output.push_str(&format!(
            "{}{}\n{}\n{}\n\n",
            backticks, SYNTAX_MODE, card.code, backticks
        ));
    }
    if !card.message.is_empty() {
        output.push_str(&format!(
            "{}\n\n",
            render_markup(card.message.trim(), Target::Markdown)
        ));
    }
    output
}

/// Get appropriate number of backticks for Markdown code fence
/// Returns at least 3 backticks, or more if content contains backtick sequences
fn get_fence_backticks(content: &str) -> String {
    const MIN_BACKTICKS: usize = 3;
    let max_backticks = content
        .as_bytes()
        .split(|&b| b != b'`')
        .filter(|s| !s.is_empty())
        .map(|s| s.len())
        .max()
        .unwrap_or(0);
    "`".repeat((max_backticks + 1).max(MIN_BACKTICKS))
}
