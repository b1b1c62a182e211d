//! Style tags in service messages
//!
//! Messages may carry rich-text tags such as `[bold]forbidden[/bold]` or
//! `[blue]Main.java[/blue]`. Known tags are turned into terminal styles,
//! Markdown emphasis, or removed. Anything else in brackets (`arr[i]`) is
//! left untouched.

use crossterm::style::Stylize;

const TAGS: [&str; 7] = ["bold", "italic", "blue", "green", "red", "yellow", "purple"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Plain,
    Terminal,
    Markdown,
}

/// Render a tagged message for `target`
pub fn render_markup(text: &str, target: Target) -> String {
    let mut output = String::with_capacity(text.len());
    let mut active: Vec<&'static str> = Vec::new();
    let mut rest = text;

    while let Some(start) = rest.find('[') {
        let (before, tail) = rest.split_at(start);
        push_segment(&mut output, before, &active, target);

        let Some((tag, closing, len)) = parse_tag(tail) else {
            push_segment(&mut output, "[", &active, target);
            rest = &tail[1..];
            continue;
        };

        if target == Target::Markdown {
            output.push_str(markdown_marker(tag));
        }
        if closing {
            if let Some(pos) = active.iter().rposition(|t| *t == tag) {
                active.remove(pos);
            }
        } else {
            active.push(tag);
        }
        rest = &tail[len..];
    }
    push_segment(&mut output, rest, &active, target);
    output
}

/// Parse a known tag at the start of `s`: (name, is closing, byte length)
fn parse_tag(s: &str) -> Option<(&'static str, bool, usize)> {
    let end = s.find(']')?;
    let inner = &s[1..end];
    let (closing, name) = match inner.strip_prefix('/') {
        Some(name) => (true, name),
        None => (false, inner),
    };
    let tag = *TAGS.iter().find(|t| **t == name)?;
    Some((tag, closing, end + 1))
}

fn markdown_marker(tag: &str) -> &'static str {
    match tag {
        "bold" => "**",
        "italic" => "_",
        _ => "",
    }
}

fn push_segment(output: &mut String, text: &str, active: &[&str], target: Target) {
    if text.is_empty() {
        return;
    }
    if target != Target::Terminal || active.is_empty() {
        output.push_str(text);
        return;
    }

    let mut styled = text.stylize();
    for tag in active {
        styled = match *tag {
            "bold" => styled.bold(),
            "italic" => styled.italic(),
            "blue" => styled.blue(),
            "green" => styled.green(),
            "red" => styled.red(),
            "yellow" => styled.yellow(),
            "purple" => styled.magenta(),
            _ => styled,
        };
    }
    output.push_str(&styled.to_string());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strip_markup(text: &str) -> String {
        render_markup(text, Target::Plain)
    }

    const BREAK: &str =
        "Break is a [bold]forbidden[/bold] feature. You are [italic]not[/italic] allowed to use it";

    #[test]
    fn test_strip() {
        assert_eq!(
            strip_markup(BREAK),
            "Break is a forbidden feature. You are not allowed to use it"
        );
        assert_eq!(
            strip_markup("[bold]Checking [blue]Main.java[/blue][/bold]"),
            "Checking Main.java"
        );
    }

    #[test]
    fn test_unknown_brackets_are_kept() {
        assert_eq!(strip_markup("use arr[i] not arr[]"), "use arr[i] not arr[]");
        assert_eq!(strip_markup("[FORBIDDEN] x [bold"), "[FORBIDDEN] x [bold");
    }

    #[test]
    fn test_markdown() {
        assert_eq!(
            render_markup(BREAK, Target::Markdown),
            "Break is a **forbidden** feature. You are _not_ allowed to use it"
        );
        assert_eq!(render_markup("[red]late[/red]", Target::Markdown), "late");
    }

    #[test]
    fn test_terminal_styles_only_tagged_text() {
        let out = render_markup("a [bold]b[/bold] c", Target::Terminal);
        assert!(out.starts_with("a \x1b["));
        assert!(out.ends_with(" c"));
        assert!(out.contains('b'));
        assert!(!out.contains("[bold]"));
    }
}
