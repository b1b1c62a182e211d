use super::state::Failure;
use crate::theme::Theme;
use crate::types::ViolationList;
use std::path::PathBuf;

const MAX_TAB_SIZE: u8 = 16;

/// All inputs to the session state machine
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    /// Replace the whole editor text
    Edit(String),
    /// Append one typed line to the editor
    AppendLine(String),
    /// Replace the editor text with a file's contents
    Load(PathBuf),
    Clear,
    Show,

    /// Submit the current editor text
    Submit,
    /// Outcome of a finished submission
    Response {
        id: u64,
        outcome: Result<ViolationList, Failure>,
    },
    /// Close the results panel
    Dismiss,

    SetTheme(Theme),
    ListThemes,
    SetTabSize(u8),
    SetFontSize(u16),
    ToggleHelp,

    /// Input that could not be understood
    Invalid(String),
    Quit,
}

/// Parse one line of interactive input.
///
/// Lines starting with `:` are commands, `::` escapes a literal colon and
/// everything else is source text.
pub fn parse_line(line: &str) -> Message {
    if let Some(rest) = line.strip_prefix("::") {
        return Message::AppendLine(format!(":{}", rest));
    }
    let Some(command) = line.strip_prefix(':') else {
        return Message::AppendLine(line.to_string());
    };

    let command = command.trim();
    let (name, arg) = match command.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (command, ""),
    };

    match name {
        "check" | "c" => Message::Submit,
        "show" => Message::Show,
        "clear" => Message::Clear,
        "load" if arg.is_empty() => Message::Invalid("usage: :load PATH".into()),
        "load" => Message::Load(PathBuf::from(arg)),
        "theme" => match arg.parse::<Theme>() {
            Ok(theme) => Message::SetTheme(theme),
            Err(e) => Message::Invalid(e),
        },
        "themes" => Message::ListThemes,
        "tab" => match arg.parse::<u8>() {
            Ok(n) if (1..=MAX_TAB_SIZE).contains(&n) => Message::SetTabSize(n),
            _ => Message::Invalid(format!(
                "invalid tab size '{}' (expected 1-{})",
                arg, MAX_TAB_SIZE
            )),
        },
        "font" => match arg.parse::<u16>() {
            Ok(n) if n > 0 => Message::SetFontSize(n),
            _ => Message::Invalid(format!("invalid font size '{}'", arg)),
        },
        "dismiss" => Message::Dismiss,
        "help" | "h" => Message::ToggleHelp,
        "quit" | "q" => Message::Quit,
        other => Message::Invalid(format!(
            "unknown command ':{}' (type :help for a list)",
            other
        )),
    }
}
