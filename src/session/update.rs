use super::message::Message;
use super::state::{Phase, Session};
use crate::types::Submission;
use std::path::PathBuf;
use tracing::{debug, info};

/// Work the event loop performs after an update
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Send a submission to the checking service
    Fetch(Submission),
    /// Read a file and feed it back as an edit
    LoadFile(PathBuf),
    Draw(Screen),
    Quit,
}

/// What to print after an update
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Status(String),
    Error(String),
    Source,
    Results,
    Help,
    Themes,
}

/// Apply a message to the session
pub fn update(session: &mut Session, message: Message) -> Option<Action> {
    match message {
        Message::Edit(text) => {
            session.editor.edit(text);
            None
        }
        Message::AppendLine(line) => {
            session.editor.append_line(&line);
            None
        }
        Message::Load(path) => Some(Action::LoadFile(path)),
        Message::Clear => {
            session.editor.clear();
            Some(Action::Draw(Screen::Status("Editor cleared".into())))
        }
        Message::Show => Some(Action::Draw(Screen::Source)),

        Message::Submit => {
            let submission = session.submit();
            info!("Submitting {} bytes of source", submission.source.len());
            Some(Action::Fetch(submission))
        }
        Message::Response { id, outcome } => {
            if session.in_flight() != Some(id) {
                debug!("Discarding stale response for submission {}", id);
                return None;
            }
            let phase = match outcome {
                Ok(violations) => Phase::Succeeded(violations),
                Err(failure) => Phase::Failed(failure),
            };
            session.set_phase(phase);
            Some(Action::Draw(Screen::Results))
        }
        Message::Dismiss => match session.phase {
            Phase::Succeeded(_) | Phase::Failed(_) => {
                session.set_phase(Phase::Idle);
                Some(Action::Draw(Screen::Status("Results dismissed".into())))
            }
            _ => None,
        },

        Message::SetTheme(theme) => {
            session.editor.settings_mut().theme = theme;
            Some(Action::Draw(Screen::Status(format!(
                "Theme set to {}",
                theme.label()
            ))))
        }
        Message::ListThemes => Some(Action::Draw(Screen::Themes)),
        Message::SetTabSize(size) => {
            session.editor.settings_mut().tab_size = size;
            Some(Action::Draw(Screen::Status(format!(
                "Tab size set to {}",
                size
            ))))
        }
        Message::SetFontSize(size) => {
            session.editor.settings_mut().font_size = size;
            Some(Action::Draw(Screen::Status(format!(
                "Font size set to {}",
                size
            ))))
        }
        Message::ToggleHelp => {
            session.help.toggle();
            if session.help.is_open() {
                Some(Action::Draw(Screen::Help))
            } else {
                Some(Action::Draw(Screen::Status("Help closed".into())))
            }
        }

        Message::Invalid(reason) => Some(Action::Draw(Screen::Error(reason))),
        Message::Quit => Some(Action::Quit),
    }
}
