use super::message::{Message, parse_line};
use super::state::{Failure, Phase, Session};
use super::update::{Action, Screen, update};
use crate::fetch::CheckService;
use crate::help::HelpModal;
use crate::render::{self, TextOptions};
use crate::theme::Theme;
use anyhow::Context;
use std::io::Write;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Run the interactive editor on stdin/stdout
pub async fn run<S: CheckService>(
    session: Session,
    service: Arc<S>,
    color: bool,
) -> anyhow::Result<()> {
    let input = BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout();
    run_with_io(session, service, input, &mut stdout, color).await?;
    Ok(())
}

/// Event loop: reads input lines, applies them to the session, spawns one
/// fetch task per submission and prints whatever the update asks for.
/// When input ends, an in-flight submission is still awaited.
pub async fn run_with_io<S, R, W>(
    mut session: Session,
    service: Arc<S>,
    input: R,
    out: &mut W,
    color: bool,
) -> anyhow::Result<Session>
where
    S: CheckService,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let (tx, mut rx) = mpsc::unbounded_channel::<Message>();
    let mut lines = input.lines();
    let mut input_open = true;
    let mut in_flight: Option<JoinHandle<()>> = None;
    let mut quit = false;

    writeln!(out, "stylecheck editor (type :help for commands)")?;

    loop {
        let message = tokio::select! {
            line = lines.next_line(), if input_open => {
                match line.context("Failed to read input")? {
                    Some(line) => Some(parse_line(&line)),
                    None => {
                        debug!("Input closed");
                        input_open = false;
                        None
                    }
                }
            }
            Some(message) = rx.recv() => Some(message),
            _ = tokio::signal::ctrl_c() => {
                warn!("Received Ctrl+C, leaving editor");
                Some(Message::Quit)
            }
        };

        let Some(message) = message else {
            if session.in_flight().is_none() && rx.is_empty() {
                break;
            }
            debug!("Waiting for pending work before exiting");
            continue;
        };

        // Follow-up messages are applied before the next input line is read
        let mut pending = Some(message);
        while let Some(message) = pending.take() {
            match update(&mut session, message) {
                Some(Action::Fetch(submission)) => {
                    if let Some(handle) = in_flight.take() {
                        handle.abort();
                    }
                    writeln!(out, "Checking submission {}...", submission.id)?;

                    let service = service.clone();
                    let tx = tx.clone();
                    in_flight = Some(tokio::spawn(async move {
                        let id = submission.id;
                        let outcome = service.check(&submission).await.map_err(|e| {
                            warn!("Submission {} failed: {}", id, e);
                            Failure::from(&e)
                        });
                        // The receiver only goes away when the loop has exited
                        let _ = tx.send(Message::Response { id, outcome });
                    }));
                }
                Some(Action::LoadFile(path)) => {
                    pending = Some(match std::fs::read_to_string(&path) {
                        Ok(text) => {
                            writeln!(out, "Loaded {}", path.display())?;
                            Message::Edit(text)
                        }
                        Err(e) => {
                            Message::Invalid(format!("Failed to read {}: {}", path.display(), e))
                        }
                    });
                }
                Some(Action::Draw(screen)) => {
                    writeln!(out, "{}", draw(&session, &screen, color))?;
                }
                Some(Action::Quit) => {
                    quit = true;
                }
                None => {}
            }
        }
        out.flush()?;

        if quit {
            break;
        }

        if !input_open && session.in_flight().is_none() && rx.is_empty() {
            break;
        }
    }

    if let Some(handle) = in_flight.take() {
        handle.abort();
    }
    Ok(session)
}

/// Render a screen from the current session state
pub fn draw(session: &Session, screen: &Screen, color: bool) -> String {
    let settings = session.editor.settings();
    match screen {
        Screen::Status(text) => text.clone(),
        Screen::Error(text) => format!("error: {}", text),
        Screen::Source => session.editor.preview(),
        Screen::Help => HelpModal::render_with_usage(),
        Screen::Themes => Theme::ALL
            .iter()
            .map(|theme| {
                let marker = if *theme == settings.theme { '*' } else { ' ' };
                format!("{} {:<16} {}", marker, theme.name(), theme.label())
            })
            .collect::<Vec<_>>()
            .join("\n"),
        Screen::Results => match &session.phase {
            Phase::Idle => "No results yet (type :check)".to_string(),
            Phase::Submitting { submission_id } => {
                format!("Waiting for submission {}...", submission_id)
            }
            Phase::Succeeded(violations) => render::format_text(
                violations,
                TextOptions {
                    color,
                    theme: settings.theme,
                },
            ),
            Phase::Failed(failure) => {
                render::format_failure(failure.kind, &failure.message, color)
            }
        },
    }
}
