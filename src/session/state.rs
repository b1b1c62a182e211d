use crate::editor::EditorPanel;
use crate::error::{FailureKind, FetchError};
use crate::help::HelpModal;
use crate::types::{Submission, ViolationList};
use tracing::debug;

/// Why a submission failed, kept in a cloneable form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub kind: FailureKind,
    pub message: String,
}

impl From<&FetchError> for Failure {
    fn from(err: &FetchError) -> Self {
        Self {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

/// Lifecycle of the results panel
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Submitting { submission_id: u64 },
    Succeeded(ViolationList),
    Failed(Failure),
}

impl Phase {
    pub fn name(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Submitting { .. } => "submitting",
            Phase::Succeeded(_) => "succeeded",
            Phase::Failed(_) => "failed",
        }
    }
}

#[derive(Debug)]
pub struct Session {
    pub editor: EditorPanel,
    pub phase: Phase,
    pub help: HelpModal,
    next_id: u64,
}

impl Session {
    #[cfg(test)]
    pub fn new(settings: crate::editor::EditorSettings) -> Self {
        Self::with_editor(EditorPanel::new(settings))
    }

    /// Start a session around an already configured editor
    pub fn with_editor(editor: EditorPanel) -> Self {
        Self {
            editor,
            phase: Phase::Idle,
            help: HelpModal::default(),
            next_id: 1,
        }
    }

    /// Submission currently awaiting a response
    pub fn in_flight(&self) -> Option<u64> {
        match self.phase {
            Phase::Submitting { submission_id } => Some(submission_id),
            _ => None,
        }
    }

    /// Snapshot the editor into a new submission and enter `Submitting`.
    /// Finished results are dropped first, passing through `Idle`.
    pub fn submit(&mut self) -> Submission {
        if matches!(self.phase, Phase::Succeeded(_) | Phase::Failed(_)) {
            self.set_phase(Phase::Idle);
        }

        let submission = Submission {
            id: self.next_id,
            source: self.editor.text().to_string(),
            tab_size: self.editor.settings().tab_size,
        };
        self.next_id += 1;

        if let Some(previous) = self.in_flight() {
            debug!(
                "Submission {} supersedes in-flight submission {}",
                submission.id, previous
            );
        }
        self.set_phase(Phase::Submitting {
            submission_id: submission.id,
        });
        submission
    }

    pub fn set_phase(&mut self, phase: Phase) {
        debug!("Session phase: {} -> {}", self.phase.name(), phase.name());
        self.phase = phase;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::EditorSettings;

    #[test]
    fn test_submit_snapshots_source() {
        let mut session = Session::new(EditorSettings::default());
        session.editor.edit("class A {}");

        let submission = session.submit();
        session.editor.edit("class B {}");

        assert_eq!(submission.source, "class A {}");
        assert_eq!(submission.tab_size, 4);
        assert_eq!(session.in_flight(), Some(submission.id));
    }

    #[test]
    fn test_with_editor_keeps_text_and_listener() {
        use std::sync::{Arc, Mutex};

        let changes = Arc::new(Mutex::new(0));
        let counter = changes.clone();
        let mut editor = EditorPanel::new(EditorSettings::default())
            .on_change(move |_| *counter.lock().unwrap() += 1);
        editor.edit("class A {}");

        let mut session = Session::with_editor(editor);
        session.editor.append_line("class B {}");

        assert_eq!(session.phase, Phase::Idle);
        assert_eq!(session.editor.text(), "class A {}class B {}\n");
        assert_eq!(*changes.lock().unwrap(), 2);
        assert_eq!(session.submit().id, 1);
    }

    #[test]
    fn test_ids_increase() {
        let mut session = Session::new(EditorSettings::default());
        let first = session.submit();
        let second = session.submit();
        assert!(second.id > first.id);
        assert_eq!(session.in_flight(), Some(second.id));
    }

    #[test]
    fn test_submit_after_result_restarts() {
        let mut session = Session::new(EditorSettings::default());
        session.phase = Phase::Succeeded(vec![]);
        let submission = session.submit();
        assert_eq!(
            session.phase,
            Phase::Submitting {
                submission_id: submission.id
            }
        );
    }

    #[test]
    fn test_failure_from_fetch_error() {
        let failure = Failure::from(&FetchError::Timeout { secs: 5 });
        assert_eq!(failure.kind, FailureKind::Timeout);
        assert_eq!(failure.message, "Checking service did not answer within 5s");
    }
}
