//! The modal/iframe host the editor runs inside.

use std::sync::{Mutex, PoisonError};

/// Side effects the editor asks of its host page.
pub trait Shell: Send + Sync {
    /// Replace the document shown in frame `frame_id` with `markup`.
    fn show_preview(&self, frame_id: &str, markup: &str);

    /// Hide the modal dialog named `modal`.
    fn hide_modal(&self, modal: &str);

    /// Reload the document of frame `frame_id` from its current source.
    fn reload_frame(&self, frame_id: &str);
}

/// A shell request, as captured by [`RecordingShell`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    ShowPreview { frame_id: String, markup: String },
    HideModal(String),
    ReloadFrame(String),
}

/// A [`Shell`] that performs nothing and records every request, for headless
/// hosts and tests.
#[derive(Debug, Default)]
pub struct RecordingShell {
    commands: Mutex<Vec<ShellCommand>>,
}

impl RecordingShell {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn commands(&self) -> Vec<ShellCommand> {
        self.commands
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The markup most recently shown in `frame_id`.
    #[must_use]
    pub fn shown(&self, frame_id: &str) -> Option<String> {
        self.commands().into_iter().rev().find_map(|c| match c {
            ShellCommand::ShowPreview { frame_id: f, markup } if f == frame_id => Some(markup),
            _ => None,
        })
    }

    fn record(&self, command: ShellCommand) {
        self.commands
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(command);
    }
}

impl Shell for RecordingShell {
    fn show_preview(&self, frame_id: &str, markup: &str) {
        self.record(ShellCommand::ShowPreview {
            frame_id: frame_id.to_owned(),
            markup: markup.to_owned(),
        });
    }

    fn hide_modal(&self, modal: &str) {
        self.record(ShellCommand::HideModal(modal.to_owned()));
    }

    fn reload_frame(&self, frame_id: &str) {
        self.record(ShellCommand::ReloadFrame(frame_id.to_owned()));
    }
}
