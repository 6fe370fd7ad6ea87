//! Editing of interactive-widget rules for one state of a branching
//! exploration.
//!
//! A [`RuleSetEditor`] holds the widget configured for a state together with
//! its [`Ruleset`]: per-action, ordered [`Rule`]s that route a learner's answer
//! to a destination state. Edits go through the editor, which resolves
//! destination names, creates new states on demand, and writes the whole
//! configuration back to a [`StateStore`] after every change.

mod classify;
mod config;
mod editor;
mod error;
mod preview;
mod resolve;
mod shell;
mod store;
pub mod template;
mod types;
mod warnings;

pub use classify::{classify, Predicate};
pub use config::EditorConfig;
pub use editor::{EditorBuilder, RuleDraft, RuleSetEditor, SaveOutcome, NEW_STATE_LABEL};
pub use error::EditorError;
pub use preview::{
    PendingPreview, PreviewError, PreviewRequest, PreviewResponse, PreviewSequencer,
    PreviewService, PreviewTicket,
};
pub use resolve::DestinationResolver;
pub use shell::{RecordingShell, Shell, ShellCommand};
pub use store::{BoxFuture, MemoryStateStore, StateStore, StoreError, StoreResult};
pub use types::{
    ClassifyError, EditSession, ParamChange, Rule, Ruleset, RulesetError, State, StateRecord,
    StateRegistry, Widget, WidgetSelection,
};
pub use warnings::{WarningLog, WarningSink};
