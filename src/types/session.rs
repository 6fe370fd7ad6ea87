use serde_json::{Map, Value};

use super::rule::ParamChange;

/// Scratch state of the single open "add/edit rule" dialog.
///
/// `index` is `None` while creating a new rule and `Some` while editing an
/// existing one. All other fields are the unconfirmed values of the rule.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditSession {
    pub action: Option<String>,
    pub index: Option<usize>,
    pub rule: Option<String>,
    pub attrs: Map<String, Value>,
    pub inputs: Map<String, Value>,
    pub dest: Option<String>,
    /// Name typed for a destination state that does not exist yet.
    pub new_dest: String,
    pub feedback: String,
    pub param_changes: Vec<ParamChange>,
}

impl EditSession {
    /// Title of the dialog for this session.
    #[must_use]
    pub fn title(&self) -> &'static str {
        if self.index.is_some() {
            "Edit Rule"
        } else {
            "Add Rule"
        }
    }

    /// Whether a dialog is open at all.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.action.is_some()
    }

    /// Drop the rule fields while keeping the action and index the dialog
    /// was opened for.
    pub(crate) fn clear_rule(&mut self) {
        *self = Self {
            action: self.action.take(),
            index: self.index,
            ..Self::default()
        };
    }
}
