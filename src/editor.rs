//! The rule-set editor: owns the rules of one state's interactive widget and
//! keeps the state data store in sync with every edit.

use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::config::EditorConfig;
use crate::error::EditorError;
use crate::preview::{PendingPreview, PreviewRequest, PreviewResponse, PreviewSequencer, PreviewService};
use crate::resolve::DestinationResolver;
use crate::shell::{RecordingShell, Shell};
use crate::store::StateStore;
use crate::warnings::{WarningLog, WarningSink};
use crate::{
    EditSession, ParamChange, Rule, Ruleset, StateRecord, StateRegistry, Widget, WidgetSelection,
};

/// Label shown for the new-state sentinel in destination pickers.
pub const NEW_STATE_LABEL: &str = "Add New State...";

/// The values of a rule dialog at the moment the author confirms it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleDraft {
    /// Predicate kind; `None` or empty means the author backed out.
    pub rule: Option<String>,
    pub attrs: Map<String, Value>,
    pub inputs: Map<String, Value>,
    /// A state id, the terminal marker, or the new-state sentinel.
    pub dest: String,
    /// Name of the state to create when `dest` is the sentinel.
    pub new_dest: String,
    pub feedback: String,
    pub param_changes: Vec<ParamChange>,
}

/// How [`RuleSetEditor::save_rule`] ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The rule was stored at `index` of `action` and the ruleset persisted.
    Saved { action: String, index: usize },
    /// No predicate was chosen; the dialog was closed without changes.
    Cancelled,
    /// Validation failed and a warning was issued. The dialog stays open.
    Rejected,
}

/// Builder for a [`RuleSetEditor`].
///
/// The store and preview service are required; the state registry defaults to
/// empty, warnings to a fresh [`WarningLog`] and the shell to a
/// [`RecordingShell`].
pub struct EditorBuilder {
    state_id: String,
    store: Arc<dyn StateStore>,
    preview: Arc<dyn PreviewService>,
    states: StateRegistry,
    warnings: Option<Arc<dyn WarningSink>>,
    shell: Option<Arc<dyn Shell>>,
    config: EditorConfig,
    param_changes: Vec<ParamChange>,
}

impl EditorBuilder {
    #[must_use]
    pub fn new(state_id: &str, store: Arc<dyn StateStore>, preview: Arc<dyn PreviewService>) -> Self {
        Self {
            state_id: state_id.to_owned(),
            store,
            preview,
            states: StateRegistry::new(),
            warnings: None,
            shell: None,
            config: EditorConfig::default(),
            param_changes: Vec::new(),
        }
    }

    /// The exploration's states, used to resolve destination names.
    #[must_use]
    pub fn states(mut self, states: StateRegistry) -> Self {
        self.states = states;
        self
    }

    #[must_use]
    pub fn warnings(mut self, warnings: Arc<dyn WarningSink>) -> Self {
        self.warnings = Some(warnings);
        self
    }

    #[must_use]
    pub fn shell(mut self, shell: Arc<dyn Shell>) -> Self {
        self.shell = Some(shell);
        self
    }

    #[must_use]
    pub fn config(mut self, config: EditorConfig) -> Self {
        self.config = config;
        self
    }

    /// Parameter changes of the edited state, sent along with preview requests.
    #[must_use]
    pub fn param_changes(mut self, changes: Vec<ParamChange>) -> Self {
        self.param_changes = changes;
        self
    }

    #[must_use]
    pub fn build(self) -> RuleSetEditor {
        RuleSetEditor {
            config: self.config,
            state_id: self.state_id,
            states: self.states,
            store: self.store,
            preview: self.preview,
            warnings: self
                .warnings
                .unwrap_or_else(|| Arc::new(WarningLog::new())),
            shell: self.shell.unwrap_or_else(|| Arc::new(RecordingShell::new())),
            widget: Widget::default(),
            params: Map::new(),
            rulesets: Ruleset::new(),
            param_changes: self.param_changes,
            session: EditSession::default(),
            previews: PreviewSequencer::new(),
        }
    }
}

/// Editor for the interactive widget of a single state.
///
/// Every structural change (adding, editing, reordering or deleting a rule,
/// swapping the widget, saving its parameters) is followed by a full write of
/// the widget id, parameters and ruleset to the [`StateStore`]. Operations take
/// `&mut self`, so at most one runs at a time.
pub struct RuleSetEditor {
    config: EditorConfig,
    state_id: String,
    states: StateRegistry,
    store: Arc<dyn StateStore>,
    preview: Arc<dyn PreviewService>,
    warnings: Arc<dyn WarningSink>,
    shell: Arc<dyn Shell>,
    widget: Widget,
    params: Map<String, Value>,
    rulesets: Ruleset,
    param_changes: Vec<ParamChange>,
    session: EditSession,
    previews: PreviewSequencer,
}

impl RuleSetEditor {
    #[must_use]
    pub fn builder(
        state_id: &str,
        store: Arc<dyn StateStore>,
        preview: Arc<dyn PreviewService>,
    ) -> EditorBuilder {
        EditorBuilder::new(state_id, store, preview)
    }

    /// Id of the state whose widget is being edited.
    #[must_use]
    pub fn state_id(&self) -> &str {
        &self.state_id
    }

    #[must_use]
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    #[must_use]
    pub fn states(&self) -> &StateRegistry {
        &self.states
    }

    /// The widget as last previewed or selected.
    #[must_use]
    pub fn widget(&self) -> &Widget {
        &self.widget
    }

    #[must_use]
    pub fn params(&self) -> &Map<String, Value> {
        &self.params
    }

    /// Parameters being edited; call [`save_widget_params`](Self::save_widget_params)
    /// to preview and persist them.
    pub fn params_mut(&mut self) -> &mut Map<String, Value> {
        &mut self.params
    }

    #[must_use]
    pub fn rulesets(&self) -> &Ruleset {
        &self.rulesets
    }

    #[must_use]
    pub fn session(&self) -> &EditSession {
        &self.session
    }

    /// Scratch fields of the open dialog, for two-way binding.
    pub fn session_mut(&mut self) -> &mut EditSession {
        &mut self.session
    }

    #[must_use]
    pub fn param_changes(&self) -> &[ParamChange] {
        &self.param_changes
    }

    pub fn set_param_changes(&mut self, changes: Vec<ParamChange>) {
        self.param_changes = changes;
    }

    /// The record [`persist`](Self::persist) would write.
    #[must_use]
    pub fn record(&self) -> StateRecord {
        StateRecord {
            widget_id: self.widget.id.clone(),
            params: self.params.clone(),
            rulesets: self.rulesets.clone(),
        }
    }

    // -- Loading & persistence ----------------------------------------------

    /// Seed the editor from the store and request a preview of the stored
    /// widget.
    ///
    /// Returns `false` if the state has no widget configured yet.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError`] if the store or the preview service fails.
    pub async fn load(&mut self) -> Result<bool, EditorError> {
        let loaded = self.store.load_state(&self.state_id).await;
        let record = match loaded {
            Ok(Some(record)) => record,
            Ok(None) => {
                log::debug!("state '{}' has no interactive widget yet", self.state_id);
                return Ok(false);
            }
            Err(e) => return Err(self.report("Could not load state", e)),
        };

        log::info!(
            "loaded widget '{}' with {} for state '{}'",
            record.widget_id,
            record.rulesets,
            self.state_id
        );
        self.widget = Widget::new(record.widget_id.clone());
        self.params = record.params.clone();
        self.rulesets = record.rulesets;
        self.refresh_preview(&record.widget_id, record.params).await?;
        Ok(true)
    }

    /// Write widget id, parameters and the whole ruleset to the store.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::Store`] if the write fails. The failure is also
    /// reported to the warning sink; in-memory state is kept as is.
    pub async fn persist(&self) -> Result<(), EditorError> {
        let record = self.record();
        match self.store.save_state(&self.state_id, &record).await {
            Ok(()) => {
                log::debug!("persisted {} for state '{}'", record.rulesets, self.state_id);
                Ok(())
            }
            Err(e) => Err(self.report("Could not save state", e)),
        }
    }

    // -- Preview ------------------------------------------------------------

    /// Issue a preview request for `widget_id` rendered with `params`.
    ///
    /// Issuing a request makes every earlier pending preview stale.
    pub fn begin_preview(&mut self, widget_id: &str, params: Map<String, Value>) -> PendingPreview {
        PendingPreview {
            ticket: self.previews.issue(),
            request: PreviewRequest {
                widget_id: widget_id.to_owned(),
                params,
                state_params: self.param_changes.clone(),
            },
        }
    }

    /// Apply the service's response to `pending`: show the markup and make
    /// the returned widget and the request's parameters the previewed
    /// configuration.
    ///
    /// Returns `false`, changing nothing, if a newer preview has been issued
    /// since.
    pub fn apply_preview(&mut self, pending: PendingPreview, response: PreviewResponse) -> bool {
        if !self.previews.is_current(pending.ticket) {
            log::debug!(
                "discarding stale preview #{} of widget '{}'",
                pending.ticket.sequence(),
                pending.request.widget_id
            );
            return false;
        }
        self.shell
            .show_preview(&self.config.preview_frame, &response.widget.raw);
        self.widget = response.widget;
        self.params = pending.request.params;
        true
    }

    /// Render `widget_id` with `params` and show the result.
    ///
    /// Returns whether the response was applied.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::Preview`] if the service fails; the failure is
    /// also reported to the warning sink.
    pub async fn refresh_preview(
        &mut self,
        widget_id: &str,
        params: Map<String, Value>,
    ) -> Result<bool, EditorError> {
        let pending = self.begin_preview(widget_id, params);
        let rendered = self.preview.render(&pending.request).await;
        match rendered {
            Ok(response) => Ok(self.apply_preview(pending, response)),
            Err(e) => Err(self.report("Could not render widget preview", e)),
        }
    }

    /// Preview the current parameters and persist them.
    ///
    /// The configuration is persisted even when the preview fails.
    ///
    /// # Errors
    ///
    /// Returns the persistence error if any, otherwise the preview error.
    pub async fn save_widget_params(&mut self) -> Result<(), EditorError> {
        let widget_id = self.widget.id.clone();
        let params = self.params.clone();
        let previewed = self.refresh_preview(&widget_id, params).await;
        self.persist().await?;
        previewed.map(|_| ())
    }

    // -- Widget selection ---------------------------------------------------

    /// React to the author picking a widget in the repository.
    ///
    /// A different widget type replaces the widget and its parameters and
    /// resets the ruleset to a single default rule looping back to this
    /// state. The same type leaves the ruleset untouched. Either way the
    /// configuration is persisted once.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::Store`] if persisting fails.
    pub async fn on_widget_selected(&mut self, selection: WidgetSelection) -> Result<(), EditorError> {
        self.shell
            .show_preview(&self.config.preview_frame, &selection.raw);
        self.shell.hide_modal(&self.config.widget_modal);
        // The markup shown now comes from the selection; drop in-flight previews.
        self.previews.issue();

        if self.widget.id != selection.widget.id {
            log::info!(
                "widget of state '{}' changed from '{}' to '{}'; resetting rules",
                self.state_id,
                self.widget.id,
                selection.widget.id
            );
            self.params = selection.widget.params.clone();
            self.widget = selection.widget;
            self.rulesets = Ruleset::with_default(
                &self.config.default_action,
                &self.config.default_rule,
                &self.state_id,
            );
            self.session = EditSession::default();
        }

        self.persist().await
    }

    /// The widget repository dialog was closed; reload its frame so the next
    /// opening starts fresh.
    pub fn on_widget_modal_hidden(&self) {
        self.shell.reload_frame(&self.config.repository_frame);
    }

    // -- Rule dialog --------------------------------------------------------

    /// Open the dialog to add a rule to `action`, discarding any open dialog.
    pub fn open_add_rule(&mut self, action: &str) {
        self.session = EditSession {
            action: Some(action.to_owned()),
            ..EditSession::default()
        };
    }

    /// Open the dialog to edit rule `index` of `action`, discarding any open
    /// dialog.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::Ruleset`] if there is no such rule.
    pub fn open_edit_rule(&mut self, action: &str, index: usize) -> Result<(), EditorError> {
        let rule = self.rulesets.rule_at(action, index)?.clone();
        self.session = EditSession {
            action: Some(action.to_owned()),
            index: Some(index),
            rule: Some(rule.kind),
            attrs: rule.attrs,
            inputs: rule.inputs,
            dest: Some(rule.dest),
            new_dest: String::new(),
            feedback: rule.feedback,
            param_changes: rule.param_changes,
        };
        Ok(())
    }

    /// Choose the predicate of the open dialog. Other rule fields are reset
    /// and the destination defaults to the edited state.
    pub fn select_rule(&mut self, kind: &str, attrs: Map<String, Value>) {
        self.session.clear_rule();
        self.session.rule = Some(kind.to_owned());
        self.session.attrs = attrs;
        self.session.dest = Some(self.state_id.clone());
    }

    /// Clear the rule fields of the open dialog.
    pub fn deselect_all_rules(&mut self) {
        self.session.clear_rule();
    }

    /// Close the dialog without saving.
    pub fn close_rule_dialog(&mut self) {
        self.session = EditSession::default();
    }

    /// Save the open dialog's current values. See [`save_rule`](Self::save_rule).
    ///
    /// # Errors
    ///
    /// As [`save_rule`](Self::save_rule).
    pub async fn save_session(&mut self) -> Result<SaveOutcome, EditorError> {
        let session = &self.session;
        let draft = RuleDraft {
            rule: session.rule.clone(),
            attrs: session.attrs.clone(),
            inputs: session.inputs.clone(),
            dest: session.dest.clone().unwrap_or_default(),
            new_dest: session.new_dest.clone(),
            feedback: session.feedback.clone(),
            param_changes: session.param_changes.clone(),
        };
        self.save_rule(draft).await
    }

    /// Store `draft` in the open dialog's action: in place when editing,
    /// otherwise just before the action's default rule.
    ///
    /// When the destination is the new-state sentinel, `new_dest` names the
    /// target. A name matching an existing state routes there; otherwise the
    /// state is created first and the rule saved only once creation succeeded.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::NoOpenSession`] if no dialog is open,
    /// [`EditorError::Store`] if creating the state or persisting fails, and
    /// [`EditorError::Ruleset`] if the edited rule no longer exists. A failed
    /// state creation leaves the ruleset and the dialog unchanged.
    pub async fn save_rule(&mut self, draft: RuleDraft) -> Result<SaveOutcome, EditorError> {
        let Some(kind) = draft.rule.filter(|k| !k.is_empty()) else {
            self.session = EditSession::default();
            return Ok(SaveOutcome::Cancelled);
        };
        let action = self.session.action.clone().ok_or(EditorError::NoOpenSession)?;

        let mut rule = Rule {
            kind,
            attrs: draft.attrs,
            inputs: draft.inputs,
            dest: draft.dest,
            feedback: draft.feedback,
            param_changes: draft.param_changes,
        };

        if let Some(index) = self.session.index {
            // Checked before any state is created so a bad index leaves nothing behind.
            self.rulesets.rule_at(&action, index)?;
        }

        if rule.dest.is_empty() {
            self.warnings.add_warning("Please choose a destination.");
            return Ok(SaveOutcome::Rejected);
        }

        if rule.dest == self.config.new_state_sentinel {
            let name = draft.new_dest.trim();
            if name.is_empty() {
                self.warnings
                    .add_warning("Error: destination state is empty.");
                return Ok(SaveOutcome::Rejected);
            }
            let existing = self.resolver().resolve(name, true);
            match existing {
                Some(id) => rule.dest = id,
                None => {
                    let created = self.store.create_state(name).await;
                    let state = match created {
                        Ok(state) => state,
                        Err(e) => return Err(self.report("Could not create state", e)),
                    };
                    log::info!("created state {state} as destination of a '{action}' rule");
                    rule.dest = state.id.clone();
                    self.states.insert(state);
                }
            }
        } else if !self.is_known_destination(&rule.dest) {
            self.warnings
                .add_warning(&format!("Invalid destination: {}", rule.dest));
            return Ok(SaveOutcome::Rejected);
        }

        self.commit_rule(&action, rule).await
    }

    async fn commit_rule(&mut self, action: &str, rule: Rule) -> Result<SaveOutcome, EditorError> {
        let index = match self.session.index {
            Some(index) => {
                self.rulesets.replace(action, index, rule)?;
                index
            }
            None => self.rulesets.insert(action, rule),
        };
        log::debug!("saved rule {index} of '{action}'");

        self.shell.hide_modal(&self.config.add_rule_modal);
        self.session = EditSession::default();
        self.persist().await?;
        Ok(SaveOutcome::Saved {
            action: action.to_owned(),
            index,
        })
    }

    // -- Rule list ----------------------------------------------------------

    /// Exchange rules `i` and `j` of `action` and persist. An open dialog
    /// editing one of the two rules follows it to its new position.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::Ruleset`] for an unknown action or index, in
    /// which case nothing is persisted, or [`EditorError::Store`].
    pub async fn swap_rules(&mut self, action: &str, i: usize, j: usize) -> Result<(), EditorError> {
        self.rulesets.swap(action, i, j)?;
        log::debug!("swapped rules {i} and {j} of '{action}'");
        if self.session.action.as_deref() == Some(action) {
            self.session.index = self.session.index.map(|index| {
                if index == i {
                    j
                } else if index == j {
                    i
                } else {
                    index
                }
            });
        }
        self.persist().await
    }

    /// Delete rule `index` of `action` and persist. Returns the removed rule.
    ///
    /// An open dialog editing the deleted rule is closed; one editing a later
    /// rule of the same action is moved up with it.
    ///
    /// # Errors
    ///
    /// As [`swap_rules`](Self::swap_rules).
    pub async fn delete_rule(&mut self, action: &str, index: usize) -> Result<Rule, EditorError> {
        let removed = self.rulesets.remove(action, index)?;
        log::debug!("deleted rule {index} ({removed}) of '{action}'");
        if self.session.action.as_deref() == Some(action) {
            match self.session.index {
                Some(edited) if edited == index => {
                    log::debug!("closing the dialog of deleted rule {index} of '{action}'");
                    self.shell.hide_modal(&self.config.add_rule_modal);
                    self.session = EditSession::default();
                }
                Some(edited) if edited > index => self.session.index = Some(edited - 1),
                _ => {}
            }
        }
        self.persist().await?;
        Ok(removed)
    }

    /// Classify a learner's answer against the current rules of `action`.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::Classify`] for a malformed rule.
    pub fn classify(&self, action: &str, answer: &str) -> Result<Option<&Rule>, EditorError> {
        Ok(self.rulesets.classify(action, answer)?)
    }

    // -- Destinations -------------------------------------------------------

    /// Resolve a destination display name; see [`DestinationResolver`].
    #[must_use]
    pub fn resolve_destination(&self, name: &str, suppress_warnings: bool) -> Option<String> {
        self.resolver().resolve(name, suppress_warnings)
    }

    /// Display name of state `id`; the terminal marker names itself.
    #[must_use]
    pub fn state_name(&self, id: &str) -> Option<&str> {
        if id == self.config.terminal {
            Some(self.config.terminal.as_str())
        } else {
            self.states.get(id).map(|s| s.name.as_str())
        }
    }

    /// Like [`state_name`](Self::state_name), with a label for the new-state
    /// sentinel.
    #[must_use]
    pub fn dest_name(&self, id: &str) -> Option<&str> {
        if id == self.config.new_state_sentinel {
            Some(NEW_STATE_LABEL)
        } else {
            self.state_name(id)
        }
    }

    /// Ids of all states followed by the terminal marker.
    #[must_use]
    pub fn all_states(&self) -> Vec<&str> {
        self.states
            .ids()
            .chain(std::iter::once(self.config.terminal.as_str()))
            .collect()
    }

    /// [`all_states`](Self::all_states) followed by the new-state sentinel.
    #[must_use]
    pub fn all_dests(&self) -> Vec<&str> {
        let mut dests = self.all_states();
        dests.push(&self.config.new_state_sentinel);
        dests
    }

    fn is_known_destination(&self, dest: &str) -> bool {
        dest == self.config.terminal || dest == self.state_id || self.states.contains(dest)
    }

    fn resolver(&self) -> DestinationResolver<'_> {
        DestinationResolver::new(&self.states, &self.config.terminal, self.warnings.as_ref())
    }

    fn report(&self, context: &str, err: impl Into<EditorError> + fmt::Display) -> EditorError {
        self.warnings.add_warning(&format!("{context}: {err}"));
        err.into()
    }
}

impl fmt::Debug for RuleSetEditor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleSetEditor")
            .field("state_id", &self.state_id)
            .field("widget", &self.widget.id)
            .field("rulesets", &self.rulesets)
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}
