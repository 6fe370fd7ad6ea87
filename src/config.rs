use serde::Deserialize;

/// Names and markers the editor uses when talking to its host and store.
///
/// Every field has a default, so a partial JSON document is enough to
/// override a single value.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Display name and id of the terminal pseudo-state.
    pub terminal: String,
    /// Destination value meaning "create a new state".
    pub new_state_sentinel: String,
    /// Action the default rule is filed under after a widget swap.
    pub default_action: String,
    /// Predicate of the default rule.
    pub default_rule: String,
    pub add_rule_modal: String,
    pub widget_modal: String,
    pub preview_frame: String,
    pub repository_frame: String,
    /// Path prefix of the preview service, followed by the widget id.
    pub preview_path: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            terminal: "END".to_owned(),
            new_state_sentinel: "?".to_owned(),
            default_action: "submit".to_owned(),
            default_rule: "Default".to_owned(),
            add_rule_modal: "addRuleModal".to_owned(),
            widget_modal: "interactiveWidgetModal".to_owned(),
            preview_frame: "interactiveWidgetPreview".to_owned(),
            repository_frame: "interactiveWidgetRepository".to_owned(),
            preview_path: "/interactive_widgets/".to_owned(),
        }
    }
}

impl EditorConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON configuration document, filling gaps with defaults.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error if the document is malformed.
    pub fn from_json(input: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(input)
    }

    #[must_use]
    pub fn with_terminal(mut self, terminal: &str) -> Self {
        self.terminal = terminal.to_owned();
        self
    }

    #[must_use]
    pub fn with_new_state_sentinel(mut self, sentinel: &str) -> Self {
        self.new_state_sentinel = sentinel.to_owned();
        self
    }

    #[must_use]
    pub fn with_default_action(mut self, action: &str) -> Self {
        self.default_action = action.to_owned();
        self
    }

    #[must_use]
    pub fn with_preview_path(mut self, prefix: &str) -> Self {
        self.preview_path = prefix.to_owned();
        self
    }
}
