use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An interactive widget instance: its type id, configured parameters and,
/// once rendered by the preview service, its markup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Widget {
    pub id: String,
    #[serde(default)]
    pub params: Map<String, Value>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub raw: String,
}

impl Widget {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_param(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.params.insert(name.to_owned(), value.into());
        self
    }
}

/// Notification sent by the widget repository when the author picks a widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidgetSelection {
    pub widget: Widget,
    /// Rendered markup to show in the preview frame.
    #[serde(default)]
    pub raw: String,
}
