use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::ruleset::Ruleset;

/// The interactive-widget configuration of one state, as read from and
/// written to the state data store.
///
/// Writes replace the whole record; there are no partial updates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StateRecord {
    #[serde(rename = "interactive_widget")]
    pub widget_id: String,
    #[serde(rename = "interactive_params", default)]
    pub params: Map<String, Value>,
    #[serde(rename = "interactive_rulesets", default)]
    pub rulesets: Ruleset,
}
