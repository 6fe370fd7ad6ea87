use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::classify::Predicate;
use crate::template::{self, TemplateError};

/// A single classification rule attached to one action of a widget.
///
/// Rules are evaluated top-to-bottom within their action; the first rule whose
/// predicate accepts the learner's answer decides the destination state, the
/// feedback shown and the parameter changes applied on transition.
///
/// The JSON shape matches the stored state record: the predicate kind lives
/// under `rule` and parameter changes under `paramChanges`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    /// Name of the comparison predicate, e.g. `"Equals"` or `"Default"`.
    #[serde(rename = "rule")]
    pub kind: String,
    #[serde(default)]
    pub attrs: Map<String, Value>,
    #[serde(default)]
    pub inputs: Map<String, Value>,
    /// Target state id, or the terminal marker.
    pub dest: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub feedback: String,
    #[serde(default)]
    pub param_changes: Vec<ParamChange>,
}

/// An exploration parameter mutation applied when a rule fires.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamChange {
    pub name: String,
    #[serde(default)]
    pub values: Vec<Value>,
}

impl Rule {
    /// Create a rule with the given predicate kind and destination and no
    /// inputs, feedback or parameter changes.
    #[must_use]
    pub fn new(kind: impl Into<String>, dest: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            attrs: Map::new(),
            inputs: Map::new(),
            dest: dest.into(),
            feedback: String::new(),
            param_changes: Vec::new(),
        }
    }

    /// Bind a predicate input, e.g. `x` for `Equals`.
    #[must_use]
    pub fn with_input(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.inputs.insert(name.to_owned(), value.into());
        self
    }

    #[must_use]
    pub fn with_feedback(mut self, feedback: impl Into<String>) -> Self {
        self.feedback = feedback.into();
        self
    }

    #[must_use]
    pub fn with_param_change(mut self, change: ParamChange) -> Self {
        self.param_changes.push(change);
        self
    }

    /// Render a human-readable description of the predicate with its inputs
    /// substituted, e.g. `starts with "abc"`.
    ///
    /// Unknown predicate kinds are described by their raw name.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError`] if an input referenced by the description is
    /// not bound on this rule.
    pub fn describe(&self) -> Result<String, TemplateError> {
        let Ok(predicate) = self.kind.parse::<Predicate>() else {
            return Ok(self.kind.clone());
        };
        template::parse(predicate.description())?.render(&self.inputs)
    }
}

impl ParamChange {
    #[must_use]
    pub fn new(name: impl Into<String>, values: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.kind, self.dest)
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
