use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::{ClassifyError, RulesetError};
use super::rule::Rule;

/// Ordered classification rules for one widget, grouped by action.
///
/// Each action (e.g. `"submit"`) owns a list evaluated top-to-bottom. The last
/// rule in a list is the fallback, so [`insert`](Self::insert) places new
/// rules just before it rather than appending.
///
/// Serializes as a JSON object mapping action names to rule arrays.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ruleset {
    actions: BTreeMap<String, Vec<Rule>>,
}

impl Ruleset {
    /// Create an empty ruleset.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a ruleset holding a single fallback rule of kind `kind` for
    /// `action`, routing to `dest`.
    ///
    /// This is the ruleset a freshly chosen widget starts with.
    #[must_use]
    pub fn with_default(action: &str, kind: &str, dest: &str) -> Self {
        let mut actions = BTreeMap::new();
        actions.insert(action.to_owned(), vec![Rule::new(kind, dest)]);
        Self { actions }
    }

    /// Returns the rules of `action`, or `None` if the action has no list.
    #[must_use]
    pub fn rules(&self, action: &str) -> Option<&[Rule]> {
        self.actions.get(action).map(Vec::as_slice)
    }

    /// Returns the rule at `index` of `action`.
    #[must_use]
    pub fn get(&self, action: &str, index: usize) -> Option<&Rule> {
        self.actions.get(action)?.get(index)
    }

    /// Like [`get`](Self::get), but says why the rule is missing.
    ///
    /// # Errors
    ///
    /// Returns [`RulesetError`] if the action has no list or the index is out
    /// of range.
    pub fn rule_at(&self, action: &str, index: usize) -> Result<&Rule, RulesetError> {
        let rules = self
            .actions
            .get(action)
            .ok_or_else(|| RulesetError::UnknownAction {
                action: action.to_owned(),
            })?;
        check_index(action, index, rules.len())?;
        Ok(&rules[index])
    }

    /// Action names in sorted order.
    pub fn actions(&self) -> impl Iterator<Item = &str> {
        self.actions.keys().map(String::as_str)
    }

    /// Total number of rules across all actions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.values().all(Vec::is_empty)
    }

    /// Insert a new rule for `action` immediately before the current last
    /// rule, keeping the fallback last. An empty or missing list receives the
    /// rule as its only element.
    ///
    /// Returns the index the rule was placed at.
    pub fn insert(&mut self, action: &str, rule: Rule) -> usize {
        let rules = self.actions.entry(action.to_owned()).or_default();
        let index = rules.len().saturating_sub(1);
        rules.insert(index, rule);
        index
    }

    /// Overwrite the rule at `index` of `action`, returning the previous one.
    ///
    /// # Errors
    ///
    /// Returns [`RulesetError`] if the action has no list or the index is out
    /// of range.
    pub fn replace(&mut self, action: &str, index: usize, rule: Rule) -> Result<Rule, RulesetError> {
        let rules = self.rules_mut(action)?;
        check_index(action, index, rules.len())?;
        Ok(std::mem::replace(&mut rules[index], rule))
    }

    /// Exchange the rules at `i` and `j` of `action`.
    ///
    /// # Errors
    ///
    /// Returns [`RulesetError`] if the action has no list or either index is
    /// out of range.
    pub fn swap(&mut self, action: &str, i: usize, j: usize) -> Result<(), RulesetError> {
        let rules = self.rules_mut(action)?;
        check_index(action, i, rules.len())?;
        check_index(action, j, rules.len())?;
        rules.swap(i, j);
        Ok(())
    }

    /// Remove and return the rule at `index` of `action`. The remaining rules
    /// keep their relative order.
    ///
    /// # Errors
    ///
    /// Returns [`RulesetError`] if the action has no list or the index is out
    /// of range.
    pub fn remove(&mut self, action: &str, index: usize) -> Result<Rule, RulesetError> {
        let rules = self.rules_mut(action)?;
        check_index(action, index, rules.len())?;
        Ok(rules.remove(index))
    }

    /// Classify a learner's `answer` against the rules of `action`.
    ///
    /// Returns the first rule whose predicate accepts the answer, or `None`
    /// if the action has no rules or none of them match.
    ///
    /// # Errors
    ///
    /// Returns [`ClassifyError`] if a rule checked before the match has an
    /// unknown predicate or lacks a required input.
    pub fn classify(&self, action: &str, answer: &str) -> Result<Option<&Rule>, ClassifyError> {
        match self.actions.get(action) {
            Some(rules) => crate::classify::classify(rules, answer),
            None => Ok(None),
        }
    }

    fn rules_mut(&mut self, action: &str) -> Result<&mut Vec<Rule>, RulesetError> {
        self.actions
            .get_mut(action)
            .ok_or_else(|| RulesetError::UnknownAction {
                action: action.to_owned(),
            })
    }
}

fn check_index(action: &str, index: usize, len: usize) -> Result<(), RulesetError> {
    if index < len {
        Ok(())
    } else {
        Err(RulesetError::IndexOutOfRange {
            action: action.to_owned(),
            index,
            len,
        })
    }
}

impl fmt::Display for Ruleset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Ruleset({} actions, {} rules)",
            self.actions.len(),
            self.len()
        )
    }
}
