use std::fmt;

use serde::{Deserialize, Serialize};

/// A state of the exploration, addressed by an opaque id and shown to authors
/// by its display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct State {
    pub id: String,
    pub name: String,
}

impl State {
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}

/// The known states of an exploration, in insertion order.
///
/// The terminal pseudo-state is never stored here; it is always a valid
/// destination regardless of the registry's contents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StateRegistry {
    states: Vec<State>,
}

impl StateRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a state, or rename it if a state with the same id exists.
    pub fn insert(&mut self, state: State) {
        match self.states.iter_mut().find(|s| s.id == state.id) {
            Some(existing) => existing.name = state.name,
            None => self.states.push(state),
        }
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&State> {
        self.states.iter().find(|s| s.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// States whose display name is exactly `name`, in registry order.
    pub fn named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a State> + 'a {
        self.states.iter().filter(move |s| s.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &State> {
        self.states.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.states.iter().map(|s| s.id.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

impl FromIterator<State> for StateRegistry {
    fn from_iter<I: IntoIterator<Item = State>>(iter: I) -> Self {
        let mut registry = Self::new();
        for state in iter {
            registry.insert(state);
        }
        registry
    }
}
