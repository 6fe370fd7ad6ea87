//! Persistence of per-state widget configuration.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;

use thiserror::Error;

use crate::{State, StateRecord};

/// Errors reported by a [`StateStore`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("a state named '{0}' already exists")]
    Conflict(String),
    #[error("invalid state name: {0:?}")]
    InvalidName(String),
    #[error("storage error: {0}")]
    Other(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Boxed future returned by collaborator traits.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Backend holding the interactive-widget configuration of each state and
/// able to create new states.
pub trait StateStore: Send + Sync {
    /// Read the record of `state_id`; `None` if nothing is configured yet.
    fn load_state(&self, state_id: &str) -> BoxFuture<'_, StoreResult<Option<StateRecord>>>;

    /// Replace the record of `state_id` with `record`.
    fn save_state(&self, state_id: &str, record: &StateRecord) -> BoxFuture<'_, StoreResult<()>>;

    /// Create a new state called `name` and return it with its assigned id.
    fn create_state(&self, name: &str) -> BoxFuture<'_, StoreResult<State>>;
}

/// In-memory [`StateStore`] for testing and ephemeral use.
///
/// Every save is also appended to a history so callers can observe how often
/// and in which order the editor persisted.
#[derive(Debug, Default)]
pub struct MemoryStateStore {
    records: RwLock<HashMap<String, StateRecord>>,
    created: RwLock<Vec<State>>,
    history: RwLock<Vec<(String, StateRecord)>>,
    next_id: AtomicUsize,
}

impl MemoryStateStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the record of `state_id`.
    #[must_use]
    pub fn with_record(self, state_id: &str, record: StateRecord) -> Self {
        if let Ok(mut records) = self.records.write() {
            records.insert(state_id.to_owned(), record);
        }
        self
    }

    /// The current record of `state_id`.
    #[must_use]
    pub fn record(&self, state_id: &str) -> Option<StateRecord> {
        self.records.read().ok()?.get(state_id).cloned()
    }

    /// Number of saves performed so far.
    #[must_use]
    pub fn save_count(&self) -> usize {
        self.history.read().map(|h| h.len()).unwrap_or(0)
    }

    /// Every save in order, as `(state_id, record)`.
    #[must_use]
    pub fn history(&self) -> Vec<(String, StateRecord)> {
        self.history.read().map(|h| h.clone()).unwrap_or_default()
    }

    /// States created through [`StateStore::create_state`].
    #[must_use]
    pub fn created_states(&self) -> Vec<State> {
        self.created.read().map(|c| c.clone()).unwrap_or_default()
    }
}

fn lock_error(e: impl std::fmt::Display) -> StoreError {
    StoreError::Other(format!("Lock error: {e}"))
}

impl StateStore for MemoryStateStore {
    fn load_state(&self, state_id: &str) -> BoxFuture<'_, StoreResult<Option<StateRecord>>> {
        let state_id = state_id.to_owned();
        Box::pin(async move {
            let records = self.records.read().map_err(lock_error)?;
            Ok(records.get(&state_id).cloned())
        })
    }

    fn save_state(&self, state_id: &str, record: &StateRecord) -> BoxFuture<'_, StoreResult<()>> {
        let state_id = state_id.to_owned();
        let record = record.clone();
        Box::pin(async move {
            self.records
                .write()
                .map_err(lock_error)?
                .insert(state_id.clone(), record.clone());
            self.history
                .write()
                .map_err(lock_error)?
                .push((state_id, record));
            Ok(())
        })
    }

    fn create_state(&self, name: &str) -> BoxFuture<'_, StoreResult<State>> {
        let name = name.trim().to_owned();
        Box::pin(async move {
            if name.is_empty() {
                return Err(StoreError::InvalidName(name));
            }
            let mut created = self.created.write().map_err(lock_error)?;
            if created.iter().any(|s| s.name == name) {
                return Err(StoreError::Conflict(name));
            }
            let id = format!("state-{}", self.next_id.fetch_add(1, Ordering::Relaxed) + 1);
            let state = State::new(id, name);
            created.push(state.clone());
            Ok(state)
        })
    }
}
