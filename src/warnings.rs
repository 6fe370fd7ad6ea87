//! User-facing validation messages.

use std::sync::{Mutex, PoisonError};

/// Receives warnings meant for the author, such as an unresolvable
/// destination name.
pub trait WarningSink: Send + Sync {
    fn add_warning(&self, message: &str);
}

/// A [`WarningSink`] that keeps every message in arrival order.
#[derive(Debug, Default)]
pub struct WarningLog {
    messages: Mutex<Vec<String>>,
}

impl WarningLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the recorded messages.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.lock().clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Remove and return all recorded messages.
    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.lock())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<String>> {
        self.messages.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl WarningSink for WarningLog {
    fn add_warning(&self, message: &str) {
        log::warn!("{message}");
        self.lock().push(message.to_owned());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_in_order() {
        let log = WarningLog::new();
        log.add_warning("first");
        log.add_warning("second");
        assert_eq!(log.messages(), ["first", "second"]);
    }

    #[test]
    fn take_drains() {
        let log = WarningLog::new();
        log.add_warning("only");
        assert_eq!(log.take(), ["only"]);
        assert!(log.is_empty());
    }
}
