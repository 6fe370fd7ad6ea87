use thiserror::Error;

use crate::preview::PreviewError;
use crate::store::StoreError;
use crate::{ClassifyError, RulesetError};

/// Unified error type returned by [`RuleSetEditor`](crate::RuleSetEditor)
/// operations.
///
/// Validation problems the author can fix (an empty or unknown destination)
/// are not errors: they are reported to the warning sink and the operation
/// returns normally.
#[derive(Debug, Error)]
pub enum EditorError {
    #[error(transparent)]
    Ruleset(#[from] RulesetError),

    #[error(transparent)]
    Classify(#[from] ClassifyError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Preview(#[from] PreviewError),

    #[error("no rule dialog is open")]
    NoOpenSession,
}
