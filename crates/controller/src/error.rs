//! Error types for controller operations.
//!
//! By the time one of these is returned the user has already been shown a
//! banner; callers only need them to decide what to do with their inputs.

use gameshelf_api::ApiError;

/// Errors produced by list controller operations.
#[derive(Debug, thiserror::Error)]
pub enum ControllerError {
    /// Input rejected before any network call.
    #[error("validation failed: {0}")]
    Validation(String),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("no changes awaiting confirmation")]
    NotConfirming,

    #[error("a save is already in progress")]
    SaveInProgress,
}

impl ControllerError {
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
