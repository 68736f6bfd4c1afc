use thiserror::Error;

use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("invalid input: at least one ingredient id is required")]
    EmptyIngredientSet,

    #[error("invalid scoring policy: {reason}")]
    InvalidPolicy { reason: String },

    #[error("scoring unavailable: {0}")]
    Store(#[from] StoreError),
}

impl ScoringError {
    /// `true` for errors caused by the caller's input rather than the system.
    pub fn is_input_error(&self) -> bool {
        matches!(self, ScoringError::EmptyIngredientSet)
    }
}
