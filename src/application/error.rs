use thiserror::Error;

use crate::domain::ValidationError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Failed to write report: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to write CSV report: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Ledger lock poisoned: {0}")]
    LockPoisoned(String),
}

impl AppError {
    /// True for rejected user input, as opposed to a failed write.
    pub fn is_validation(&self) -> bool {
        matches!(self, AppError::Validation(_))
    }
}
