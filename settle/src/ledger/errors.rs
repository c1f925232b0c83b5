//! Ledger error types.

use thiserror::Error;

/// Ledger errors
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Operation requires the player to have bought in first
    #[error("Player '{0}' has not bought in yet.")]
    NotBoughtIn(String),

    /// Amounts must be strictly positive
    #[error("Invalid amount: {0}. Amounts must be positive.")]
    InvalidAmount(i64),

    /// A game date was missing or blank
    #[error("Date is required")]
    MissingDate,

    /// A player name was missing or blank
    #[error("Name is required")]
    MissingName,

    /// No game has been started
    #[error("No game in progress.")]
    NoActiveGame,

    /// The table has no players yet
    #[error("No data available")]
    NoData,

    /// CSV export failed
    #[error("CSV export failed: {0}")]
    Export(#[from] csv::Error),
}

impl LedgerError {
    /// Get a client-safe error message that doesn't leak storage details.
    pub fn client_message(&self) -> String {
        match self {
            LedgerError::Database(_) => "Internal server error".to_string(),
            LedgerError::Export(_) => "CSV export failed".to_string(),
            _ => self.to_string(),
        }
    }
}

/// Result type for ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;
