//! Permission lookup errors.

use thiserror::Error;

/// Failure of a permission or role lookup.
///
/// The gate never produces these itself; they come from the sources and are
/// handed back to the caller unchanged.
#[derive(Debug, Error)]
pub enum PermissionError {
    /// Database error occurred.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The lookup backend could not answer.
    #[error("Permission lookup unavailable: {0}")]
    Unavailable(String),
}
