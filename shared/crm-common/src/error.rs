//! Shared error type.

use thiserror::Error;

/// Errors raised while interpreting shared CRM values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A status string did not match any known variant.
    #[error("unknown {kind} status: {value}")]
    UnknownStatus {
        kind: &'static str,
        value: String,
    },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
