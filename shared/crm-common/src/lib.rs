//! CRM Common Library
//!
//! Shared types used by the access utilities, list views and diagnostics.

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::*;
