//! Permission gating.
//!
//! Two injected capabilities feed the gate:
//! - a permission source answering "may the current user perform this action"
//! - a role source resolving the current user's role
//!
//! [`PermissionGate`] combines both into a render decision.

pub mod error;
pub mod gate;
pub mod models;
pub mod queries;
pub mod source;

pub use error::PermissionError;
pub use gate::{GateDecision, PermissionGate, Rendered, Skeleton};
pub use models::{GateState, PermissionCheck, RoleCheck};
pub use queries::PgAccessSource;
pub use source::{MemoryAccessSource, PermissionSource, RoleSource};
