//! CRM Core
//!
//! Permission-gated rendering, bulk list selection and the small helpers the
//! CRM views share: notification inserts, avatar URLs and status badges.

pub mod avatar;
pub mod badge;
pub mod config;
pub mod db;
pub mod notifications;
pub mod observability;
pub mod permissions;
pub mod selection;

pub use selection::SelectionTracker;
