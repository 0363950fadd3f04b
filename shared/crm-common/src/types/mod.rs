//! Shared Types

pub mod item;
pub mod lead;
pub mod quotation;
pub mod user;

pub use item::Identifiable;
pub use lead::LeadStatus;
pub use quotation::QuotationStatus;
pub use user::{UserProfile, ADMIN_ROLE};
