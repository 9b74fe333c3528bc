//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, and error types
//! that form the vocabulary of the SymptoScore domain.

mod auth;
mod errors;
mod ids;
mod percentage;
mod state_machine;
mod timestamp;

pub use auth::{AuthError, AuthenticatedUser};
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{RecordId, UserId};
pub use percentage::RiskPercent;
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
