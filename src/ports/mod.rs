//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `IdentityResolver` - who is submitting
//! - `SessionValidator` - bearer token validation
//! - `ScoringService` - the external risk model
//! - `ReportRepository` - assessment record persistence
//! - `ProfileReader` - basic user profile

mod identity_resolver;
mod profile_reader;
mod report_repository;
mod scoring_service;
mod session_validator;

pub use identity_resolver::{FixedIdentity, IdentityResolver};
pub use profile_reader::{Profile, ProfileReader};
pub use report_repository::ReportRepository;
pub use scoring_service::{ScoringError, ScoringService};
pub use session_validator::SessionValidator;
