//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors)
//! - `questionnaire` - Question catalog, answers, and the flow engine
//! - `report` - Scoring results, condition selection, and wellness trend

pub mod foundation;
pub mod questionnaire;
pub mod report;
