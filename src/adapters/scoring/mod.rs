//! Scoring Service Adapters.
//!
//! - `HttpScoringClient` - the risk model's REST API
//! - `MockScoringService` - queued results and call recording for tests

mod http_client;
mod mock;

pub use http_client::{HttpScoringClient, HttpScoringConfig};
pub use mock::MockScoringService;
