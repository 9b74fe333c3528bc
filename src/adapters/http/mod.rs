//! HTTP adapter - axum routes, extractors, and error mapping.

pub mod assessment;
pub mod error;
pub mod middleware;
pub mod profile;
pub mod reports;
pub mod routes;
pub mod state;

pub use error::{ApiError, ErrorResponse};
pub use routes::app_router;
pub use state::AppState;
