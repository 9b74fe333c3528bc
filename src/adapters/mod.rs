//! Adapters - Implementations of port interfaces.
//!
//! - `auth` - JWT validation and the process-scoped session store
//! - `http` - axum routes and error mapping
//! - `memory` - in-memory repositories
//! - `postgres` - sqlx repositories
//! - `scoring` - the risk model's REST client

pub mod auth;
pub mod http;
pub mod memory;
pub mod postgres;
pub mod scoring;
