//! SymptoScore - health screening backend
//!
//! Walks a user through a fixed screening questionnaire, submits the answers
//! to an external risk-scoring service, stores the multi-condition report,
//! and serves report views and a longitudinal wellness trend.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
