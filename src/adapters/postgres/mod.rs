//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresReportRepository` - assessment records in `health_reports`
//! - `PostgresProfileReader` - basic profiles in `profiles`

mod profile_reader;
mod report_repository;

pub use profile_reader::PostgresProfileReader;
pub use report_repository::PostgresReportRepository;
