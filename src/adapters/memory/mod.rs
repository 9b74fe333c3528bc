//! In-memory adapters for development without a database and for tests.

mod profile_reader;
mod report_repository;

pub use profile_reader::InMemoryProfileReader;
pub use report_repository::InMemoryReportRepository;
