//! Report query handlers.

mod errors;
mod get_report;
mod get_wellness_trend;
mod list_reports;

pub use errors::ReportQueryError;
pub use get_report::{GetReportHandler, GetReportQuery, ReportDetail};
pub use get_wellness_trend::{GetWellnessTrendHandler, GetWellnessTrendQuery};
pub use list_reports::{ListReportsHandler, ListReportsQuery};
