//! Command and query handlers.

pub mod profile;
pub mod reports;
pub mod submission;

pub use profile::{GetProfileOverviewHandler, GetProfileOverviewQuery, ProfileOverview};
pub use reports::{
    GetReportHandler, GetReportQuery, GetWellnessTrendHandler, GetWellnessTrendQuery,
    ListReportsHandler, ListReportsQuery, ReportDetail, ReportQueryError,
};
pub use submission::{SubmissionError, SubmitAssessmentCommand, SubmitAssessmentHandler};
