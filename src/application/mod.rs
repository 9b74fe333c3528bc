//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Commands (submission) write; queries (reports, trend, profile) only read.

pub mod handlers;

pub use handlers::{
    GetProfileOverviewHandler, GetProfileOverviewQuery, GetReportHandler, GetReportQuery,
    GetWellnessTrendHandler, GetWellnessTrendQuery, ListReportsHandler, ListReportsQuery,
    ProfileOverview, ReportDetail, ReportQueryError, SubmissionError, SubmitAssessmentCommand,
    SubmitAssessmentHandler,
};
