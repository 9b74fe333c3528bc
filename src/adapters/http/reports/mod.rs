//! Report history, detail, and trend endpoints.

mod dto;
mod handlers;

pub use dto::{
    ConditionView, FactorView, ReportDetailResponse, ReportQueryParams, ReportSummaryResponse,
};
pub use handlers::{get_report, get_wellness_trend, list_reports};
