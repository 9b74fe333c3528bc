//! Assessment submission handlers.

mod submit_assessment;

pub use submit_assessment::{SubmissionError, SubmitAssessmentCommand, SubmitAssessmentHandler};
