//! Assessment endpoints: the question catalog and submission.

mod dto;
mod handlers;

pub use dto::{CatalogResponse, SubmissionResponse};
pub use handlers::{list_questions, submit_assessment};
