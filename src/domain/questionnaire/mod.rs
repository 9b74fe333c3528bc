//! Questionnaire module - question catalog, answers, and the flow engine.

mod answers;
mod catalog;
mod flow;

pub use answers::{AnswerMap, AnswerValue, CanonicalPayload, IncompleteAnswers};
pub use catalog::{CatalogError, QuestionCatalog, QuestionDescriptor, QuestionKind};
pub use flow::{
    AnswerOutcome, CurrentQuestion, FlowError, FlowProgress, FlowSession, FlowStatus,
};
