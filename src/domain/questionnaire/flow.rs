//! Flow engine - walks the catalog one question at a time.
//!
//! A `FlowSession` owns the cursor and the accumulated answers for one
//! in-progress questionnaire. It validates each answer against the current
//! question and advances; when the catalog is exhausted it hands the answers
//! back to the caller. It never submits anything itself.
//!
//! Invariants:
//! - every question before the cursor has an answer, nothing after it does
//! - a rejected answer leaves the cursor and answers untouched
//! - the session is terminal exactly when the cursor equals the catalog length

use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;

use super::answers::{AnswerMap, AnswerValue};
use super::catalog::{QuestionCatalog, QuestionDescriptor};
use crate::domain::foundation::{ErrorCode, StateMachine, ValidationError};

/// Lifecycle of a flow session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowStatus {
    InProgress,
    Completed,
}

impl StateMachine for FlowStatus {
    fn valid_transitions(&self) -> Vec<Self> {
        match self {
            FlowStatus::InProgress => vec![FlowStatus::Completed],
            FlowStatus::Completed => vec![],
        }
    }
}

/// What the engine is currently waiting on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurrentQuestion<'a> {
    Pending {
        index: usize,
        question: &'a QuestionDescriptor,
    },
    Terminal,
}

/// Result of a successful `answer()` call.
#[derive(Debug, Clone, PartialEq)]
pub enum AnswerOutcome {
    /// More questions remain.
    Advanced { next_index: usize },
    /// The last question was answered; the caller should submit these.
    Completed(AnswerMap),
}

/// "Question i / N" progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FlowProgress {
    pub answered: usize,
    pub total: usize,
}

impl FlowProgress {
    /// Completion as a whole percentage.
    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return 100;
        }
        ((self.answered * 100) / self.total) as u8
    }
}

/// Flow engine errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FlowError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("the questionnaire is already complete")]
    AlreadyComplete,

    #[error("already at the first question")]
    AtFirstQuestion,

    #[error("no answer provided for question '{0}'")]
    MissingAnswer(String),

    #[error("'{0}' is not a question in this catalog")]
    UnknownQuestion(String),
}

impl FlowError {
    pub fn code(&self) -> ErrorCode {
        match self {
            FlowError::Validation(_) => ErrorCode::ValidationFailed,
            FlowError::AlreadyComplete | FlowError::AtFirstQuestion => ErrorCode::FlowCompleted,
            FlowError::MissingAnswer(_) => ErrorCode::IncompleteAnswers,
            FlowError::UnknownQuestion(_) => ErrorCode::QuestionNotFound,
        }
    }
}

/// One questionnaire in progress.
#[derive(Debug, Clone)]
pub struct FlowSession {
    catalog: Arc<QuestionCatalog>,
    cursor: usize,
    answers: AnswerMap,
    status: FlowStatus,
}

impl FlowSession {
    /// Starts a fresh session at the first question.
    pub fn new(catalog: Arc<QuestionCatalog>) -> Self {
        let status = if catalog.is_empty() {
            FlowStatus::Completed
        } else {
            FlowStatus::InProgress
        };
        Self {
            catalog,
            cursor: 0,
            answers: AnswerMap::new(),
            status,
        }
    }

    /// Feeds an externally collected answer map through the engine in
    /// catalog order, so it obeys exactly the same validation as an
    /// interactive session.
    pub fn replay(catalog: Arc<QuestionCatalog>, answers: &AnswerMap) -> Result<Self, FlowError> {
        if let Some(unknown) = answers.keys().find(|id| !catalog.contains(id)) {
            return Err(FlowError::UnknownQuestion(unknown.to_string()));
        }

        let mut session = Self::new(catalog);
        while let CurrentQuestion::Pending { question, .. } = session.current_question() {
            let value = answers
                .get(&question.id)
                .cloned()
                .ok_or_else(|| FlowError::MissingAnswer(question.id.clone()))?;
            session.answer(value)?;
        }
        Ok(session)
    }

    pub fn catalog(&self) -> &Arc<QuestionCatalog> {
        &self.catalog
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn answers(&self) -> &AnswerMap {
        &self.answers
    }

    pub fn status(&self) -> FlowStatus {
        self.status
    }

    pub fn is_terminal(&self) -> bool {
        self.status == FlowStatus::Completed
    }

    pub fn current_question(&self) -> CurrentQuestion<'_> {
        match self.catalog.get(self.cursor) {
            Some(question) if !self.is_terminal() => CurrentQuestion::Pending {
                index: self.cursor,
                question,
            },
            _ => CurrentQuestion::Terminal,
        }
    }

    pub fn progress(&self) -> FlowProgress {
        FlowProgress {
            answered: self.cursor,
            total: self.catalog.len(),
        }
    }

    /// Validates `value` against the current question and advances.
    pub fn answer(&mut self, value: impl Into<AnswerValue>) -> Result<AnswerOutcome, FlowError> {
        let question = match self.current_question() {
            CurrentQuestion::Pending { question, .. } => question,
            CurrentQuestion::Terminal => return Err(FlowError::AlreadyComplete),
        };

        let normalized = question.validate(&value.into())?;
        let id = question.id.clone();

        self.answers.insert(id, normalized);
        self.cursor += 1;

        if self.cursor == self.catalog.len() {
            self.status = self.status.transition_to(FlowStatus::Completed)?;
            return Ok(AnswerOutcome::Completed(self.answers.clone()));
        }

        Ok(AnswerOutcome::Advanced {
            next_index: self.cursor,
        })
    }

    /// Steps back one question, discarding the answer being revisited.
    pub fn back(&mut self) -> Result<&QuestionDescriptor, FlowError> {
        if self.is_terminal() {
            return Err(FlowError::AlreadyComplete);
        }
        if self.cursor == 0 {
            return Err(FlowError::AtFirstQuestion);
        }

        self.cursor -= 1;
        let catalog = &self.catalog;
        let question = catalog
            .get(self.cursor)
            .ok_or(FlowError::AtFirstQuestion)?;
        self.answers.remove(&question.id);
        Ok(question)
    }

    /// Consumes the session, returning whatever was answered.
    pub fn into_answers(self) -> AnswerMap {
        self.answers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn catalog() -> Arc<QuestionCatalog> {
        Arc::new(
            QuestionCatalog::new(vec![
                QuestionDescriptor::numeric("age", "Age", 18, 99),
                QuestionDescriptor::choice("Smoking", "Smoke?", ["Yes", "No"]),
                QuestionDescriptor::choice("StressLevel", "Stress", ["High", "Low", "Moderate"]),
            ])
            .unwrap(),
        )
    }

    fn current_id(session: &FlowSession) -> Option<String> {
        match session.current_question() {
            CurrentQuestion::Pending { question, .. } => Some(question.id.clone()),
            CurrentQuestion::Terminal => None,
        }
    }

    #[test]
    fn starts_at_first_question() {
        let session = FlowSession::new(catalog());
        assert_eq!(session.cursor(), 0);
        assert_eq!(current_id(&session).as_deref(), Some("age"));
        assert_eq!(session.status(), FlowStatus::InProgress);
    }

    #[test]
    fn walks_to_completion_and_emits_answers() {
        let mut session = FlowSession::new(catalog());

        assert_eq!(
            session.answer(40i64).unwrap(),
            AnswerOutcome::Advanced { next_index: 1 }
        );
        assert_eq!(
            session.answer("No").unwrap(),
            AnswerOutcome::Advanced { next_index: 2 }
        );

        let outcome = session.answer("Low").unwrap();
        let AnswerOutcome::Completed(answers) = outcome else {
            panic!("expected completion");
        };
        assert_eq!(answers.len(), 3);
        assert_eq!(answers.get("age"), Some(&AnswerValue::Integer(40)));
        assert!(session.is_terminal());
        assert_eq!(session.current_question(), CurrentQuestion::Terminal);
    }

    #[test]
    fn rejected_answer_leaves_state_unchanged() {
        let mut session = FlowSession::new(catalog());
        session.answer(40i64).unwrap();

        let before_answers = session.answers().clone();
        let err = session.answer("Sometimes").unwrap_err();

        assert!(matches!(err, FlowError::Validation(ValidationError::NotAnOption { .. })));
        assert_eq!(session.cursor(), 1);
        assert_eq!(session.answers(), &before_answers);
    }

    #[test]
    fn out_of_bounds_numeric_is_rejected() {
        let mut session = FlowSession::new(catalog());
        assert!(session.answer(17i64).is_err());
        assert!(session.answer(100i64).is_err());
        assert_eq!(session.cursor(), 0);
        assert!(session.answers().is_empty());
    }

    #[test]
    fn answering_after_completion_fails() {
        let mut session = FlowSession::new(catalog());
        session.answer(40i64).unwrap();
        session.answer("No").unwrap();
        session.answer("Low").unwrap();

        assert_eq!(session.answer("Yes"), Err(FlowError::AlreadyComplete));
    }

    #[test]
    fn back_removes_revisited_answer() {
        let mut session = FlowSession::new(catalog());
        session.answer(40i64).unwrap();
        session.answer("Yes").unwrap();

        let revisited = session.back().unwrap();
        assert_eq!(revisited.id, "Smoking");
        assert_eq!(session.cursor(), 1);
        assert!(!session.answers().contains("Smoking"));
        assert!(session.answers().contains("age"));

        session.answer("No").unwrap();
        assert_eq!(session.answers().get("Smoking"), Some(&AnswerValue::from("No")));
    }

    #[test]
    fn back_at_start_fails() {
        let mut session = FlowSession::new(catalog());
        assert_eq!(session.back().unwrap_err(), FlowError::AtFirstQuestion);
    }

    #[test]
    fn progress_tracks_cursor() {
        let mut session = FlowSession::new(catalog());
        session.answer(40i64).unwrap();
        let progress = session.progress();
        assert_eq!(progress, FlowProgress { answered: 1, total: 3 });
        assert_eq!(progress.percent(), 33);
    }

    #[test]
    fn replay_accepts_complete_answers_in_any_order() {
        let answers: AnswerMap = vec![
            ("StressLevel", AnswerValue::from("High")),
            ("age", AnswerValue::from(55i64)),
            ("Smoking", AnswerValue::from("Yes")),
        ]
        .into_iter()
        .collect();

        let session = FlowSession::replay(catalog(), &answers).unwrap();
        assert!(session.is_terminal());
        assert_eq!(session.answers().len(), 3);
    }

    #[test]
    fn replay_reports_first_missing_question() {
        let answers: AnswerMap = vec![("age", AnswerValue::from(55i64))].into_iter().collect();
        assert_eq!(
            FlowSession::replay(catalog(), &answers).unwrap_err(),
            FlowError::MissingAnswer("Smoking".into())
        );
    }

    #[test]
    fn replay_rejects_unknown_keys_and_invalid_values() {
        let unknown: AnswerMap = vec![("Mystery", AnswerValue::from("Yes"))].into_iter().collect();
        assert!(matches!(
            FlowSession::replay(catalog(), &unknown),
            Err(FlowError::UnknownQuestion(id)) if id == "Mystery"
        ));

        let invalid: AnswerMap = vec![
            ("age", AnswerValue::from(12i64)),
            ("Smoking", AnswerValue::from("Yes")),
            ("StressLevel", AnswerValue::from("High")),
        ]
        .into_iter()
        .collect();
        assert!(matches!(
            FlowSession::replay(catalog(), &invalid),
            Err(FlowError::Validation(_))
        ));
    }

    #[test]
    fn flow_status_transitions() {
        assert!(FlowStatus::InProgress.can_transition_to(&FlowStatus::Completed));
        assert!(FlowStatus::Completed.is_terminal());
        assert!(FlowStatus::Completed.transition_to(FlowStatus::InProgress).is_err());
    }

    fn arb_question(idx: usize) -> impl Strategy<Value = QuestionDescriptor> {
        prop_oneof![
            (0i64..50, 0i64..50).prop_map(move |(min, span)| {
                QuestionDescriptor::numeric(format!("n{}", idx), "numeric", min, min + span)
            }),
            prop::collection::vec("[a-z]{1,6}", 1..4).prop_map(move |mut opts| {
                opts.dedup();
                QuestionDescriptor::choice(format!("c{}", idx), "choice", opts)
            }),
        ]
    }

    fn arb_catalog() -> impl Strategy<Value = QuestionCatalog> {
        (1usize..20)
            .prop_flat_map(|n| (0..n).map(arb_question).collect::<Vec<_>>())
            .prop_map(|questions| QuestionCatalog::new(questions).unwrap())
    }

    proptest! {
        #[test]
        fn terminal_after_exactly_n_valid_answers(catalog in arb_catalog()) {
            let n = catalog.len();
            let catalog = Arc::new(catalog);
            let mut session = FlowSession::new(catalog.clone());

            for i in 0..n {
                prop_assert!(!session.is_terminal());
                let q = catalog.get(i).unwrap();
                let value = match &q.kind {
                    crate::domain::questionnaire::QuestionKind::Numeric { max, .. } => AnswerValue::Integer(*max),
                    crate::domain::questionnaire::QuestionKind::Choice { options } => AnswerValue::Text(options[0].clone()),
                };
                session.answer(value).unwrap();
            }

            prop_assert!(session.is_terminal());
            prop_assert_eq!(session.answers().len(), n);
            for id in catalog.ids() {
                prop_assert!(session.answers().contains(id));
            }
        }
    }
}
