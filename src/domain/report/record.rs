//! Persisted assessment records and the post-submission locator.

use serde::{Deserialize, Serialize};

use super::model::Report;
use crate::domain::foundation::{RecordId, Timestamp, UserId};
use crate::domain::questionnaire::AnswerMap;

/// A stored assessment: the raw answers plus the report they produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedRecord {
    pub id: RecordId,
    pub owner_id: UserId,
    pub created_at: Timestamp,
    /// Answers exactly as submitted (unordered).
    pub input_snapshot: AnswerMap,
    pub report: Report,
    /// SHA-256 of the canonical payload. Informational only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_fingerprint: Option<String>,
}

impl PersistedRecord {
    pub fn is_owned_by(&self, user: &UserId) -> bool {
        &self.owner_id == user
    }
}

/// Everything needed to insert a record; the store assigns id and timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRecord {
    pub owner_id: UserId,
    pub input_snapshot: AnswerMap,
    pub report: Report,
    pub input_fingerprint: Option<String>,
}

impl NewRecord {
    pub fn new(owner_id: UserId, input_snapshot: AnswerMap, report: Report) -> Self {
        Self {
            owner_id,
            input_snapshot,
            report,
            input_fingerprint: None,
        }
    }

    pub fn with_fingerprint(mut self, fingerprint: impl Into<String>) -> Self {
        self.input_fingerprint = Some(fingerprint.into());
        self
    }

    /// Materializes the record once the store has assigned identity.
    pub fn into_persisted(self, id: RecordId, created_at: Timestamp) -> PersistedRecord {
        PersistedRecord {
            id,
            owner_id: self.owner_id,
            created_at,
            input_snapshot: self.input_snapshot,
            report: self.report,
            input_fingerprint: self.input_fingerprint,
        }
    }
}

/// Handed back after a successful submission so the caller can go straight
/// to the result without re-fetching it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultLocator {
    pub record_id: RecordId,
    pub report: Report,
}

/// Sort direction for record listings, by creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecordOrder {
    OldestFirst,
    #[default]
    NewestFirst,
}
