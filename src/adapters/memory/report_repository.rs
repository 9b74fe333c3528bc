//! In-memory implementation of ReportRepository.
//!
//! Used when no database is configured and in tests. Records live for the
//! lifetime of the process.

use async_trait::async_trait;
use std::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, RecordId, Timestamp, UserId};
use crate::domain::report::{NewRecord, PersistedRecord, RecordOrder};
use crate::ports::ReportRepository;

#[derive(Default)]
pub struct InMemoryReportRepository {
    records: RwLock<Vec<PersistedRecord>>,
}

impl InMemoryReportRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records across all users.
    pub fn len(&self) -> usize {
        self.records.read().map(|r| r.len()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn poisoned() -> DomainError {
        DomainError::new(ErrorCode::InternalError, "report store lock poisoned")
    }
}

#[async_trait]
impl ReportRepository for InMemoryReportRepository {
    async fn insert_record(&self, record: NewRecord) -> Result<RecordId, DomainError> {
        let id = RecordId::new();
        let persisted = record.into_persisted(id, Timestamp::now());
        self.records
            .write()
            .map_err(|_| Self::poisoned())?
            .push(persisted);
        Ok(id)
    }

    async fn list_records_for_user(
        &self,
        owner: &UserId,
        order: RecordOrder,
    ) -> Result<Vec<PersistedRecord>, DomainError> {
        let records = self.records.read().map_err(|_| Self::poisoned())?;

        // Stored in insertion order; the stable sort keeps it for equal timestamps.
        let mut owned: Vec<PersistedRecord> = records
            .iter()
            .filter(|r| r.is_owned_by(owner))
            .cloned()
            .collect();
        owned.sort_by_key(|r| r.created_at);
        if order == RecordOrder::NewestFirst {
            owned.reverse();
        }
        Ok(owned)
    }

    async fn get_record(&self, id: &RecordId) -> Result<Option<PersistedRecord>, DomainError> {
        let records = self.records.read().map_err(|_| Self::poisoned())?;
        Ok(records.iter().find(|r| &r.id == id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::questionnaire::AnswerMap;
    use crate::domain::report::test_support::report;

    fn new_record(owner: &str) -> NewRecord {
        NewRecord::new(
            UserId::new(owner).unwrap(),
            AnswerMap::new(),
            report(&[("Diabetes", 10.0)]),
        )
        .with_fingerprint("abc")
    }

    #[tokio::test]
    async fn insert_then_get_round_trips_fields() {
        let repo = InMemoryReportRepository::new();
        let id = repo.insert_record(new_record("alice")).await.unwrap();

        let record = repo.get_record(&id).await.unwrap().unwrap();
        assert_eq!(record.owner_id.as_str(), "alice");
        assert_eq!(record.input_fingerprint.as_deref(), Some("abc"));
    }

    #[tokio::test]
    async fn each_insert_creates_a_new_record() {
        let repo = InMemoryReportRepository::new();
        let a = repo.insert_record(new_record("alice")).await.unwrap();
        let b = repo.insert_record(new_record("alice")).await.unwrap();
        assert_ne!(a, b);
        assert_eq!(repo.len(), 2);
    }

    #[tokio::test]
    async fn listing_respects_order_and_owner() {
        let repo = InMemoryReportRepository::new();
        let first = repo.insert_record(new_record("alice")).await.unwrap();
        repo.insert_record(new_record("bob")).await.unwrap();
        let second = repo.insert_record(new_record("alice")).await.unwrap();
        let alice = UserId::new("alice").unwrap();

        let oldest: Vec<_> = repo
            .list_records_for_user(&alice, RecordOrder::OldestFirst)
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(oldest, vec![first, second]);

        let newest: Vec<_> = repo
            .list_records_for_user(&alice, RecordOrder::NewestFirst)
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(newest, vec![second, first]);
    }

    #[tokio::test]
    async fn missing_record_is_none() {
        let repo = InMemoryReportRepository::new();
        assert!(repo.get_record(&RecordId::new()).await.unwrap().is_none());
    }
}
