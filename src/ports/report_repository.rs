//! Report repository port - persistence of assessment records.
//!
//! Failures are opaque to the core and never retried.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, RecordId, UserId};
use crate::domain::report::{NewRecord, PersistedRecord, RecordOrder};

#[async_trait]
pub trait ReportRepository: Send + Sync {
    /// Inserts one record atomically and returns the id the store generated.
    ///
    /// Not idempotent: the same input inserted twice yields two records.
    async fn insert_record(&self, record: NewRecord) -> Result<RecordId, DomainError>;

    /// Every record owned by `owner`, sorted by creation time.
    async fn list_records_for_user(
        &self,
        owner: &UserId,
        order: RecordOrder,
    ) -> Result<Vec<PersistedRecord>, DomainError>;

    /// Fetches one record regardless of owner. Ownership checks are the
    /// caller's job.
    async fn get_record(&self, id: &RecordId) -> Result<Option<PersistedRecord>, DomainError>;
}
