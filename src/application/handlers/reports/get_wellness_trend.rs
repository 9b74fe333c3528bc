//! GetWellnessTrendHandler - wellness score over the caller's history.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::report::{trend, RecordOrder, WellnessTrend};
use crate::ports::ReportRepository;

#[derive(Debug, Clone)]
pub struct GetWellnessTrendQuery {
    pub user_id: UserId,
}

pub struct GetWellnessTrendHandler {
    repository: Arc<dyn ReportRepository>,
}

impl GetWellnessTrendHandler {
    pub fn new(repository: Arc<dyn ReportRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: GetWellnessTrendQuery) -> Result<WellnessTrend, DomainError> {
        let records = self
            .repository
            .list_records_for_user(&query.user_id, RecordOrder::OldestFirst)
            .await?;
        Ok(trend(&records))
    }
}
