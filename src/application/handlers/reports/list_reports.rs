//! ListReportsHandler - the caller's assessment history, newest first.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::report::{PersistedRecord, RecordOrder};
use crate::ports::ReportRepository;

#[derive(Debug, Clone)]
pub struct ListReportsQuery {
    pub user_id: UserId,
}

pub struct ListReportsHandler {
    repository: Arc<dyn ReportRepository>,
}

impl ListReportsHandler {
    pub fn new(repository: Arc<dyn ReportRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: ListReportsQuery) -> Result<Vec<PersistedRecord>, DomainError> {
        self.repository
            .list_records_for_user(&query.user_id, RecordOrder::NewestFirst)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryReportRepository;
    use crate::domain::questionnaire::AnswerMap;
    use crate::domain::report::{test_support::report, NewRecord};

    #[tokio::test]
    async fn lists_only_callers_records_newest_first() {
        let repo = Arc::new(InMemoryReportRepository::new());
        let alice = UserId::new("alice").unwrap();
        let bob = UserId::new("bob").unwrap();

        let first = repo
            .insert_record(NewRecord::new(alice.clone(), AnswerMap::new(), report(&[("A", 10.0)])))
            .await
            .unwrap();
        repo.insert_record(NewRecord::new(bob, AnswerMap::new(), report(&[("A", 20.0)])))
            .await
            .unwrap();
        let second = repo
            .insert_record(NewRecord::new(alice.clone(), AnswerMap::new(), report(&[("A", 30.0)])))
            .await
            .unwrap();

        let records = ListReportsHandler::new(repo)
            .handle(ListReportsQuery { user_id: alice })
            .await
            .unwrap();

        let ids: Vec<_> = records.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![second, first]);
    }
}
