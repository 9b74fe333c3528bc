//! GetProfileOverviewHandler - profile plus assessment history summary.
//!
//! The profile and the history are independent reads, so they run
//! concurrently and are merged only after both settle.

use serde::Serialize;
use std::sync::Arc;

use crate::domain::foundation::{DomainError, RecordId, UserId};
use crate::domain::report::{trend, RecordOrder, WellnessTrend};
use crate::ports::{Profile, ProfileReader, ReportRepository};

#[derive(Debug, Clone)]
pub struct GetProfileOverviewQuery {
    pub user_id: UserId,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileOverview {
    pub profile: Option<Profile>,
    pub report_count: usize,
    pub latest_record_id: Option<RecordId>,
    pub trend: WellnessTrend,
}

pub struct GetProfileOverviewHandler {
    profiles: Arc<dyn ProfileReader>,
    repository: Arc<dyn ReportRepository>,
}

impl GetProfileOverviewHandler {
    pub fn new(profiles: Arc<dyn ProfileReader>, repository: Arc<dyn ReportRepository>) -> Self {
        Self {
            profiles,
            repository,
        }
    }

    pub async fn handle(&self, query: GetProfileOverviewQuery) -> Result<ProfileOverview, DomainError> {
        let (profile, records) = tokio::join!(
            self.profiles.get_profile(&query.user_id),
            self.repository
                .list_records_for_user(&query.user_id, RecordOrder::OldestFirst),
        );
        let profile = profile?;
        let records = records?;

        Ok(ProfileOverview {
            profile,
            report_count: records.len(),
            latest_record_id: records.last().map(|r| r.id),
            trend: trend(&records),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryProfileReader, InMemoryReportRepository};
    use crate::domain::questionnaire::AnswerMap;
    use crate::domain::report::{test_support::report, NewRecord};
    use async_trait::async_trait;

    struct FailingProfiles;

    #[async_trait]
    impl ProfileReader for FailingProfiles {
        async fn get_profile(&self, _user_id: &UserId) -> Result<Option<Profile>, DomainError> {
            Err(DomainError::database("profiles unavailable"))
        }
    }

    fn alice() -> UserId {
        UserId::new("alice").unwrap()
    }

    #[tokio::test]
    async fn merges_profile_and_history() {
        let profiles = Arc::new(InMemoryProfileReader::new());
        profiles.upsert(
            alice(),
            Profile {
                name: Some("Alice".into()),
                age: Some(34),
                gender: Some("female".into()),
            },
        );
        let repo = Arc::new(InMemoryReportRepository::new());
        repo.insert_record(NewRecord::new(alice(), AnswerMap::new(), report(&[("A", 30.0)])))
            .await
            .unwrap();
        let latest = repo
            .insert_record(NewRecord::new(alice(), AnswerMap::new(), report(&[("A", 20.0)])))
            .await
            .unwrap();

        let overview = GetProfileOverviewHandler::new(profiles, repo)
            .handle(GetProfileOverviewQuery { user_id: alice() })
            .await
            .unwrap();

        assert_eq!(overview.profile.and_then(|p| p.name).as_deref(), Some("Alice"));
        assert_eq!(overview.report_count, 2);
        assert_eq!(overview.latest_record_id, Some(latest));
        assert_eq!(overview.trend.summary().map(|s| s.delta), Some(10));
    }

    #[tokio::test]
    async fn missing_profile_is_not_an_error() {
        let overview = GetProfileOverviewHandler::new(
            Arc::new(InMemoryProfileReader::new()),
            Arc::new(InMemoryReportRepository::new()),
        )
        .handle(GetProfileOverviewQuery { user_id: alice() })
        .await
        .unwrap();

        assert!(overview.profile.is_none());
        assert_eq!(overview.report_count, 0);
        assert_eq!(overview.latest_record_id, None);
        assert_eq!(overview.trend, WellnessTrend::InsufficientHistory { available: 0 });
    }

    #[tokio::test]
    async fn profile_failure_propagates() {
        let result = GetProfileOverviewHandler::new(
            Arc::new(FailingProfiles),
            Arc::new(InMemoryReportRepository::new()),
        )
        .handle(GetProfileOverviewQuery { user_id: alice() })
        .await;

        assert!(result.is_err());
    }
}
