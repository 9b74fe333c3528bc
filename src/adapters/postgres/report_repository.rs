//! PostgreSQL implementation of ReportRepository.
//!
//! One row per assessment in `health_reports`; answers and report are
//! stored as JSONB.

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{DomainError, ErrorCode, RecordId, Timestamp, UserId};
use crate::domain::questionnaire::AnswerMap;
use crate::domain::report::{NewRecord, PersistedRecord, RecordOrder, Report};
use crate::ports::ReportRepository;

/// PostgreSQL implementation of ReportRepository.
#[derive(Clone)]
pub struct PostgresReportRepository {
    pool: PgPool,
}

impl PostgresReportRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReportRepository for PostgresReportRepository {
    async fn insert_record(&self, record: NewRecord) -> Result<RecordId, DomainError> {
        let row = sqlx::query(
            r#"
            INSERT INTO health_reports (
                id, user_id, input_data, analysis_result, input_fingerprint
            ) VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(uuid::Uuid::new_v4())
        .bind(record.owner_id.as_str())
        .bind(Json(&record.input_snapshot))
        .bind(Json(&record.report))
        .bind(record.input_fingerprint.as_deref())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to insert health report: {}", e)))?;

        let row = row.ok_or_else(|| DomainError::database("Insert returned no record id"))?;
        let id: uuid::Uuid = row
            .try_get("id")
            .map_err(|e| DomainError::database(format!("Failed to get id: {}", e)))?;

        Ok(RecordId::from_uuid(id))
    }

    async fn list_records_for_user(
        &self,
        owner: &UserId,
        order: RecordOrder,
    ) -> Result<Vec<PersistedRecord>, DomainError> {
        let sql = format!(
            r#"
            SELECT id, user_id, created_at, input_data, analysis_result, input_fingerprint
            FROM health_reports
            WHERE user_id = $1
            ORDER BY created_at {dir}, id {dir}
            "#,
            dir = order_direction(order)
        );

        let rows = sqlx::query(&sql)
            .bind(owner.as_str())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Failed to list health reports: {}", e)))?;

        rows.into_iter().map(row_to_record).collect()
    }

    async fn get_record(&self, id: &RecordId) -> Result<Option<PersistedRecord>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id, created_at, input_data, analysis_result, input_fingerprint
            FROM health_reports
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to fetch health report: {}", e)))?;

        row.map(row_to_record).transpose()
    }
}

fn order_direction(order: RecordOrder) -> &'static str {
    match order {
        RecordOrder::OldestFirst => "ASC",
        RecordOrder::NewestFirst => "DESC",
    }
}

fn column_error(column: &str, e: sqlx::Error) -> DomainError {
    DomainError::database(format!("Failed to get {}: {}", column, e)).with_detail("column", column)
}

fn row_to_record(row: sqlx::postgres::PgRow) -> Result<PersistedRecord, DomainError> {
    let id: uuid::Uuid = row.try_get("id").map_err(|e| column_error("id", e))?;
    let user_id: String = row.try_get("user_id").map_err(|e| column_error("user_id", e))?;
    let created_at: chrono::DateTime<chrono::Utc> = row
        .try_get("created_at")
        .map_err(|e| column_error("created_at", e))?;
    let Json(input_snapshot): Json<AnswerMap> = row
        .try_get("input_data")
        .map_err(|e| column_error("input_data", e))?;
    let Json(report): Json<Report> = row
        .try_get("analysis_result")
        .map_err(|e| column_error("analysis_result", e))?;
    let input_fingerprint: Option<String> = row
        .try_get("input_fingerprint")
        .map_err(|e| column_error("input_fingerprint", e))?;

    let owner_id = UserId::new(user_id)
        .map_err(|e| DomainError::new(ErrorCode::DatabaseError, format!("Invalid user_id: {}", e)))?;

    Ok(PersistedRecord {
        id: RecordId::from_uuid(id),
        owner_id,
        created_at: Timestamp::from_datetime(created_at),
        input_snapshot,
        report,
        input_fingerprint,
    })
}
