//! PostgreSQL implementation of ProfileReader.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::foundation::{DomainError, UserId};
use crate::ports::{Profile, ProfileReader};

#[derive(Clone)]
pub struct PostgresProfileReader {
    pool: PgPool,
}

impl PostgresProfileReader {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct ProfileRow {
    name: Option<String>,
    age: Option<i32>,
    gender: Option<String>,
}

#[async_trait]
impl ProfileReader for PostgresProfileReader {
    async fn get_profile(&self, user_id: &UserId) -> Result<Option<Profile>, DomainError> {
        let row: Option<ProfileRow> =
            sqlx::query_as("SELECT name, age, gender FROM profiles WHERE id = $1")
                .bind(user_id.as_str())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| DomainError::database(format!("Failed to fetch profile: {}", e)))?;

        Ok(row.map(|r| Profile {
            name: r.name,
            age: r.age,
            gender: r.gender,
        }))
    }
}
