//! In-memory implementation of ProfileReader.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::ports::{Profile, ProfileReader};

#[derive(Default)]
pub struct InMemoryProfileReader {
    profiles: RwLock<HashMap<UserId, Profile>>,
}

impl InMemoryProfileReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a user's profile.
    pub fn upsert(&self, user_id: UserId, profile: Profile) {
        if let Ok(mut profiles) = self.profiles.write() {
            profiles.insert(user_id, profile);
        }
    }
}

#[async_trait]
impl ProfileReader for InMemoryProfileReader {
    async fn get_profile(&self, user_id: &UserId) -> Result<Option<Profile>, DomainError> {
        let profiles = self
            .profiles
            .read()
            .map_err(|_| DomainError::new(ErrorCode::InternalError, "profile store lock poisoned"))?;
        Ok(profiles.get(user_id).cloned())
    }
}
