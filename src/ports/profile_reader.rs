//! ProfileReader port for the signed-in user's basic profile.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, UserId};

/// Basic demographic profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub name: Option<String>,
    pub age: Option<i32>,
    pub gender: Option<String>,
}

#[async_trait]
pub trait ProfileReader: Send + Sync {
    /// Returns `None` when the user has not filled in a profile.
    async fn get_profile(&self, user_id: &UserId) -> Result<Option<Profile>, DomainError>;
}
