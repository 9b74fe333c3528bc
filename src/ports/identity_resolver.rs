//! Identity resolution port - "who is submitting right now?"
//!
//! The submission pipeline only needs the resolved user id. Token lifecycle
//! and change notification belong to the adapters.

use async_trait::async_trait;

use crate::domain::foundation::UserId;

/// Resolves the identity of the current session.
#[async_trait]
pub trait IdentityResolver: Send + Sync {
    /// Returns the signed-in user, or `None` when there is no active session.
    async fn current_user_id(&self) -> Option<UserId>;
}

/// Identity already established by the caller (e.g. validated request auth).
#[derive(Debug, Clone, Default)]
pub struct FixedIdentity(Option<UserId>);

impl FixedIdentity {
    pub fn signed_in(user_id: UserId) -> Self {
        Self(Some(user_id))
    }

    pub fn anonymous() -> Self {
        Self(None)
    }
}

impl From<Option<UserId>> for FixedIdentity {
    fn from(user_id: Option<UserId>) -> Self {
        Self(user_id)
    }
}

#[async_trait]
impl IdentityResolver for FixedIdentity {
    async fn current_user_id(&self) -> Option<UserId> {
        self.0.clone()
    }
}
