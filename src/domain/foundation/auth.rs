//! Authentication types for the domain layer.
//!
//! An `AuthenticatedUser` is what a validated access token yields. The core
//! only ever needs the stable user identifier; the remaining claims are kept
//! for logging and the profile view.

use super::UserId;
use thiserror::Error;

/// User extracted from a validated access token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// Stable identifier from the `sub` claim.
    pub id: UserId,

    /// Email claim, when the identity provider includes one.
    pub email: Option<String>,

    /// Role claim (e.g. `authenticated`).
    pub role: Option<String>,
}

impl AuthenticatedUser {
    /// Creates a user carrying only an identifier.
    pub fn new(id: UserId) -> Self {
        Self {
            id,
            email: None,
            role: None,
        }
    }

    /// Attaches an email claim.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Attaches a role claim.
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }
}

/// Authentication errors that can occur during token validation or identity
/// resolution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The token is missing, malformed, or has an invalid signature.
    #[error("Invalid or expired token")]
    InvalidToken,

    /// The token has expired.
    #[error("Token expired")]
    TokenExpired,

    /// The identity collaborator could not be reached.
    #[error("Auth service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AuthError {
    /// Creates a service unavailable error with a message.
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable(message.into())
    }

    /// Returns true if the caller should sign in again.
    pub fn requires_reauthentication(&self) -> bool {
        matches!(self, AuthError::InvalidToken | AuthError::TokenExpired)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_attaches_optional_claims() {
        let user = AuthenticatedUser::new(UserId::new("user-123").unwrap())
            .with_email("a@example.com")
            .with_role("authenticated");

        assert_eq!(user.id.as_str(), "user-123");
        assert_eq!(user.email.as_deref(), Some("a@example.com"));
        assert_eq!(user.role.as_deref(), Some("authenticated"));
    }

    #[test]
    fn token_errors_require_reauthentication() {
        assert!(AuthError::InvalidToken.requires_reauthentication());
        assert!(AuthError::TokenExpired.requires_reauthentication());
        assert!(!AuthError::service_unavailable("down").requires_reauthentication());
    }
}
