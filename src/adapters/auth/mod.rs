//! Authentication adapters.
//!
//! - `JwtSessionValidator` - HS256 bearer tokens from the identity provider
//! - `MockSessionValidator` - token table for tests
//! - `SessionStore` - process-scoped current identity with change listeners

mod jwt;
mod mock;
mod session_store;

pub use jwt::{JwtConfig, JwtSessionValidator};
pub use mock::MockSessionValidator;
pub use session_store::{ListenerHandle, SessionStore};
