//! Profile endpoint.

mod handlers;

pub use handlers::get_profile;
