//! Profile query handlers.

mod get_profile_overview;

pub use get_profile_overview::{
    GetProfileOverviewHandler, GetProfileOverviewQuery, ProfileOverview,
};
