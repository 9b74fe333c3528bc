use axum::extract::{Json, State};
use axum::response::IntoResponse;

use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::state::AppState;
use crate::application::handlers::GetProfileOverviewQuery;

/// GET /api/profile - demographics plus a summary of the caller's history.
pub async fn get_profile(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let overview = state
        .profile_overview_handler()
        .handle(GetProfileOverviewQuery { user_id: user.id })
        .await?;
    Ok(Json(overview))
}
