/// Recent-changes feed endpoint
///
/// # Endpoints
///
/// - `GET /activities` - The viewer's ten most recent activity records
///
/// The feed unions activity in projects the viewer owns with activity the
/// viewer performed anywhere, newest first.

use crate::{app::AppState, error::ApiResult};
use axum::{extract::State, Extension, Json};
use taskhub_shared::auth::middleware::AuthContext;
use taskhub_shared::models::activity::FeedActivity;
use taskhub_shared::service::activity;

/// Returns the caller's recent feed
pub async fn recent_activity(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<Vec<FeedActivity>>> {
    let activities = activity::feed(&state.db, auth.user_id).await?;

    Ok(Json(activities))
}
