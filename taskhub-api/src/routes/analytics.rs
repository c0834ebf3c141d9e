/// Analytics endpoints
///
/// # Endpoints
///
/// - `GET /analytics/overview` - Owner-scoped counters for the dashboard

use crate::{app::AppState, error::ApiResult};
use axum::{extract::State, Extension, Json};
use taskhub_shared::auth::middleware::AuthContext;
use taskhub_shared::service::analytics::{self, Overview};

/// Returns project/task counters scoped to what the caller owns
pub async fn overview(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<Overview>> {
    let counters = analytics::overview(&state.db, auth.user_id).await?;

    Ok(Json(counters))
}
