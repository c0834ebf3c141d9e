/// User directory and profile endpoints
///
/// # Endpoints
///
/// - `GET /users` - Compact directory for assignment pickers
/// - `GET /users/me` - Current user's profile
/// - `PUT /users/profile` - Update own profile fields
///
/// Profiles are mutated only by their owner; there is no admin path.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{extract::State, Extension, Json};
use taskhub_shared::auth::middleware::AuthContext;
use taskhub_shared::models::user::{UpdateProfile, User, UserSummary};

/// Lists all users as compact summaries
///
/// Used by clients to populate assignee dropdowns.
pub async fn list_users(
    State(state): State<AppState>,
    Extension(_auth): Extension<AuthContext>,
) -> ApiResult<Json<Vec<UserSummary>>> {
    let users = User::list_summaries(&state.db).await?;

    Ok(Json(users))
}

/// Returns the authenticated user's profile
pub async fn me(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<User>> {
    let user = User::find_by_id(&state.db, auth.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(Json(user))
}

/// Updates the authenticated user's profile
///
/// Omitted fields keep their prior values.
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<UpdateProfile>,
) -> ApiResult<Json<User>> {
    let user = User::update_profile(&state.db, auth.user_id, req)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    tracing::info!(user_id = %user.id, "Profile updated");

    Ok(Json(user))
}
