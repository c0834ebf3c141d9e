/// Comment endpoints
///
/// # Endpoints
///
/// - `POST /comments` - Add a comment to a visible task (+ activity)
/// - `GET /comments/:task_id` - A task's comments, newest first
///
/// Comment visibility follows task visibility; comments are immutable.

use crate::{app::AppState, error::ApiResult};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use taskhub_shared::auth::middleware::AuthContext;
use taskhub_shared::models::comment::Comment;
use taskhub_shared::service::comment::{self, CreateCommentInput};
use uuid::Uuid;
use validator::Validate;

/// Create comment request
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentRequest {
    /// Comment body
    #[validate(length(min = 1, max = 2000, message = "Comment must be 1-2000 characters"))]
    pub text: String,

    /// Task being discussed
    pub task_id: Uuid,
}

/// Creates a comment on a task the caller can see
pub async fn create_comment(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<CreateCommentRequest>,
) -> ApiResult<(StatusCode, Json<Comment>)> {
    req.validate()?;

    let created = comment::create(
        &state.db,
        auth.user_id,
        CreateCommentInput {
            text: req.text,
            task_id: req.task_id,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(created)))
}

/// Lists a task's comments, newest first
pub async fn list_comments(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(task_id): Path<Uuid>,
) -> ApiResult<Json<Vec<Comment>>> {
    let comments = comment::list(&state.db, auth.user_id, task_id).await?;

    Ok(Json(comments))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_comment_request_validation() {
        let valid = CreateCommentRequest {
            text: "looks good".to_string(),
            task_id: Uuid::new_v4(),
        };
        assert!(valid.validate().is_ok());

        let empty = CreateCommentRequest {
            text: String::new(),
            task_id: Uuid::new_v4(),
        };
        assert!(empty.validate().is_err());
    }
}
