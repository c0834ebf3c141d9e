/// Task endpoints
///
/// # Endpoints
///
/// - `GET /tasks?projectId=&status=&priority=&search=&sort=&page=&limit=`
/// - `POST /tasks` - Create a task (owner or existing collaborator)
/// - `GET /tasks/:id` - One task (404 when absent or invisible)
/// - `PUT /tasks/:id` - Partial update (owner or assignee)
/// - `DELETE /tasks/:id` - Owner-only delete
///
/// The `assignedToId` field is tri-state on update: omitted keeps the
/// current assignee, `""` reassigns to the caller, a user id reassigns to
/// that user, and explicit `null` is rejected. The double-Option
/// deserializer below preserves the omitted/null distinction that serde
/// flattens by default.

use crate::{app::AppState, error::ApiResult};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::{json, Value};
use taskhub_shared::auth::middleware::AuthContext;
use taskhub_shared::models::task::{Task, TaskPriority, TaskStatus};
use taskhub_shared::query::{Page, TaskFilter};
use taskhub_shared::service::task::{self, CreateTaskInput, TaskListing, UpdateTaskInput};
use uuid::Uuid;
use validator::Validate;

/// Deserializes a field that must distinguish "omitted" from "null"
///
/// Missing field → `None` (via `#[serde(default)]`); present-but-null →
/// `Some(None)`; present value → `Some(Some(value))`.
fn double_option<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

/// Query parameters for the task listing
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListTasksQuery {
    /// Restrict to a single project (viewer access re-checked)
    pub project_id: Option<Uuid>,

    /// Exact status match
    pub status: Option<TaskStatus>,

    /// Exact priority match
    pub priority: Option<TaskPriority>,

    /// Case-insensitive substring match on the title
    pub search: Option<String>,

    /// Sort key: `deadline`, `priority`, or `createdAt` (the default)
    pub sort: Option<String>,

    /// 1-indexed page
    pub page: Option<i64>,

    /// Rows per page (default 10)
    pub limit: Option<i64>,
}

/// Create task request
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    /// Task title
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: String,

    /// Optional description
    pub description: Option<String>,

    /// Optional priority (defaults to medium)
    pub priority: Option<TaskPriority>,

    /// Optional due date
    pub deadline: Option<DateTime<Utc>>,

    /// Owning project
    pub project_id: Uuid,

    /// Assignee; omitted or empty defaults to the caller
    pub assigned_to_id: Option<String>,
}

/// Update task request
///
/// Every field is optional with merge semantics.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    /// New title
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: Option<String>,

    /// New description
    pub description: Option<String>,

    /// New status
    pub status: Option<TaskStatus>,

    /// New priority
    pub priority: Option<TaskPriority>,

    /// New deadline
    pub deadline: Option<DateTime<Utc>>,

    /// Tri-state assignee field (see module docs)
    #[serde(default, deserialize_with = "double_option")]
    pub assigned_to_id: Option<Option<String>>,
}

/// Lists the tasks visible to the caller
pub async fn list_tasks(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Query(query): Query<ListTasksQuery>,
) -> ApiResult<Json<TaskListing>> {
    let page = Page::new(query.page, query.limit);

    let filter = TaskFilter {
        project_id: query.project_id,
        status: query.status,
        priority: query.priority,
        search: query.search.filter(|s| !s.is_empty()),
    };

    let listing = task::list(&state.db, auth.user_id, filter, query.sort, page).await?;

    Ok(Json(listing))
}

/// Creates a task
pub async fn create_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<CreateTaskRequest>,
) -> ApiResult<(StatusCode, Json<Task>)> {
    req.validate()?;

    let created = task::create(
        &state.db,
        auth.user_id,
        CreateTaskInput {
            title: req.title,
            description: req.description,
            priority: req.priority,
            deadline: req.deadline,
            project_id: req.project_id,
            assigned_to_id: req.assigned_to_id,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(created)))
}

/// Fetches one task
pub async fn get_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Task>> {
    let found = task::get(&state.db, auth.user_id, id).await?;

    Ok(Json(found))
}

/// Applies a partial update to a task
pub async fn update_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateTaskRequest>,
) -> ApiResult<Json<Task>> {
    req.validate()?;

    let updated = task::update(
        &state.db,
        auth.user_id,
        id,
        UpdateTaskInput {
            title: req.title,
            description: req.description,
            status: req.status,
            priority: req.priority,
            deadline: req.deadline,
            assigned_to_id: req.assigned_to_id,
        },
    )
    .await?;

    Ok(Json(updated))
}

/// Deletes a task, owner-only
pub async fn delete_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Value>> {
    task::delete(&state.db, auth.user_id, id).await?;

    Ok(Json(json!({ "message": "Task deleted" })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_request_distinguishes_omitted_from_null() {
        let omitted: UpdateTaskRequest = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(omitted.assigned_to_id, None);

        let explicit_null: UpdateTaskRequest =
            serde_json::from_str(r#"{"assignedToId": null}"#).unwrap();
        assert_eq!(explicit_null.assigned_to_id, Some(None));

        let empty: UpdateTaskRequest =
            serde_json::from_str(r#"{"assignedToId": ""}"#).unwrap();
        assert_eq!(empty.assigned_to_id, Some(Some(String::new())));

        let concrete: UpdateTaskRequest =
            serde_json::from_str(r#"{"assignedToId": "abc"}"#).unwrap();
        assert_eq!(concrete.assigned_to_id, Some(Some("abc".to_string())));
    }

    #[test]
    fn test_update_request_parses_status_and_priority() {
        let req: UpdateTaskRequest =
            serde_json::from_str(r#"{"status": "in_progress", "priority": "high"}"#).unwrap();
        assert_eq!(req.status, Some(TaskStatus::InProgress));
        assert_eq!(req.priority, Some(TaskPriority::High));
    }

    #[test]
    fn test_create_request_validation() {
        let valid = CreateTaskRequest {
            title: "Write spec".to_string(),
            description: None,
            priority: None,
            deadline: None,
            project_id: Uuid::new_v4(),
            assigned_to_id: None,
        };
        assert!(valid.validate().is_ok());

        let empty_title = CreateTaskRequest {
            title: String::new(),
            description: None,
            priority: None,
            deadline: None,
            project_id: Uuid::new_v4(),
            assigned_to_id: None,
        };
        assert!(empty_title.validate().is_err());
    }

    #[test]
    fn test_create_request_parses_camel_case_wire_fields() {
        let req: CreateTaskRequest = serde_json::from_str(
            r#"{
                "title": "Write spec",
                "projectId": "550e8400-e29b-41d4-a716-446655440000",
                "assignedToId": ""
            }"#,
        )
        .unwrap();

        assert_eq!(req.title, "Write spec");
        assert_eq!(req.assigned_to_id, Some(String::new()));
    }
}
