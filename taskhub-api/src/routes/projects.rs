/// Project endpoints
///
/// # Endpoints
///
/// - `GET /projects?search=&sort=&page=&limit=` - Visible projects, paginated
/// - `POST /projects` - Create a project
/// - `GET /projects/:id` - One project (404 when absent or invisible)
/// - `PUT /projects/:id` - Owner-only update
/// - `DELETE /projects/:id` - Owner-only delete with cascade
///
/// Visibility and ownership checks live in the service layer; handlers only
/// parse the request and map the result.

use crate::{app::AppState, error::ApiResult};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use taskhub_shared::auth::middleware::AuthContext;
use taskhub_shared::models::project::Project;
use taskhub_shared::query::Page;
use taskhub_shared::service::project::{
    self, CreateProjectInput, ProjectListing, UpdateProjectInput,
};
use uuid::Uuid;
use validator::Validate;

/// Query parameters for the project listing
#[derive(Debug, Default, Deserialize)]
pub struct ListProjectsQuery {
    /// Case-insensitive substring match on the title
    pub search: Option<String>,

    /// `field:direction` sort key (falls back to `createdAt:desc`)
    pub sort: Option<String>,

    /// 1-indexed page
    pub page: Option<i64>,

    /// Rows per page (default 10)
    pub limit: Option<i64>,
}

/// Create project request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateProjectRequest {
    /// Project title
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: String,

    /// Optional description
    pub description: Option<String>,
}

/// Update project request
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProjectRequest {
    /// New title
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: Option<String>,

    /// New description
    pub description: Option<String>,
}

/// Lists the projects visible to the caller
pub async fn list_projects(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Query(query): Query<ListProjectsQuery>,
) -> ApiResult<Json<ProjectListing>> {
    let page = Page::new(query.page, query.limit);

    let listing = project::list(&state.db, auth.user_id, query.search, query.sort, page).await?;

    Ok(Json(listing))
}

/// Creates a project owned by the caller
pub async fn create_project(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<CreateProjectRequest>,
) -> ApiResult<(StatusCode, Json<Project>)> {
    req.validate()?;

    let created = project::create(
        &state.db,
        auth.user_id,
        CreateProjectInput {
            title: req.title,
            description: req.description,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(created)))
}

/// Fetches one project
pub async fn get_project(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Project>> {
    let found = project::get(&state.db, auth.user_id, id).await?;

    Ok(Json(found))
}

/// Updates a project, owner-only
pub async fn update_project(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateProjectRequest>,
) -> ApiResult<Json<Project>> {
    req.validate()?;

    let updated = project::update(
        &state.db,
        auth.user_id,
        id,
        UpdateProjectInput {
            title: req.title,
            description: req.description,
        },
    )
    .await?;

    Ok(Json(updated))
}

/// Deletes a project and everything nested inside it, owner-only
pub async fn delete_project(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Value>> {
    project::delete(&state.db, auth.user_id, id).await?;

    Ok(Json(json!({ "message": "Project deleted" })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_project_request_validation() {
        let valid = CreateProjectRequest {
            title: "Launch".to_string(),
            description: None,
        };
        assert!(valid.validate().is_ok());

        let empty_title = CreateProjectRequest {
            title: String::new(),
            description: None,
        };
        assert!(empty_title.validate().is_err());

        let long_title = CreateProjectRequest {
            title: "a".repeat(256),
            description: None,
        };
        assert!(long_title.validate().is_err());
    }

    #[test]
    fn test_update_project_request_allows_omitted_fields() {
        let empty = UpdateProjectRequest {
            title: None,
            description: None,
        };
        assert!(empty.validate().is_ok());

        let bad_title = UpdateProjectRequest {
            title: Some(String::new()),
            description: None,
        };
        assert!(bad_title.validate().is_err());
    }
}
