/// Project use cases
///
/// Projects are owner-administered: anyone authenticated can create one,
/// but mutation and deletion are strictly owner-only. Reads go through the
/// visibility rule (owner, or collaborator via an assigned task).
///
/// Deleting a project cascades to its tasks, their comments, and the
/// project-scoped activity records via the schema's FK cascades.

use serde::Serialize;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::models::project::{CreateProject, Project, UpdateProject};
use crate::policy;
use crate::query::{Page, ProjectSort};
use crate::recorder;
use crate::service::{ServiceError, ServiceResult};

/// Input for creating a project
#[derive(Debug, Clone)]
pub struct CreateProjectInput {
    /// Project title
    pub title: String,

    /// Optional description
    pub description: Option<String>,
}

/// Input for updating a project
///
/// Omitted fields keep their prior values.
#[derive(Debug, Clone, Default)]
pub struct UpdateProjectInput {
    /// New title
    pub title: Option<String>,

    /// New description
    pub description: Option<String>,
}

/// One page of a project listing
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectListing {
    /// Projects on this page
    pub projects: Vec<Project>,

    /// ceil(matching / limit)
    pub total_pages: i64,

    /// The 1-indexed page that was returned
    pub current_page: i64,
}

/// Creates a project owned by the caller and records `project_created`
pub async fn create(
    pool: &PgPool,
    actor: Uuid,
    input: CreateProjectInput,
) -> ServiceResult<Project> {
    let mut tx = pool.begin().await?;

    let project = Project::create(
        &mut *tx,
        CreateProject {
            title: input.title,
            description: input.description.unwrap_or_default(),
            owner_id: actor,
        },
    )
    .await?;

    recorder::project_created(&mut *tx, actor, &project).await?;

    tx.commit().await?;

    info!(project_id = %project.id, owner_id = %actor, "Project created");

    Ok(project)
}

/// Fetches one project, subject to visibility
///
/// Absent and invisible projects are indistinguishable to the caller.
pub async fn get(pool: &PgPool, actor: Uuid, id: Uuid) -> ServiceResult<Project> {
    let project = Project::find_by_id(pool, id)
        .await?
        .ok_or(ServiceError::NotFound("project"))?;

    if !policy::can_view_project(pool, actor, &project).await? {
        return Err(ServiceError::NotFound("project"));
    }

    Ok(project)
}

/// Lists the projects visible to the caller
///
/// The viewer predicate is folded into the SQL; `sort` is parsed with a
/// fallback to newest-first and pagination reports `total_pages`.
pub async fn list(
    pool: &PgPool,
    actor: Uuid,
    search: Option<String>,
    sort: Option<String>,
    page: Page,
) -> ServiceResult<ProjectListing> {
    let sort = ProjectSort::parse(sort.as_deref());
    let search = search.as_deref().filter(|s| !s.is_empty());

    let total = Project::count_visible(pool, actor, search).await?;
    let projects = Project::list_visible(pool, actor, search, sort, &page).await?;

    Ok(ProjectListing {
        projects,
        total_pages: page.total_pages(total),
        current_page: page.number(),
    })
}

/// Updates a project's title/description, owner-only
pub async fn update(
    pool: &PgPool,
    actor: Uuid,
    id: Uuid,
    input: UpdateProjectInput,
) -> ServiceResult<Project> {
    let mut tx = pool.begin().await?;

    let project = Project::find_by_id(&mut *tx, id)
        .await?
        .ok_or(ServiceError::NotFound("project"))?;

    if !policy::can_view_project(&mut *tx, actor, &project).await? {
        return Err(ServiceError::NotFound("project"));
    }
    if !policy::can_modify_project(actor, &project) {
        return Err(ServiceError::Forbidden("Only the project owner can update it"));
    }

    let updated = Project::update(
        &mut *tx,
        id,
        UpdateProject {
            title: input.title,
            description: input.description,
        },
    )
    .await?
    .ok_or(ServiceError::NotFound("project"))?;

    tx.commit().await?;

    Ok(updated)
}

/// Deletes a project and everything nested inside it, owner-only
///
/// No activity is recorded for deletions.
pub async fn delete(pool: &PgPool, actor: Uuid, id: Uuid) -> ServiceResult<()> {
    let mut tx = pool.begin().await?;

    let project = Project::find_by_id(&mut *tx, id)
        .await?
        .ok_or(ServiceError::NotFound("project"))?;

    if !policy::can_view_project(&mut *tx, actor, &project).await? {
        return Err(ServiceError::NotFound("project"));
    }
    if !policy::can_delete_project(actor, &project) {
        return Err(ServiceError::Forbidden("Only the project owner can delete it"));
    }

    Project::delete(&mut *tx, id).await?;

    tx.commit().await?;

    info!(project_id = %id, owner_id = %actor, "Project deleted");

    Ok(())
}
