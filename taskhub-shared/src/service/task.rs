/// Task use cases
///
/// Task operations carry the subtlest policy in the system: creation is
/// open to the owner and to existing collaborators, modification to the
/// owner and the assignee, deletion to the owner alone. Every mutating
/// path loads the task and its parent project, checks the policy, applies
/// the change, and records any qualifying activity inside one transaction.
///
/// # Assignee handling
///
/// The wire field `assignedToId` is tri-state on update:
///
/// - omitted → keep the current assignee
/// - `""` → reassign to the caller
/// - a user id → reassign to that user (must exist)
/// - explicit `null` → rejected as a validation error
///
/// On create, omitted and `""` both default to the caller.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::models::project::Project;
use crate::models::task::{CreateTask, Task, TaskPriority, TaskStatus, UpdateTaskFields};
use crate::models::user::User;
use crate::policy;
use crate::query::{Page, TaskFilter, TaskSort};
use crate::recorder;
use crate::service::{ServiceError, ServiceResult};

/// Input for creating a task
#[derive(Debug, Clone)]
pub struct CreateTaskInput {
    /// Task title
    pub title: String,

    /// Optional description
    pub description: Option<String>,

    /// Optional priority (defaults to medium)
    pub priority: Option<TaskPriority>,

    /// Optional due date
    pub deadline: Option<DateTime<Utc>>,

    /// Owning project
    pub project_id: Uuid,

    /// Raw assignee field; omitted or empty defaults to the caller
    pub assigned_to_id: Option<String>,
}

/// Input for a partial task update
///
/// Omitted fields keep their prior values. `assigned_to_id` distinguishes
/// "omitted" (outer None) from "explicit null" (inner None); see the module
/// docs for the tri-state contract.
#[derive(Debug, Clone, Default)]
pub struct UpdateTaskInput {
    /// New title
    pub title: Option<String>,

    /// New description
    pub description: Option<String>,

    /// New status
    pub status: Option<TaskStatus>,

    /// New priority
    pub priority: Option<TaskPriority>,

    /// New deadline
    pub deadline: Option<DateTime<Utc>>,

    /// Raw assignee field
    pub assigned_to_id: Option<Option<String>>,
}

/// One page of a task listing
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskListing {
    /// Tasks on this page
    pub tasks: Vec<Task>,

    /// ceil(matching / limit)
    pub total_pages: i64,

    /// The 1-indexed page that was returned
    pub current_page: i64,
}

/// Resolves a raw assignee string to a user id
///
/// Empty means "the caller"; anything else must parse as a UUID and
/// reference an existing user.
async fn resolve_assignee(
    db: impl sqlx::PgExecutor<'_>,
    actor: Uuid,
    raw: &str,
) -> ServiceResult<Uuid> {
    if raw.is_empty() {
        return Ok(actor);
    }

    let id = Uuid::parse_str(raw).map_err(|_| {
        ServiceError::Validation("assignedToId must be a valid user id".to_string())
    })?;

    if !User::exists(db, id).await? {
        return Err(ServiceError::Validation(
            "assignedToId does not reference an existing user".to_string(),
        ));
    }

    Ok(id)
}

/// Creates a task and records `task_created`
///
/// Fails NotFound when the project is absent (or invisible, same answer)
/// and Forbidden when the caller is neither the owner nor an existing
/// collaborator in the project.
pub async fn create(pool: &PgPool, actor: Uuid, input: CreateTaskInput) -> ServiceResult<Task> {
    let mut tx = pool.begin().await?;

    let project = Project::find_by_id(&mut *tx, input.project_id)
        .await?
        .ok_or(ServiceError::NotFound("project"))?;

    if !policy::can_create_task(&mut *tx, actor, &project).await? {
        return Err(ServiceError::Forbidden(
            "You need an assigned task in this project to add more",
        ));
    }

    let assigned_to = match input.assigned_to_id.as_deref() {
        None => actor,
        Some(raw) => resolve_assignee(&mut *tx, actor, raw).await?,
    };

    let task = Task::create(
        &mut *tx,
        CreateTask {
            title: input.title,
            description: input.description.unwrap_or_default(),
            priority: input.priority,
            deadline: input.deadline,
            project_id: project.id,
            assigned_to: Some(assigned_to),
        },
    )
    .await?;

    recorder::task_created(&mut *tx, actor, &task).await?;

    tx.commit().await?;

    info!(task_id = %task.id, project_id = %project.id, actor_id = %actor, "Task created");

    Ok(task)
}

/// Fetches one task, subject to visibility
pub async fn get(pool: &PgPool, actor: Uuid, id: Uuid) -> ServiceResult<Task> {
    let task = Task::find_by_id(pool, id)
        .await?
        .ok_or(ServiceError::NotFound("task"))?;

    let project = Project::find_by_id(pool, task.project_id)
        .await?
        .ok_or(ServiceError::NotFound("task"))?;

    if !policy::can_view_task(actor, task.assigned_to, project.owner_id) {
        return Err(ServiceError::NotFound("task"));
    }

    Ok(task)
}

/// Lists the tasks visible to the caller
///
/// When the filter names a project, the caller's access to that project is
/// re-checked independently of the row predicate: an absent or invisible
/// project answers NotFound rather than an empty page.
pub async fn list(
    pool: &PgPool,
    actor: Uuid,
    filter: TaskFilter,
    sort: Option<String>,
    page: Page,
) -> ServiceResult<TaskListing> {
    if let Some(project_id) = filter.project_id {
        let project = Project::find_by_id(pool, project_id)
            .await?
            .ok_or(ServiceError::NotFound("project"))?;

        if !policy::can_view_project(pool, actor, &project).await? {
            return Err(ServiceError::NotFound("project"));
        }
    }

    let sort = TaskSort::parse(sort.as_deref());

    let total = Task::count_visible(pool, actor, &filter).await?;
    let tasks = Task::list_visible(pool, actor, &filter, sort, &page).await?;

    Ok(TaskListing {
        tasks,
        total_pages: page.total_pages(total),
        current_page: page.number(),
    })
}

/// Applies a partial update to a task
///
/// Merge semantics throughout; a transition into completed from any other
/// status records `task_completed` exactly once; re-saving an already
/// completed task does not re-emit.
pub async fn update(
    pool: &PgPool,
    actor: Uuid,
    id: Uuid,
    input: UpdateTaskInput,
) -> ServiceResult<Task> {
    let mut tx = pool.begin().await?;

    let task = Task::find_by_id(&mut *tx, id)
        .await?
        .ok_or(ServiceError::NotFound("task"))?;

    let project = Project::find_by_id(&mut *tx, task.project_id)
        .await?
        .ok_or(ServiceError::NotFound("task"))?;

    if !policy::can_view_task(actor, task.assigned_to, project.owner_id) {
        return Err(ServiceError::NotFound("task"));
    }
    if !policy::can_modify_task(actor, task.assigned_to, project.owner_id) {
        return Err(ServiceError::Forbidden(
            "Only the project owner or the assignee can update this task",
        ));
    }

    let assigned_to = match input.assigned_to_id {
        None => None,
        Some(None) => {
            return Err(ServiceError::Validation(
                "assignedToId may not be null; send \"\" to take the task yourself".to_string(),
            ));
        }
        Some(Some(raw)) => Some(resolve_assignee(&mut *tx, actor, &raw).await?),
    };

    let was_completed = task.status.is_completed();

    let updated = Task::update(
        &mut *tx,
        id,
        UpdateTaskFields {
            title: input.title,
            description: input.description,
            status: input.status,
            priority: input.priority,
            deadline: input.deadline,
            assigned_to,
        },
    )
    .await?
    .ok_or(ServiceError::NotFound("task"))?;

    if updated.status.is_completed() && !was_completed {
        recorder::task_completed(&mut *tx, actor, &updated).await?;
    }

    tx.commit().await?;

    Ok(updated)
}

/// Deletes a task, owner-only
///
/// The assignee can see the task, so a non-owner assignee gets Forbidden
/// rather than NotFound. No activity is recorded for deletions.
pub async fn delete(pool: &PgPool, actor: Uuid, id: Uuid) -> ServiceResult<()> {
    let mut tx = pool.begin().await?;

    let task = Task::find_by_id(&mut *tx, id)
        .await?
        .ok_or(ServiceError::NotFound("task"))?;

    let project = Project::find_by_id(&mut *tx, task.project_id)
        .await?
        .ok_or(ServiceError::NotFound("task"))?;

    if !policy::can_view_task(actor, task.assigned_to, project.owner_id) {
        return Err(ServiceError::NotFound("task"));
    }
    if !policy::can_delete_task(actor, project.owner_id) {
        return Err(ServiceError::Forbidden(
            "Only the project owner can delete a task",
        ));
    }

    Task::delete(&mut *tx, id).await?;

    tx.commit().await?;

    info!(task_id = %id, actor_id = %actor, "Task deleted");

    Ok(())
}
