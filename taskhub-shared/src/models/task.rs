/// Task model and database operations
///
/// Tasks are the unit of collaboration in TaskHub. A task always belongs to
/// exactly one project; it is administered by the project owner and may be
/// shared with one assignee, which grants that user task-scoped visibility
/// and edit rights without granting anything at the project level.
///
/// # Status
///
/// ```text
/// todo ⇄ in_progress ⇄ completed
/// ```
///
/// All transitions are allowed through the update path; only a transition
/// *into* completed from a different status emits a `task_completed`
/// activity record (see the recorder module).
///
/// # Schema
///
/// ```sql
/// CREATE TYPE task_status AS ENUM ('todo', 'in_progress', 'completed');
/// CREATE TYPE task_priority AS ENUM ('low', 'medium', 'high');
///
/// CREATE TABLE tasks (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     title VARCHAR(255) NOT NULL,
///     description TEXT NOT NULL DEFAULT '',
///     status task_status NOT NULL DEFAULT 'todo',
///     priority task_priority NOT NULL DEFAULT 'medium',
///     deadline TIMESTAMPTZ,
///     project_id UUID NOT NULL REFERENCES projects(id) ON DELETE CASCADE,
///     assigned_to UUID REFERENCES users(id),
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgExecutor;
use uuid::Uuid;

use crate::query::{Page, TaskFilter, TaskSort};

/// Task workflow status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "task_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Not started
    Todo,

    /// Being worked on
    InProgress,

    /// Done
    Completed,
}

impl TaskStatus {
    /// Converts status to its wire/database string
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "todo",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Completed => "completed",
        }
    }

    /// Whether this status is `completed`
    pub fn is_completed(&self) -> bool {
        matches!(self, TaskStatus::Completed)
    }
}

/// Task priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "task_priority", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    /// Low priority
    Low,

    /// Medium priority (the creation default)
    Medium,

    /// High priority
    High,
}

impl TaskPriority {
    /// Converts priority to its wire/database string
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskPriority::Low => "low",
            TaskPriority::Medium => "medium",
            TaskPriority::High => "high",
        }
    }

    /// Severity rank: higher is more urgent
    ///
    /// The priority sort key orders by this rank descending.
    pub fn severity(&self) -> u8 {
        match self {
            TaskPriority::Low => 0,
            TaskPriority::Medium => 1,
            TaskPriority::High => 2,
        }
    }
}

/// Task model
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique task ID
    pub id: Uuid,

    /// Task title
    pub title: String,

    /// Free-form description
    pub description: String,

    /// Workflow status
    pub status: TaskStatus,

    /// Priority
    pub priority: TaskPriority,

    /// Optional due date
    pub deadline: Option<DateTime<Utc>>,

    /// Owning project
    pub project_id: Uuid,

    /// Assignee, if the task has been shared with a collaborator
    #[serde(rename = "assignedToId")]
    pub assigned_to: Option<Uuid>,

    /// When the task was created
    pub created_at: DateTime<Utc>,

    /// When the task was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new task
///
/// The service layer resolves defaults before this reaches the database:
/// status starts at `todo`, priority defaults to medium, and `assigned_to`
/// defaults to the creator when the caller omitted it.
#[derive(Debug, Clone)]
pub struct CreateTask {
    /// Task title
    pub title: String,

    /// Description (empty string if the caller omitted it)
    pub description: String,

    /// Priority; None uses the column default (medium)
    pub priority: Option<TaskPriority>,

    /// Optional due date
    pub deadline: Option<DateTime<Utc>>,

    /// Owning project
    pub project_id: Uuid,

    /// Assignee
    pub assigned_to: Option<Uuid>,
}

/// Resolved field patch for a task update
///
/// Every field is optional with merge semantics: None keeps the prior value.
/// The tri-state assignee handling (omitted / empty / explicit null) is
/// resolved by the service before this struct is built, so by this point
/// `assigned_to` is either "keep" (None) or a concrete user.
#[derive(Debug, Clone, Default)]
pub struct UpdateTaskFields {
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

    /// New assignee
    pub assigned_to: Option<Uuid>,
}

impl Task {
    /// Creates a new task
    pub async fn create(db: impl PgExecutor<'_>, data: CreateTask) -> Result<Self, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (title, description, priority, deadline, project_id, assigned_to)
            VALUES ($1, $2, COALESCE($3, 'medium'::task_priority), $4, $5, $6)
            RETURNING id, title, description, status, priority, deadline,
                      project_id, assigned_to, created_at, updated_at
            "#,
        )
        .bind(data.title)
        .bind(data.description)
        .bind(data.priority)
        .bind(data.deadline)
        .bind(data.project_id)
        .bind(data.assigned_to)
        .fetch_one(db)
        .await?;

        Ok(task)
    }

    /// Finds a task by ID
    pub async fn find_by_id(
        db: impl PgExecutor<'_>,
        id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, title, description, status, priority, deadline,
                   project_id, assigned_to, created_at, updated_at
            FROM tasks
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;

        Ok(task)
    }

    /// Applies a field patch with merge semantics
    ///
    /// Omitted (None) fields keep their prior values; `updated_at` is bumped.
    ///
    /// # Returns
    ///
    /// The updated task if found, None if the task doesn't exist
    pub async fn update(
        db: impl PgExecutor<'_>,
        id: Uuid,
        data: UpdateTaskFields,
    ) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks
            SET title = COALESCE($2, title),
                description = COALESCE($3, description),
                status = COALESCE($4, status),
                priority = COALESCE($5, priority),
                deadline = COALESCE($6, deadline),
                assigned_to = COALESCE($7, assigned_to),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, title, description, status, priority, deadline,
                      project_id, assigned_to, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(data.title)
        .bind(data.description)
        .bind(data.status)
        .bind(data.priority)
        .bind(data.deadline)
        .bind(data.assigned_to)
        .fetch_optional(db)
        .await?;

        Ok(task)
    }

    /// Deletes a task
    ///
    /// Comments on the task are removed by the FK cascade.
    pub async fn delete(db: impl PgExecutor<'_>, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Checks whether a user holds at least one assigned task in a project
    ///
    /// This is the relationship behind collaborator visibility: one assigned
    /// task makes the project (and further task creation in it) available to
    /// the assignee.
    pub async fn exists_assigned_in_project(
        db: impl PgExecutor<'_>,
        user: Uuid,
        project: Uuid,
    ) -> Result<bool, sqlx::Error> {
        let (found,): (bool,) = sqlx::query_as(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM tasks
                WHERE project_id = $1 AND assigned_to = $2
            )
            "#,
        )
        .bind(project)
        .bind(user)
        .fetch_one(db)
        .await?;

        Ok(found)
    }

    /// Lists the tasks visible to a viewer, with filters, sort, and pagination
    ///
    /// Visibility is part of the predicate: the viewer owns the parent
    /// project or is the assignee. Within a project this means the owner
    /// sees every task while a collaborator sees only their own. No
    /// post-filtering happens in application code.
    pub async fn list_visible(
        db: impl PgExecutor<'_>,
        viewer: Uuid,
        filter: &TaskFilter,
        sort: TaskSort,
        page: &Page,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let sql = format!(
            r#"
            SELECT t.id, t.title, t.description, t.status, t.priority, t.deadline,
                   t.project_id, t.assigned_to, t.created_at, t.updated_at
            FROM tasks t
            JOIN projects p ON p.id = t.project_id
            WHERE (p.owner_id = $1 OR t.assigned_to = $1)
              AND ($2::uuid IS NULL OR t.project_id = $2)
              AND ($3::task_status IS NULL OR t.status = $3)
              AND ($4::task_priority IS NULL OR t.priority = $4)
              AND ($5::text IS NULL OR t.title ILIKE ('%' || $5 || '%'))
            {}
            LIMIT $6 OFFSET $7
            "#,
            sort.order_by()
        );

        let tasks = sqlx::query_as::<_, Task>(&sql)
            .bind(viewer)
            .bind(filter.project_id)
            .bind(filter.status)
            .bind(filter.priority)
            .bind(filter.search.as_deref())
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(db)
            .await?;

        Ok(tasks)
    }

    /// Counts the tasks matching `list_visible` for pagination arithmetic
    pub async fn count_visible(
        db: impl PgExecutor<'_>,
        viewer: Uuid,
        filter: &TaskFilter,
    ) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*)
            FROM tasks t
            JOIN projects p ON p.id = t.project_id
            WHERE (p.owner_id = $1 OR t.assigned_to = $1)
              AND ($2::uuid IS NULL OR t.project_id = $2)
              AND ($3::task_status IS NULL OR t.status = $3)
              AND ($4::task_priority IS NULL OR t.priority = $4)
              AND ($5::text IS NULL OR t.title ILIKE ('%' || $5 || '%'))
            "#,
        )
        .bind(viewer)
        .bind(filter.project_id)
        .bind(filter.status)
        .bind(filter.priority)
        .bind(filter.search.as_deref())
        .fetch_one(db)
        .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_status_as_str() {
        assert_eq!(TaskStatus::Todo.as_str(), "todo");
        assert_eq!(TaskStatus::InProgress.as_str(), "in_progress");
        assert_eq!(TaskStatus::Completed.as_str(), "completed");
    }

    #[test]
    fn test_task_status_wire_format() {
        assert_eq!(
            serde_json::to_string(&TaskStatus::InProgress).unwrap(),
            "\"in_progress\""
        );
        let parsed: TaskStatus = serde_json::from_str("\"completed\"").unwrap();
        assert_eq!(parsed, TaskStatus::Completed);
    }

    #[test]
    fn test_priority_severity_ordering() {
        assert!(TaskPriority::High.severity() > TaskPriority::Medium.severity());
        assert!(TaskPriority::Medium.severity() > TaskPriority::Low.severity());
    }

    #[test]
    fn test_task_serializes_assigned_to_id() {
        let task = Task {
            id: Uuid::new_v4(),
            title: "Write spec".to_string(),
            description: String::new(),
            status: TaskStatus::Todo,
            priority: TaskPriority::Medium,
            deadline: None,
            project_id: Uuid::new_v4(),
            assigned_to: Some(Uuid::new_v4()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let json = serde_json::to_string(&task).unwrap();
        assert!(json.contains("\"assignedToId\""));
        assert!(json.contains("\"projectId\""));
        assert!(json.contains("\"status\":\"todo\""));
    }

    #[test]
    fn test_update_fields_default_keeps_everything() {
        let patch = UpdateTaskFields::default();
        assert!(patch.title.is_none());
        assert!(patch.status.is_none());
        assert!(patch.assigned_to.is_none());
    }
}
