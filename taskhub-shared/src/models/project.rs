/// Project model and database operations
///
/// Projects are the unit of ownership in TaskHub: each project is exclusively
/// administered by the user who created it, and ownership never transfers.
/// Collaborators gain limited visibility through task assignment, which is
/// why every listing query here folds the viewer's identity into the SQL
/// predicate instead of filtering rows after an unrestricted fetch.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE projects (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     title VARCHAR(255) NOT NULL,
///     description TEXT NOT NULL DEFAULT '',
///     owner_id UUID NOT NULL REFERENCES users(id),
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// Tasks reference projects with ON DELETE CASCADE, so deleting a project
/// removes its tasks (and, through the task FK, their comments).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgExecutor;
use uuid::Uuid;

use crate::query::{Page, ProjectSort};

/// Project model
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Unique project ID
    pub id: Uuid,

    /// Project title
    pub title: String,

    /// Free-form description
    pub description: String,

    /// Owning user; immutable after creation
    pub owner_id: Uuid,

    /// When the project was created
    pub created_at: DateTime<Utc>,

    /// When the project was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new project
#[derive(Debug, Clone)]
pub struct CreateProject {
    /// Project title
    pub title: String,

    /// Description (empty string if the caller omitted it)
    pub description: String,

    /// Owning user
    pub owner_id: Uuid,
}

/// Input for updating a project
///
/// Omitted fields keep their prior values.
#[derive(Debug, Clone, Default)]
pub struct UpdateProject {
    /// New title
    pub title: Option<String>,

    /// New description
    pub description: Option<String>,
}

impl Project {
    /// Creates a new project
    pub async fn create(
        db: impl PgExecutor<'_>,
        data: CreateProject,
    ) -> Result<Self, sqlx::Error> {
        let project = sqlx::query_as::<_, Project>(
            r#"
            INSERT INTO projects (title, description, owner_id)
            VALUES ($1, $2, $3)
            RETURNING id, title, description, owner_id, created_at, updated_at
            "#,
        )
        .bind(data.title)
        .bind(data.description)
        .bind(data.owner_id)
        .fetch_one(db)
        .await?;

        Ok(project)
    }

    /// Finds a project by ID
    pub async fn find_by_id(
        db: impl PgExecutor<'_>,
        id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        let project = sqlx::query_as::<_, Project>(
            r#"
            SELECT id, title, description, owner_id, created_at, updated_at
            FROM projects
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;

        Ok(project)
    }

    /// Updates a project's title/description
    ///
    /// # Returns
    ///
    /// The updated project if found, None if the project doesn't exist
    pub async fn update(
        db: impl PgExecutor<'_>,
        id: Uuid,
        data: UpdateProject,
    ) -> Result<Option<Self>, sqlx::Error> {
        let project = sqlx::query_as::<_, Project>(
            r#"
            UPDATE projects
            SET title = COALESCE($2, title),
                description = COALESCE($3, description),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, title, description, owner_id, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(data.title)
        .bind(data.description)
        .fetch_optional(db)
        .await?;

        Ok(project)
    }

    /// Deletes a project
    ///
    /// The task FK cascades, so this also removes the project's tasks, their
    /// comments, and project-scoped activity records.
    pub async fn delete(db: impl PgExecutor<'_>, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Lists the projects visible to a viewer, with search, sort, and pagination
    ///
    /// A project is visible when the viewer owns it or holds at least one
    /// assigned task inside it. The predicate is part of the query itself;
    /// no post-filtering happens in application code.
    pub async fn list_visible(
        db: impl PgExecutor<'_>,
        viewer: Uuid,
        search: Option<&str>,
        sort: ProjectSort,
        page: &Page,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let sql = format!(
            r#"
            SELECT p.id, p.title, p.description, p.owner_id, p.created_at, p.updated_at
            FROM projects p
            WHERE (p.owner_id = $1
                   OR EXISTS (SELECT 1 FROM tasks t
                              WHERE t.project_id = p.id AND t.assigned_to = $1))
              AND ($2::text IS NULL OR p.title ILIKE ('%' || $2 || '%'))
            {}
            LIMIT $3 OFFSET $4
            "#,
            sort.order_by()
        );

        let projects = sqlx::query_as::<_, Project>(&sql)
            .bind(viewer)
            .bind(search)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(db)
            .await?;

        Ok(projects)
    }

    /// Counts the projects matching `list_visible` for pagination arithmetic
    pub async fn count_visible(
        db: impl PgExecutor<'_>,
        viewer: Uuid,
        search: Option<&str>,
    ) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*)
            FROM projects p
            WHERE (p.owner_id = $1
                   OR EXISTS (SELECT 1 FROM tasks t
                              WHERE t.project_id = p.id AND t.assigned_to = $1))
              AND ($2::text IS NULL OR p.title ILIKE ('%' || $2 || '%'))
            "#,
        )
        .bind(viewer)
        .bind(search)
        .fetch_one(db)
        .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_serializes_camel_case() {
        let project = Project {
            id: Uuid::new_v4(),
            title: "Launch".to_string(),
            description: String::new(),
            owner_id: Uuid::new_v4(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let json = serde_json::to_string(&project).unwrap();
        assert!(json.contains("\"ownerId\""));
        assert!(json.contains("\"createdAt\""));
        assert!(!json.contains("owner_id"));
    }

    #[test]
    fn test_update_project_default_keeps_everything() {
        let update = UpdateProject::default();
        assert!(update.title.is_none());
        assert!(update.description.is_none());
    }
}
