/// Comment model and database operations
///
/// Comments are immutable discussion entries on tasks: no edit or delete
/// path exists. Anyone who can see a task can comment on it.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE comments (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     body TEXT NOT NULL,
///     task_id UUID NOT NULL REFERENCES tasks(id) ON DELETE CASCADE,
///     author_id UUID NOT NULL REFERENCES users(id),
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgExecutor;
use uuid::Uuid;

/// A comment joined with its author's username, as returned by the API
///
/// The wire field for the body is `text`, matching the client contract.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    /// Unique comment ID
    pub id: Uuid,

    /// Comment body
    #[serde(rename = "text")]
    pub body: String,

    /// Task the comment belongs to
    pub task_id: Uuid,

    /// Authoring user
    #[serde(rename = "userId")]
    pub author_id: Uuid,

    /// Author display name
    #[serde(rename = "username")]
    pub author_username: String,

    /// When the comment was created
    pub created_at: DateTime<Utc>,
}

/// Input for creating a comment
#[derive(Debug, Clone)]
pub struct CreateComment {
    /// Comment body
    pub body: String,

    /// Task being discussed
    pub task_id: Uuid,

    /// Authoring user
    pub author_id: Uuid,
}

impl Comment {
    /// Creates a comment and returns it joined with the author's username
    pub async fn create(
        db: impl PgExecutor<'_>,
        data: CreateComment,
    ) -> Result<Self, sqlx::Error> {
        let comment = sqlx::query_as::<_, Comment>(
            r#"
            WITH inserted AS (
                INSERT INTO comments (body, task_id, author_id)
                VALUES ($1, $2, $3)
                RETURNING id, body, task_id, author_id, created_at
            )
            SELECT i.id, i.body, i.task_id, i.author_id, u.username AS author_username,
                   i.created_at
            FROM inserted i
            JOIN users u ON u.id = i.author_id
            "#,
        )
        .bind(data.body)
        .bind(data.task_id)
        .bind(data.author_id)
        .fetch_one(db)
        .await?;

        Ok(comment)
    }

    /// Lists a task's comments, newest first
    ///
    /// Unpaginated: the set is bounded by the task's lifetime.
    pub async fn list_for_task(
        db: impl PgExecutor<'_>,
        task_id: Uuid,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let comments = sqlx::query_as::<_, Comment>(
            r#"
            SELECT c.id, c.body, c.task_id, c.author_id, u.username AS author_username,
                   c.created_at
            FROM comments c
            JOIN users u ON u.id = c.author_id
            WHERE c.task_id = $1
            ORDER BY c.created_at DESC
            "#,
        )
        .bind(task_id)
        .fetch_all(db)
        .await?;

        Ok(comments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comment_wire_format() {
        let comment = Comment {
            id: Uuid::new_v4(),
            body: "looks good".to_string(),
            task_id: Uuid::new_v4(),
            author_id: Uuid::new_v4(),
            author_username: "ada".to_string(),
            created_at: Utc::now(),
        };

        let json = serde_json::to_string(&comment).unwrap();
        assert!(json.contains("\"text\":\"looks good\""));
        assert!(json.contains("\"username\":\"ada\""));
        assert!(json.contains("\"taskId\""));
        assert!(!json.contains("\"body\""));
    }
}
