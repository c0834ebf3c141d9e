/// Activity model and database operations
///
/// Activities are the append-only audit trail behind the recent-changes
/// feed. Rows are never mutated or deleted through the API; the only
/// cleanup is the FK cascade when a project is removed.
///
/// # Schema
///
/// ```sql
/// CREATE TYPE activity_kind AS ENUM (
///     'task_created', 'task_completed', 'comment_added', 'project_created'
/// );
///
/// CREATE TABLE activities (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     text TEXT NOT NULL,
///     actor_id UUID NOT NULL REFERENCES users(id),
///     project_id UUID REFERENCES projects(id) ON DELETE CASCADE,
///     kind activity_kind NOT NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgExecutor;
use uuid::Uuid;

/// Kind of state transition an activity records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "activity_kind", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    /// A task was created
    TaskCreated,

    /// A task transitioned into completed
    TaskCompleted,

    /// A comment was added to a task
    CommentAdded,

    /// A project was created
    ProjectCreated,
}

impl ActivityKind {
    /// Converts kind to its wire/database string
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityKind::TaskCreated => "task_created",
            ActivityKind::TaskCompleted => "task_completed",
            ActivityKind::CommentAdded => "comment_added",
            ActivityKind::ProjectCreated => "project_created",
        }
    }
}

/// Activity model
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    /// Unique activity ID
    pub id: Uuid,

    /// Human-readable description of the transition
    pub text: String,

    /// User who performed the transition
    #[serde(rename = "userId")]
    pub actor_id: Uuid,

    /// Project the transition happened in, when applicable
    pub project_id: Option<Uuid>,

    /// Kind of transition
    #[serde(rename = "type")]
    pub kind: ActivityKind,

    /// When the record was appended
    pub created_at: DateTime<Utc>,
}

/// An activity joined with its actor's display fields, for the feed
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct FeedActivity {
    /// Unique activity ID
    pub id: Uuid,

    /// Human-readable description
    pub text: String,

    /// Actor user ID
    #[serde(rename = "userId")]
    pub actor_id: Uuid,

    /// Actor display name
    pub username: String,

    /// Actor avatar URL
    pub avatar: Option<String>,

    /// Project the transition happened in, when applicable
    pub project_id: Option<Uuid>,

    /// Kind of transition
    #[serde(rename = "type")]
    pub kind: ActivityKind,

    /// When the record was appended
    pub created_at: DateTime<Utc>,
}

/// Input for appending an activity record
#[derive(Debug, Clone)]
pub struct NewActivity {
    /// Human-readable description
    pub text: String,

    /// Acting user
    pub actor_id: Uuid,

    /// Project context, when applicable
    pub project_id: Option<Uuid>,

    /// Kind of transition
    pub kind: ActivityKind,
}

impl Activity {
    /// Appends an activity record
    pub async fn create(db: impl PgExecutor<'_>, data: NewActivity) -> Result<Self, sqlx::Error> {
        let activity = sqlx::query_as::<_, Activity>(
            r#"
            INSERT INTO activities (text, actor_id, project_id, kind)
            VALUES ($1, $2, $3, $4)
            RETURNING id, text, actor_id, project_id, kind, created_at
            "#,
        )
        .bind(data.text)
        .bind(data.actor_id)
        .bind(data.project_id)
        .bind(data.kind)
        .fetch_one(db)
        .await?;

        Ok(activity)
    }

    /// Loads the recent feed for a viewer
    ///
    /// The feed is the union of activity in projects the viewer owns and
    /// activity the viewer performed anywhere, newest first, capped at
    /// `limit` rows.
    pub async fn recent_for_viewer(
        db: impl PgExecutor<'_>,
        viewer: Uuid,
        limit: i64,
    ) -> Result<Vec<FeedActivity>, sqlx::Error> {
        let activities = sqlx::query_as::<_, FeedActivity>(
            r#"
            SELECT a.id, a.text, a.actor_id, u.username, u.avatar,
                   a.project_id, a.kind, a.created_at
            FROM activities a
            JOIN users u ON u.id = a.actor_id
            WHERE a.actor_id = $1
               OR a.project_id IN (SELECT id FROM projects WHERE owner_id = $1)
            ORDER BY a.created_at DESC
            LIMIT $2
            "#,
        )
        .bind(viewer)
        .bind(limit)
        .fetch_all(db)
        .await?;

        Ok(activities)
    }

    /// Counts activities of a given kind for a task's project
    ///
    /// Test support for the idempotent-completion property; not exposed
    /// through any route.
    pub async fn count_by_kind_for_project(
        db: impl PgExecutor<'_>,
        project_id: Uuid,
        kind: ActivityKind,
    ) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM activities WHERE project_id = $1 AND kind = $2",
        )
        .bind(project_id)
        .bind(kind)
        .fetch_one(db)
        .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activity_kind_as_str() {
        assert_eq!(ActivityKind::TaskCreated.as_str(), "task_created");
        assert_eq!(ActivityKind::TaskCompleted.as_str(), "task_completed");
        assert_eq!(ActivityKind::CommentAdded.as_str(), "comment_added");
        assert_eq!(ActivityKind::ProjectCreated.as_str(), "project_created");
    }

    #[test]
    fn test_activity_kind_wire_format() {
        assert_eq!(
            serde_json::to_string(&ActivityKind::CommentAdded).unwrap(),
            "\"comment_added\""
        );
    }

    #[test]
    fn test_feed_activity_serializes_type_field() {
        let activity = FeedActivity {
            id: Uuid::new_v4(),
            text: "created task \"Write spec\"".to_string(),
            actor_id: Uuid::new_v4(),
            username: "ada".to_string(),
            avatar: None,
            project_id: Some(Uuid::new_v4()),
            kind: ActivityKind::TaskCreated,
            created_at: Utc::now(),
        };

        let json = serde_json::to_string(&activity).unwrap();
        assert!(json.contains("\"type\":\"task_created\""));
        assert!(json.contains("\"userId\""));
    }
}
