/// Activity recorder
///
/// Appends exactly one audit record for each qualifying state transition:
/// task creation, a task's transition into completed, comment creation, and
/// project creation. Nothing is recorded for other edits or for deletions.
///
/// Recording runs on the same executor as the primary mutation, so services
/// pass their open transaction and the pair commits or rolls back together.
///
/// The text is what the feed renders next to the actor's username, e.g.
/// `ada created task "Write spec"`, so each helper phrases the fragment
/// from the actor's point of view.

use sqlx::PgExecutor;
use uuid::Uuid;

use crate::models::activity::{Activity, ActivityKind, NewActivity};
use crate::models::project::Project;
use crate::models::task::Task;

/// Records that a task was created
pub async fn task_created(
    db: impl PgExecutor<'_>,
    actor: Uuid,
    task: &Task,
) -> Result<Activity, sqlx::Error> {
    Activity::create(
        db,
        NewActivity {
            text: format!("created task \"{}\"", task.title),
            actor_id: actor,
            project_id: Some(task.project_id),
            kind: ActivityKind::TaskCreated,
        },
    )
    .await
}

/// Records that a task transitioned into completed
///
/// Callers are responsible for the idempotence gate: this is only invoked
/// when the prior status was not completed.
pub async fn task_completed(
    db: impl PgExecutor<'_>,
    actor: Uuid,
    task: &Task,
) -> Result<Activity, sqlx::Error> {
    Activity::create(
        db,
        NewActivity {
            text: format!("completed task \"{}\"", task.title),
            actor_id: actor,
            project_id: Some(task.project_id),
            kind: ActivityKind::TaskCompleted,
        },
    )
    .await
}

/// Records that a comment was added to a task
pub async fn comment_added(
    db: impl PgExecutor<'_>,
    actor: Uuid,
    task: &Task,
) -> Result<Activity, sqlx::Error> {
    Activity::create(
        db,
        NewActivity {
            text: format!("commented on task \"{}\"", task.title),
            actor_id: actor,
            project_id: Some(task.project_id),
            kind: ActivityKind::CommentAdded,
        },
    )
    .await
}

/// Records that a project was created
pub async fn project_created(
    db: impl PgExecutor<'_>,
    actor: Uuid,
    project: &Project,
) -> Result<Activity, sqlx::Error> {
    Activity::create(
        db,
        NewActivity {
            text: format!("created project \"{}\"", project.title),
            actor_id: actor,
            project_id: Some(project.id),
            kind: ActivityKind::ProjectCreated,
        },
    )
    .await
}
