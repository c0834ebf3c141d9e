/// Comment use cases
///
/// Commenting follows task visibility: anyone who can see a task can
/// discuss it. Comments are immutable once created; creation records a
/// `comment_added` activity on the task's project.

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::comment::{Comment, CreateComment};
use crate::models::project::Project;
use crate::models::task::Task;
use crate::policy;
use crate::recorder;
use crate::service::{ServiceError, ServiceResult};

/// Input for creating a comment
#[derive(Debug, Clone)]
pub struct CreateCommentInput {
    /// Comment body
    pub text: String,

    /// Task being discussed
    pub task_id: Uuid,
}

/// Creates a comment on a task the caller can see
pub async fn create(
    pool: &PgPool,
    actor: Uuid,
    input: CreateCommentInput,
) -> ServiceResult<Comment> {
    let mut tx = pool.begin().await?;

    let task = Task::find_by_id(&mut *tx, input.task_id)
        .await?
        .ok_or(ServiceError::NotFound("task"))?;

    let project = Project::find_by_id(&mut *tx, task.project_id)
        .await?
        .ok_or(ServiceError::NotFound("task"))?;

    if !policy::can_comment(actor, &task, project.owner_id) {
        return Err(ServiceError::NotFound("task"));
    }

    let comment = Comment::create(
        &mut *tx,
        CreateComment {
            body: input.text,
            task_id: task.id,
            author_id: actor,
        },
    )
    .await?;

    recorder::comment_added(&mut *tx, actor, &task).await?;

    tx.commit().await?;

    Ok(comment)
}

/// Lists a task's comments, newest first
pub async fn list(pool: &PgPool, actor: Uuid, task_id: Uuid) -> ServiceResult<Vec<Comment>> {
    let task = Task::find_by_id(pool, task_id)
        .await?
        .ok_or(ServiceError::NotFound("task"))?;

    let project = Project::find_by_id(pool, task.project_id)
        .await?
        .ok_or(ServiceError::NotFound("task"))?;

    if !policy::can_view_task(actor, task.assigned_to, project.owner_id) {
        return Err(ServiceError::NotFound("task"));
    }

    let comments = Comment::list_for_task(pool, task_id).await?;

    Ok(comments)
}
