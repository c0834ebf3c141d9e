/// Access-control predicates
///
/// This module decides, for any (user, project, task) triple, whether the
/// user holds a capability: view, create-within, modify, or delete. It is
/// the single source of truth for multi-tenant isolation combined with
/// partial sharing via assignment.
///
/// # Permission Model
///
/// 1. **Ownership**: a project's owner holds every capability over the
///    project and everything nested inside it.
/// 2. **Assignment**: a task's assignee may view and modify that task (and
///    comment on it), and through it gains visibility of the parent
///    project, and nothing more. Assignment never grants project-level
///    mutation or task deletion.
/// 3. **Collaboration**: a user holding at least one assigned task in a
///    project may create further tasks there. A user with no assignment in
///    the project cannot self-onboard.
///
/// Every predicate fails closed: when a caller holds no view capability,
/// callers surface NotFound rather than Forbidden so that probing requests
/// cannot distinguish "absent" from "hidden".
///
/// # Example
///
/// ```
/// use taskhub_shared::policy;
/// use uuid::Uuid;
///
/// let owner = Uuid::new_v4();
/// let assignee = Uuid::new_v4();
/// let stranger = Uuid::new_v4();
///
/// // The assignee may modify their task but only the owner may delete it.
/// assert!(policy::can_modify_task(assignee, Some(assignee), owner));
/// assert!(!policy::can_delete_task(assignee, owner));
/// assert!(policy::can_delete_task(owner, owner));
/// assert!(!policy::can_view_task(stranger, Some(assignee), owner));
/// ```

use sqlx::PgExecutor;
use uuid::Uuid;

use crate::models::project::Project;
use crate::models::task::Task;

/// Checks whether a user owns a project
pub fn is_project_owner(user: Uuid, project: &Project) -> bool {
    project.owner_id == user
}

/// Checks whether a user may view a task
///
/// True for the parent project's owner and for the task's assignee.
pub fn can_view_task(user: Uuid, assigned_to: Option<Uuid>, project_owner: Uuid) -> bool {
    project_owner == user || assigned_to == Some(user)
}

/// Checks whether a user may modify a task's fields
///
/// True for the parent project's owner and for the task's assignee: an
/// assignee may update status and fields of their own task.
pub fn can_modify_task(user: Uuid, assigned_to: Option<Uuid>, project_owner: Uuid) -> bool {
    project_owner == user || assigned_to == Some(user)
}

/// Checks whether a user may delete a task
///
/// Owner only. Assignment grants edit rights, never removal.
pub fn can_delete_task(user: Uuid, project_owner: Uuid) -> bool {
    project_owner == user
}

/// Checks whether a user may modify a project
///
/// Strict owner-only; assignment never grants project-level mutation.
pub fn can_modify_project(user: Uuid, project: &Project) -> bool {
    is_project_owner(user, project)
}

/// Checks whether a user may delete a project
///
/// Strict owner-only.
pub fn can_delete_project(user: Uuid, project: &Project) -> bool {
    is_project_owner(user, project)
}

/// Checks whether a user may comment on a task
///
/// Anyone who can see a task can discuss it.
pub fn can_comment(user: Uuid, task: &Task, project_owner: Uuid) -> bool {
    can_view_task(user, task.assigned_to, project_owner)
}

/// Checks whether a user may view a project
///
/// True for the owner, and for any user holding at least one assigned task
/// inside the project.
pub async fn can_view_project(
    db: impl PgExecutor<'_>,
    user: Uuid,
    project: &Project,
) -> Result<bool, sqlx::Error> {
    if is_project_owner(user, project) {
        return Ok(true);
    }

    Task::exists_assigned_in_project(db, user, project.id).await
}

/// Checks whether a user may create a task in a project
///
/// True for the owner, and for an existing collaborator (a user already
/// holding ≥1 assigned task in the project). A brand-new collaborator with
/// zero tasks cannot self-onboard.
pub async fn can_create_task(
    db: impl PgExecutor<'_>,
    user: Uuid,
    project: &Project,
) -> Result<bool, sqlx::Error> {
    if is_project_owner(user, project) {
        return Ok(true);
    }

    Task::exists_assigned_in_project(db, user, project.id).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::task::{TaskPriority, TaskStatus};
    use chrono::Utc;

    fn project(owner: Uuid) -> Project {
        Project {
            id: Uuid::new_v4(),
            title: "Test Project".to_string(),
            description: String::new(),
            owner_id: owner,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn task(project_id: Uuid, assigned_to: Option<Uuid>) -> Task {
        Task {
            id: Uuid::new_v4(),
            title: "Test Task".to_string(),
            description: String::new(),
            status: TaskStatus::Todo,
            priority: TaskPriority::Medium,
            deadline: None,
            project_id,
            assigned_to,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_owner_holds_every_task_capability() {
        let owner = Uuid::new_v4();
        let assignee = Uuid::new_v4();

        assert!(can_view_task(owner, Some(assignee), owner));
        assert!(can_modify_task(owner, Some(assignee), owner));
        assert!(can_delete_task(owner, owner));

        // Unassigned tasks too
        assert!(can_view_task(owner, None, owner));
        assert!(can_modify_task(owner, None, owner));
    }

    #[test]
    fn test_assignee_may_view_and_modify_but_not_delete() {
        let owner = Uuid::new_v4();
        let assignee = Uuid::new_v4();

        assert!(can_view_task(assignee, Some(assignee), owner));
        assert!(can_modify_task(assignee, Some(assignee), owner));
        assert!(!can_delete_task(assignee, owner));
    }

    #[test]
    fn test_stranger_holds_nothing() {
        let owner = Uuid::new_v4();
        let assignee = Uuid::new_v4();
        let stranger = Uuid::new_v4();

        assert!(!can_view_task(stranger, Some(assignee), owner));
        assert!(!can_view_task(stranger, None, owner));
        assert!(!can_modify_task(stranger, Some(assignee), owner));
        assert!(!can_delete_task(stranger, owner));
    }

    #[test]
    fn test_view_and_modify_agree_for_tasks() {
        // canViewTask ⇔ canModifyTask for every relationship combination
        let owner = Uuid::new_v4();
        let assignee = Uuid::new_v4();
        let stranger = Uuid::new_v4();

        for user in [owner, assignee, stranger] {
            for assigned in [None, Some(assignee), Some(owner)] {
                assert_eq!(
                    can_view_task(user, assigned, owner),
                    can_modify_task(user, assigned, owner),
                );
            }
        }
    }

    #[test]
    fn test_project_mutation_is_owner_only() {
        let owner = Uuid::new_v4();
        let other = Uuid::new_v4();
        let p = project(owner);

        assert!(can_modify_project(owner, &p));
        assert!(can_delete_project(owner, &p));
        assert!(!can_modify_project(other, &p));
        assert!(!can_delete_project(other, &p));
    }

    #[test]
    fn test_comment_follows_task_visibility() {
        let owner = Uuid::new_v4();
        let assignee = Uuid::new_v4();
        let stranger = Uuid::new_v4();
        let p = project(owner);
        let t = task(p.id, Some(assignee));

        assert!(can_comment(owner, &t, p.owner_id));
        assert!(can_comment(assignee, &t, p.owner_id));
        assert!(!can_comment(stranger, &t, p.owner_id));
    }
}
