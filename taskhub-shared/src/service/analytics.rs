/// Owner-scoped analytics counters
///
/// The overview counts only what the caller owns: their projects, the
/// tasks inside those projects, and how many of those tasks are completed.
/// Tasks merely assigned to the caller in other users' projects do not
/// contribute.

use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::service::ServiceResult;

/// Owner-scoped counters for the dashboard
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Overview {
    /// Projects owned by the caller
    pub total_projects: i64,

    /// Tasks inside owned projects
    pub total_tasks: i64,

    /// Completed tasks inside owned projects
    pub completed_tasks: i64,
}

/// Computes the overview counters
pub async fn overview(pool: &PgPool, actor: Uuid) -> ServiceResult<Overview> {
    let (total_projects, total_tasks, completed_tasks): (i64, i64, i64) = sqlx::query_as(
        r#"
        SELECT
            (SELECT COUNT(*) FROM projects WHERE owner_id = $1),
            (SELECT COUNT(*) FROM tasks t
             JOIN projects p ON p.id = t.project_id
             WHERE p.owner_id = $1),
            (SELECT COUNT(*) FROM tasks t
             JOIN projects p ON p.id = t.project_id
             WHERE p.owner_id = $1 AND t.status = 'completed')
        "#,
    )
    .bind(actor)
    .fetch_one(pool)
    .await?;

    Ok(Overview {
        total_projects,
        total_tasks,
        completed_tasks,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overview_wire_format() {
        let overview = Overview {
            total_projects: 2,
            total_tasks: 7,
            completed_tasks: 3,
        };

        let json = serde_json::to_string(&overview).unwrap();
        assert!(json.contains("\"totalProjects\":2"));
        assert!(json.contains("\"totalTasks\":7"));
        assert!(json.contains("\"completedTasks\":3"));
    }
}
