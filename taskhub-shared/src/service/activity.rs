/// Recent-changes feed
///
/// The feed a viewer sees is the union of activity inside projects they
/// own and activity they performed anywhere, newest first, capped at the
/// ten most recent records.

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::activity::{Activity, FeedActivity};
use crate::service::ServiceResult;

/// Maximum records returned by the feed
pub const FEED_LIMIT: i64 = 10;

/// Loads the viewer's recent feed
pub async fn feed(pool: &PgPool, actor: Uuid) -> ServiceResult<Vec<FeedActivity>> {
    let activities = Activity::recent_for_viewer(pool, actor, FEED_LIMIT).await?;

    Ok(activities)
}
