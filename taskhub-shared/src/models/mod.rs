/// Database models for TaskHub
///
/// This module contains all database models and their CRUD operations.
///
/// # Models
///
/// - `user`: User accounts and profile fields
/// - `project`: Projects, each exclusively administered by its owner
/// - `task`: Tasks inside projects, optionally assigned to a collaborator
/// - `comment`: Immutable discussion entries on tasks
/// - `activity`: Append-only audit records behind the recent-changes feed
///
/// # Example
///
/// ```no_run
/// use taskhub_shared::models::user::{CreateUser, User};
/// use taskhub_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let user = User::create(&pool, CreateUser {
///     username: "ada".to_string(),
///     email: "ada@example.com".to_string(),
///     password_hash: "$argon2id$...".to_string(),
/// })
/// .await?;
/// # Ok(())
/// # }
/// ```

pub mod activity;
pub mod comment;
pub mod project;
pub mod task;
pub mod user;
