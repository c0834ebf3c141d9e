/// Use-case orchestration for TaskHub
///
/// Each service function implements one operation end to end: load the
/// target entities, consult the access policy, mutate, and append any
/// qualifying activity record. State-changing operations run the whole
/// sequence inside a single PostgreSQL transaction, so a policy check can
/// never be separated from the mutation it guards and the audit record
/// commits or rolls back with the primary write.
///
/// # Modules
///
/// - `project`: create/get/list/update/delete projects
/// - `task`: create/get/list/update/delete tasks
/// - `comment`: comment creation and listing
/// - `activity`: the recent-changes feed
/// - `analytics`: owner-scoped counters
/// - `error`: the service error taxonomy

pub mod activity;
pub mod analytics;
pub mod comment;
pub mod error;
pub mod project;
pub mod task;

pub use error::{ServiceError, ServiceResult};
