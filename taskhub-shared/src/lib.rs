//! # TaskHub Shared Library
//!
//! This crate contains the models, access policy, query contracts, and
//! services shared between the TaskHub API server and its tests.
//!
//! ## Module Organization
//!
//! - `models`: Database models and their SQL
//! - `policy`: Access-control predicates (who may view/create/modify/delete)
//! - `query`: Filter, sort, and pagination contracts for listing endpoints
//! - `recorder`: Append-only activity audit records
//! - `service`: Use-case orchestration (load, policy check, mutate, record)
//! - `auth`: Password hashing, JWT tokens, and the axum auth context
//! - `db`: Connection pool and migrations

pub mod auth;
pub mod db;
pub mod models;
pub mod policy;
pub mod query;
pub mod recorder;
pub mod service;

/// Current version of the TaskHub shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
