/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `health`: Health check endpoint
/// - `auth`: Signup, login, token refresh
/// - `users`: User directory and profile management
/// - `projects`: Project CRUD and listing
/// - `tasks`: Task CRUD and listing
/// - `comments`: Comment creation and listing
/// - `activities`: Recent-changes feed
/// - `analytics`: Owner-scoped counters

pub mod activities;
pub mod analytics;
pub mod auth;
pub mod comments;
pub mod health;
pub mod projects;
pub mod tasks;
pub mod users;
