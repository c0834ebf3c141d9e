/// Service error taxonomy
///
/// Services distinguish four failure classes, mirroring the API's HTTP
/// mapping:
///
/// - `NotFound`: the entity is absent, or present but invisible to the
///   caller. The two cases are deliberately indistinguishable so that an
///   unauthorized viewer cannot probe for existence.
/// - `Forbidden`: the entity is visible but the action is not permitted
///   (e.g. an assignee trying to delete their task).
/// - `Validation`: a malformed or unresolvable input field.
/// - `Database`: a storage failure; surfaces to the caller unretried.

use thiserror::Error;

/// Result type alias for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Error type for service operations
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Entity absent or invisible to the caller
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Entity visible but the action is not permitted
    #[error("{0}")]
    Forbidden(&'static str),

    /// Malformed or unresolvable input
    #[error("{0}")]
    Validation(String),

    /// Storage failure
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display_names_entity() {
        let err = ServiceError::NotFound("task");
        assert_eq!(err.to_string(), "task not found");
    }

    #[test]
    fn test_database_error_wraps_sqlx() {
        let err = ServiceError::from(sqlx::Error::RowNotFound);
        assert!(matches!(err, ServiceError::Database(_)));
    }
}
