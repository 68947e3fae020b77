/// Error types shared across the repository and service layers
///
/// Two levels exist:
///
/// - [`RepositoryError`]: storage-level failures. Unique-index violations are
///   surfaced as `Duplicate` so the service layer can report a lost
///   check-then-insert race the same way as its own uniqueness check.
/// - [`ServiceError`]: the caller-facing taxonomy. `NotFound` and
///   `Validation` are expected business outcomes; `InvalidArgument` is a
///   programming-contract violation (e.g. a nil UUID); anything else is an
///   internal failure.
///
/// A transport layer maps these via [`ServiceError::kind`] (404 for
/// `NotFound`, 400 for `Validation`/`InvalidArgument`, 500 otherwise)
/// without matching on message strings.

use thiserror::Error;

/// Service result type alias
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Storage-level error
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// A unique index rejected the write (duplicate value)
    #[error("duplicate value for {0}")]
    Duplicate(String),

    /// Underlying database error
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Caller-facing error for all service operations
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Referenced entity does not exist by id or unique key
    #[error("{0}")]
    NotFound(String),

    /// A business invariant was violated (duplicate key, ownership mismatch)
    #[error("{0}")]
    Validation(String),

    /// Precondition failure; a bug in the caller, not a user-facing condition
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Storage failure that is not a business outcome
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Coarse error classification for transport mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Validation,
    InvalidArgument,
    Internal,
}

impl ServiceError {
    /// Builds a `NotFound` error for an entity referenced by id
    pub fn not_found(entity: &str, id: impl std::fmt::Display) -> Self {
        ServiceError::NotFound(format!("{} {} not found", entity, id))
    }

    /// Classifies the error for transport-level status mapping
    pub fn kind(&self) -> ErrorKind {
        match self {
            ServiceError::NotFound(_) => ErrorKind::NotFound,
            ServiceError::Validation(_) => ErrorKind::Validation,
            ServiceError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            // Lost uniqueness races surface like the in-service check
            ServiceError::Repository(RepositoryError::Duplicate(_)) => ErrorKind::Validation,
            ServiceError::Repository(_) => ErrorKind::Internal,
        }
    }
}

impl From<validator::ValidationErrors> for ServiceError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ServiceError::Validation(errors.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let err = ServiceError::not_found("user", "42");
        assert_eq!(err.to_string(), "user 42 not found");
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_duplicate_maps_to_validation_kind() {
        let err = ServiceError::from(RepositoryError::Duplicate("users.username".to_string()));
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_validation_kind() {
        let err = ServiceError::Validation("username 'alice' is already taken".to_string());
        assert_eq!(err.kind(), ErrorKind::Validation);
    }
}
