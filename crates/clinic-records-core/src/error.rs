//! Error taxonomy for patient operations.
//!
//! Two classes reach callers: [`ValidationError`] for bad input (raised before
//! any side effect) and [`RepoError`] for whatever the persistence layer
//! reports. The service wraps repository errors without rewriting them.

use thiserror::Error;

use crate::db::DbError;

/// Caller-supplied input violates a required-field or format constraint.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("validation failed: {message}")]
pub struct ValidationError {
    message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build the error for a set of missing required fields.
    pub fn missing_fields(fields: &[&str]) -> Self {
        Self::new(format!("missing required fields: {}", fields.join(", ")))
    }

    /// Human-readable description of what was wrong.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Errors reported by a [`crate::repo::PatientRepository`].
#[derive(Error, Debug)]
pub enum RepoError {
    #[error("Patient not found: {0}")]
    NotFound(String),

    #[error("Patient already exists: {0}")]
    Conflict(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error(transparent)]
    Database(#[from] DbError),
}

impl RepoError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, RepoError::NotFound(_))
    }
}

pub type RepoResult<T> = Result<T, RepoError>;

/// Error returned by [`crate::service::PatientService`] operations.
#[derive(Error, Debug)]
pub enum PatientError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Repository(#[from] RepoError),
}

pub type PatientResult<T> = Result<T, PatientError>;

/// Response class a transport layer should map an error to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    ClientError,
    NotFound,
    ServerError,
}

impl PatientError {
    pub fn is_validation(&self) -> bool {
        matches!(self, PatientError::Validation(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, PatientError::Repository(e) if e.is_not_found())
    }

    pub fn class(&self) -> ErrorClass {
        match self {
            PatientError::Validation(_) => ErrorClass::ClientError,
            PatientError::Repository(e) if e.is_not_found() => ErrorClass::NotFound,
            PatientError::Repository(RepoError::Conflict(_)) => ErrorClass::ClientError,
            PatientError::Repository(_) => ErrorClass::ServerError,
        }
    }
}
