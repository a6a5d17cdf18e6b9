//! The module contains the error the engine can throw.
//!
//! The errors are:
//!
//! - [`ExistingKey`] thrown when a record already exists for an owning key.
//! - [`KeyNotFound`] thrown when an item are not found.
//! - [`Configuration`] thrown when the deployment lacks required setup, such
//!   as a default status for a record type.
//! - [`Storage`] thrown when the database fails while running a named
//!   operation.
//!
//!  [`ExistingKey`]: EngineError::ExistingKey
//!  [`KeyNotFound`]: EngineError::KeyNotFound
//!  [`Configuration`]: EngineError::Configuration
//!  [`Storage`]: EngineError::Storage
use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("\"{0}\" key not found!")]
    KeyNotFound(String),
    #[error("\"{0}\" already present!")]
    ExistingKey(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Configuration error: {0}")]
    Configuration(String),
    #[error("Operation {0} timed out")]
    Timeout(String),
    #[error("Storage error during {operation}: {source}")]
    Storage {
        operation: String,
        #[source]
        source: DbErr,
    },
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl EngineError {
    /// Attach the operation name to a raw database error.
    ///
    /// Every other variant is returned unchanged.
    pub(crate) fn during(self, operation: &str) -> Self {
        match self {
            Self::Database(source) => Self::Storage {
                operation: operation.to_string(),
                source,
            },
            other => other,
        }
    }

    /// Map a unique-constraint violation to [`EngineError::ExistingKey`].
    pub(crate) fn from_write(err: DbErr, key: impl Into<String>) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => Self::ExistingKey(key.into()),
            _ => Self::Database(err),
        }
    }
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::KeyNotFound(a), Self::KeyNotFound(b)) => a == b,
            (Self::ExistingKey(a), Self::ExistingKey(b)) => a == b,
            (Self::InvalidInput(a), Self::InvalidInput(b)) => a == b,
            (Self::Configuration(a), Self::Configuration(b)) => a == b,
            (Self::Timeout(a), Self::Timeout(b)) => a == b,
            (
                Self::Storage {
                    operation: a,
                    source: source_a,
                },
                Self::Storage {
                    operation: b,
                    source: source_b,
                },
            ) => a == b && source_a.to_string() == source_b.to_string(),
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
