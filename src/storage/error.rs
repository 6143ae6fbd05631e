//! Storage error types

use serde::{Deserialize, Serialize};

/// Failures raised inside the storage layer before they are reduced to an
/// [`ErrorDescriptor`].
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Missing configuration: {0}")]
    MissingConfig(&'static str),

    #[error("Unsupported: {0}")]
    Unsupported(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Backend error: {0}")]
    Backend(String),
}

/// Uniform failure value returned by every gateway operation.
///
/// Serializes as `{ "error": "..." }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{error}")]
pub struct ErrorDescriptor {
    pub error: String,
}

impl ErrorDescriptor {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

pub type StorageResult<T> = std::result::Result<T, StorageError>;

pub type GatewayResult<T> = std::result::Result<T, ErrorDescriptor>;
