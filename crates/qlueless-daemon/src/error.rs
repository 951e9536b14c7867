//! Error types for qlueless-daemon

use axum::http::StatusCode;
use qlueless_envelope::InvalidDirective;
use qlueless_types::ValidationError;
use thiserror::Error;

/// Daemon-level errors
#[derive(Debug, Error)]
pub enum DaemonError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Server startup error
    #[error("Server error: {0}")]
    Server(String),

    /// Storage error
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Storage-specific errors
#[derive(Debug, Error)]
pub enum StorageError {
    /// Item not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid data
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Connection error
    #[error("Connection error: {0}")]
    Connection(String),

    /// Query error
    #[error("Query error: {0}")]
    Query(String),
}

/// API-specific errors
#[derive(Debug, Error)]
pub enum ApiError {
    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Entity failed validation
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Unusable `wrap_with` directive
    #[error(transparent)]
    InvalidDirective(#[from] InvalidDirective),

    /// Valid `wrap_with` directive nesting deeper than the service renders
    #[error("wrap_with nests {depth} layers, more than the limit of {limit}")]
    WrapTooDeep { depth: usize, limit: usize },

    /// Method not supported by the resource
    #[error("Method not allowed: {0}")]
    MethodNotAllowed(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Storage error
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_)
            | ApiError::Validation(_)
            | ApiError::InvalidDirective(_)
            | ApiError::WrapTooDeep { .. } => StatusCode::BAD_REQUEST,
            ApiError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Storage(StorageError::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) | ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message placed in the reply; server-side details are not exposed.
    pub fn client_message(&self) -> String {
        match self {
            ApiError::NotFound(message) | ApiError::BadRequest(message) => message.clone(),
            ApiError::Validation(err) => err.to_string(),
            ApiError::InvalidDirective(err) => {
                format!("The 'wrap_with' query parameter is invalid: {}", err.fault())
            }
            ApiError::WrapTooDeep { depth, limit } => format!(
                "The 'wrap_with' query parameter nests {} layers but at most {} are supported",
                depth, limit
            ),
            ApiError::MethodNotAllowed(method) => {
                format!("Method {} is not supported by this resource", method)
            }
            ApiError::Storage(StorageError::NotFound(what)) => format!("{} not found", what),
            ApiError::Internal(_) | ApiError::Storage(_) => "Internal server error".to_string(),
        }
    }
}

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Result type alias for daemon operations
pub type DaemonResult<T> = Result<T, DaemonError>;
