//! Error types for the board engine

use thiserror::Error;

/// Result type for board operations
pub type Result<T> = std::result::Result<T, BoardError>;

/// Errors that can occur in board operations
#[derive(Debug, Error)]
pub enum BoardError {
    /// Task not found in the live set
    #[error("task not found: {id}")]
    TaskNotFound { id: String },

    /// A drag session is already in progress
    #[error("drag session already active")]
    DragSessionActive,

    /// Gateway transport failure (connection, timeout, malformed body)
    #[error("gateway error: {message}")]
    Gateway { message: String },

    /// Gateway rejected the request with an HTTP status
    #[error("gateway returned status {status}: {message}")]
    GatewayStatus { status: u16, message: String },

    /// Parse error
    #[error("parse error: {message}")]
    Parse { message: String },

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl BoardError {
    /// Create a task-not-found error
    pub fn task_not_found(id: impl Into<String>) -> Self {
        Self::TaskNotFound { id: id.into() }
    }

    /// Create a gateway transport error
    pub fn gateway(message: impl Into<String>) -> Self {
        Self::Gateway {
            message: message.into(),
        }
    }

    /// Create a gateway status error
    pub fn gateway_status(status: u16, message: impl Into<String>) -> Self {
        Self::GatewayStatus {
            status,
            message: message.into(),
        }
    }

    /// Create a parse error
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    /// Check whether this error means the record is gone on the server
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::TaskNotFound { .. } | Self::GatewayStatus { status: 404, .. }
        )
    }
}
