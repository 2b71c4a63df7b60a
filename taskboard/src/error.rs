//! Error types for the board engine

use crate::sync::SyncError;
use thiserror::Error;

/// Result type for board operations
pub type Result<T> = std::result::Result<T, BoardError>;

/// Errors that can occur in board operations
#[derive(Debug, Error)]
pub enum BoardError {
    /// Column id is not part of the fixed column order
    #[error("unknown column: {id}")]
    UnknownColumn { id: String },

    /// Index is outside the bounds of a column
    #[error("index {index} out of range for column '{column}' (len {len})")]
    IndexOutOfRange {
        column: String,
        index: usize,
        len: usize,
    },

    /// Task is not present in the store or in any column
    #[error("task not found: {id}")]
    TaskNotFound { id: String },

    /// The task named by a move is not at the reported source slot
    #[error("task '{id}' is not at {column}[{index}]")]
    SourceMismatch {
        id: String,
        column: String,
        index: usize,
    },

    /// Column declared twice in the column order
    #[error("duplicate column: {id}")]
    DuplicateColumn { id: String },

    /// Column id is not a lower-case, dash separated token
    #[error("invalid column id '{id}': {reason}")]
    InvalidColumnId { id: String, reason: String },

    /// Two columns map to the same status string
    #[error("columns '{first}' and '{second}' share status '{status}'")]
    StatusCollision {
        first: String,
        second: String,
        status: String,
    },

    /// A board invariant does not hold
    #[error("partition violated: {message}")]
    PartitionViolation { message: String },

    /// Configuration could not be loaded or is invalid
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),

    /// Remote store failure outside of move dispatch (loads)
    #[error(transparent)]
    Sync(#[from] SyncError),
}

impl BoardError {
    /// Create an unknown column error
    pub fn unknown_column(id: impl Into<String>) -> Self {
        Self::UnknownColumn { id: id.into() }
    }

    /// Create a task not found error
    pub fn task_not_found(id: impl Into<String>) -> Self {
        Self::TaskNotFound { id: id.into() }
    }

    /// Create a partition violation error
    pub fn partition(message: impl Into<String>) -> Self {
        Self::PartitionViolation {
            message: message.into(),
        }
    }

    /// True for the precondition kinds that refuse a move without touching state
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            Self::UnknownColumn { .. }
                | Self::IndexOutOfRange { .. }
                | Self::TaskNotFound { .. }
                | Self::SourceMismatch { .. }
        )
    }
}
