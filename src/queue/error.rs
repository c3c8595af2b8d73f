//! Queue Error Types
//!
//! End of stream is not an error: `remove` reports it as `Ok(None)`.

use crate::core::error_handling::ContextualError;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum QueueError {
    /// Storage for a new entry could not be reserved
    #[error("Resource exhausted: {message}")]
    ResourceExhausted { message: String },

    /// The buffer was destroyed, its lock poisoned, or the call broke the closure contract
    #[error("Invalid buffer state: {message}")]
    InvalidState { message: String },
}

impl ContextualError for QueueError {
    fn is_user_actionable(&self) -> bool {
        false
    }

    fn user_message(&self) -> Option<&str> {
        None
    }
}

/// Result type for queue operations
pub type QueueResult<T> = Result<T, QueueError>;
