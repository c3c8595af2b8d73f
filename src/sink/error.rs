//! Sink Error Types

use crate::core::error_handling::ContextualError;

#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("{message}")]
    Create { message: String },

    #[error("Write failed: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("Sink unavailable: {message}")]
    Unavailable { message: String },
}

impl ContextualError for SinkError {
    fn is_user_actionable(&self) -> bool {
        matches!(self, SinkError::Create { .. })
    }

    fn user_message(&self) -> Option<&str> {
        match self {
            SinkError::Create { message } => Some(message),
            _ => None,
        }
    }
}

pub type SinkResult<T> = Result<T, SinkError>;
