//! Source Error Types

use crate::core::error_handling::ContextualError;

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("{message}")]
    Open { message: String },

    #[error("{message}")]
    Write { message: String },

    #[error("Read failed at byte {offset}: {source}")]
    Io {
        offset: u64,
        #[source]
        source: std::io::Error,
    },

    #[error("Truncated record at byte {offset}: found {found} of {expected} bytes")]
    Truncated {
        offset: u64,
        found: usize,
        expected: usize,
    },
}

impl ContextualError for SourceError {
    fn is_user_actionable(&self) -> bool {
        matches!(self, SourceError::Open { .. } | SourceError::Write { .. })
    }

    fn user_message(&self) -> Option<&str> {
        match self {
            SourceError::Open { message } | SourceError::Write { message } => Some(message),
            _ => None,
        }
    }
}

pub type SourceResult<T> = Result<T, SourceError>;
