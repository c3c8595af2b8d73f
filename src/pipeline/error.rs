//! Pipeline Error Types

use crate::core::error_handling::ContextualError;
use crate::core::validation::ValidationError;
use crate::queue::QueueError;
use crate::sink::SinkError;
use crate::source::SourceError;

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Queue(#[from] QueueError),

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Sink(#[from] SinkError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Failed to spawn {name} thread: {source}")]
    Spawn {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{name} thread panicked")]
    WorkerPanicked { name: String },
}

impl ContextualError for PipelineError {
    fn is_user_actionable(&self) -> bool {
        match self {
            PipelineError::Queue(e) => e.is_user_actionable(),
            PipelineError::Source(e) => e.is_user_actionable(),
            PipelineError::Sink(e) => e.is_user_actionable(),
            PipelineError::Validation(e) => e.is_user_actionable(),
            PipelineError::Spawn { .. } | PipelineError::WorkerPanicked { .. } => false,
        }
    }

    fn user_message(&self) -> Option<&str> {
        match self {
            PipelineError::Queue(e) => e.user_message(),
            PipelineError::Source(e) => e.user_message(),
            PipelineError::Sink(e) => e.user_message(),
            PipelineError::Validation(e) => e.user_message(),
            PipelineError::Spawn { .. } | PipelineError::WorkerPanicked { .. } => None,
        }
    }
}

pub type PipelineResult<T> = Result<T, PipelineError>;
