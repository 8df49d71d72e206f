//! Unified error types surfaced by the runtime API.
//!
//! Wraps rule failures, worker coordination failures and repository errors
//! so clients can bubble them up with consistent context.

use arena_core::{
    AcceptError, ChallengeError, ErrorSeverity, GameError, GrowthError, NotFound,
};
use thiserror::Error;
use tokio::sync::oneshot;

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    NotFound(#[from] NotFound),

    #[error(transparent)]
    Growth(#[from] GrowthError),

    #[error(transparent)]
    Challenge(#[from] ChallengeError),

    #[error(transparent)]
    Accept(#[from] AcceptError),

    #[error("arena worker command channel closed")]
    CommandChannelClosed,

    #[error("arena worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("arena worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    /// Loading the roster at startup failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// An explicit flush could not write the roster.
    #[error("roster snapshot failed")]
    Persistence(#[source] RepositoryError),
}

impl GameError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NotFound(error) => error.severity(),
            Self::Growth(error) => error.severity(),
            Self::Challenge(error) => error.severity(),
            Self::Accept(error) => error.severity(),
            Self::CommandChannelClosed
            | Self::ReplyChannelClosed(_)
            | Self::WorkerJoin(_)
            | Self::Repository(_)
            | Self::Persistence(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(error) => error.error_code(),
            Self::Growth(error) => error.error_code(),
            Self::Challenge(error) => error.error_code(),
            Self::Accept(error) => error.error_code(),
            Self::CommandChannelClosed => "RUNTIME_COMMAND_CHANNEL_CLOSED",
            Self::ReplyChannelClosed(_) => "RUNTIME_REPLY_CHANNEL_CLOSED",
            Self::WorkerJoin(_) => "RUNTIME_WORKER_JOIN",
            Self::Repository(_) => "RUNTIME_REPOSITORY",
            Self::Persistence(_) => "RUNTIME_PERSISTENCE_FAILURE",
        }
    }
}
