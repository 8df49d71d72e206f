//! Error types for the engine's compound operations.

use crate::challenge::ChallengeError;
use crate::combat::CombatError;
use crate::error::{ErrorSeverity, GameError};

/// Errors surfaced while accepting a challenge.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AcceptError {
    #[error(transparent)]
    Challenge(#[from] ChallengeError),

    #[error(transparent)]
    Combat(#[from] CombatError),
}

impl GameError for AcceptError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Challenge(error) => error.severity(),
            Self::Combat(error) => error.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Challenge(error) => error.error_code(),
            Self::Combat(error) => error.error_code(),
        }
    }
}
