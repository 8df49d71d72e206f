//! Combat resolution system.
//!
//! A combat is two simultaneous, independent attacks: each combatant rolls
//! damage against the other's defense, and the higher roll wins. All four
//! steps (both rolls, adjudication, stat transfer) happen inside
//! [`resolve_combat`], so no partial combat is ever observable.
//!
//! # Core Functions
//!
//! - `check_eligibility`: minimum stats gate, yields an [`Eligible`] token
//! - `roll_damage`: one randomized attack (crit / miss / lucky modifiers)
//! - `adjudicate`: compares two rolls and transfers the victory bonus
//! - `resolve_combat`: complete combat between two records

pub mod damage;
pub mod result;

pub use damage::{DamageRoll, Eligible, check_eligibility, roll_damage};
pub use result::{CombatBonus, CombatOutcome, CombatReport, adjudicate, resolve_combat};

use crate::error::{ErrorSeverity, GameError};

/// Role of a combatant within one combat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum CombatSide {
    /// The player who issued the challenge.
    Attacker,
    /// The player who accepted it.
    Defender,
}

impl CombatSide {
    pub fn opponent(self) -> Self {
        match self {
            Self::Attacker => Self::Defender,
            Self::Defender => Self::Attacker,
        }
    }
}

/// Errors that abort a combat before any stat changes.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatError {
    /// A combatant is below the minimum attack or defense.
    #[error("{side} is not eligible to fight (attack {attack}, defense {defense})")]
    IneligibleCombatant {
        side: CombatSide,
        attack: i64,
        defense: i64,
    },
}

impl GameError for CombatError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::IneligibleCombatant { .. } => "COMBAT_INELIGIBLE_COMBATANT",
        }
    }
}
