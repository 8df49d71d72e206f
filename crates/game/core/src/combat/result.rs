//! Combat adjudication and report types.

use crate::config::GameConfig;
use crate::env::RngSource;
use crate::state::{Player, PlayerId};

use super::damage::{DamageRoll, check_eligibility, roll_damage};
use super::{CombatError, CombatSide};

/// Stats transferred from the loser to the winner.
///
/// Drawn once per combat; the winner gains exactly what the loser loses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatBonus {
    pub attack: i64,
    pub defense: i64,
}

impl CombatBonus {
    /// Draw `attack` in [2, 5] then `defense` in [1, 3].
    pub fn roll(rng: &mut impl RngSource) -> Self {
        let (attack_min, attack_max) = GameConfig::BONUS_ATTACK;
        let (defense_min, defense_max) = GameConfig::BONUS_DEFENSE;
        let attack = rng.int_in(attack_min, attack_max);
        let defense = rng.int_in(defense_min, defense_max);
        Self { attack, defense }
    }
}

/// How a combat ended.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatOutcome {
    /// One side dealt strictly more damage.
    Victory { winner: PlayerId, loser: PlayerId },
    /// Equal damage: nobody gains or loses anything.
    Tie,
}

/// Everything a presentation layer needs to describe a finished combat.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatReport {
    pub attacker: PlayerId,
    pub defender: PlayerId,
    pub attacker_roll: DamageRoll,
    pub defender_roll: DamageRoll,
    /// Bonus drawn for this combat, applied only on a victory.
    pub bonus: CombatBonus,
    pub outcome: CombatOutcome,
}

impl CombatReport {
    pub fn winner(&self) -> Option<&PlayerId> {
        match &self.outcome {
            CombatOutcome::Victory { winner, .. } => Some(winner),
            CombatOutcome::Tie => None,
        }
    }

    pub fn is_tie(&self) -> bool {
        matches!(self.outcome, CombatOutcome::Tie)
    }
}

/// Compare two rolls and apply the result to both records.
///
/// Returns the winning side, or `None` on an exact tie (records untouched).
/// The loser's stats are reduced without a floor. Stats and counters
/// saturate at their integer bounds.
pub fn adjudicate(
    attacker: &mut Player,
    defender: &mut Player,
    attacker_roll: &DamageRoll,
    defender_roll: &DamageRoll,
    bonus: CombatBonus,
) -> Option<CombatSide> {
    let (winner, loser, side) = match attacker_roll.damage.cmp(&defender_roll.damage) {
        std::cmp::Ordering::Greater => (attacker, defender, CombatSide::Attacker),
        std::cmp::Ordering::Less => (defender, attacker, CombatSide::Defender),
        std::cmp::Ordering::Equal => return None,
    };

    winner.wins = winner.wins.saturating_add(1);
    winner.attack = winner.attack.saturating_add(bonus.attack);
    winner.defense = winner.defense.saturating_add(bonus.defense);

    loser.losses = loser.losses.saturating_add(1);
    loser.attack = loser.attack.saturating_sub(bonus.attack);
    loser.defense = loser.defense.saturating_sub(bonus.defense);

    Some(side)
}

/// Resolve a complete combat between two records.
///
/// # Draw order
///
/// attacker roll, defender roll, bonus attack, bonus defense. The bonus is
/// drawn even when the combat ends in a tie.
///
/// # Errors
///
/// [`CombatError::IneligibleCombatant`] when either side is below the
/// minimum stats (attacker checked first). Nothing is drawn or mutated then.
pub fn resolve_combat(
    attacker_id: &PlayerId,
    attacker: &mut Player,
    defender_id: &PlayerId,
    defender: &mut Player,
    rng: &mut impl RngSource,
) -> Result<CombatReport, CombatError> {
    let attacker_stats = check_eligibility(CombatSide::Attacker, attacker)?;
    let defender_stats = check_eligibility(CombatSide::Defender, defender)?;

    let attacker_roll = roll_damage(attacker_stats, defender_stats, rng);
    let defender_roll = roll_damage(defender_stats, attacker_stats, rng);
    let bonus = CombatBonus::roll(rng);

    let outcome = match adjudicate(attacker, defender, &attacker_roll, &defender_roll, bonus) {
        Some(CombatSide::Attacker) => CombatOutcome::Victory {
            winner: attacker_id.clone(),
            loser: defender_id.clone(),
        },
        Some(CombatSide::Defender) => CombatOutcome::Victory {
            winner: defender_id.clone(),
            loser: attacker_id.clone(),
        },
        None => CombatOutcome::Tie,
    };

    Ok(CombatReport {
        attacker: attacker_id.clone(),
        defender: defender_id.clone(),
        attacker_roll,
        defender_roll,
        bonus,
        outcome,
    })
}
