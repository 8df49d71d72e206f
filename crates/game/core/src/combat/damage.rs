//! Damage roll for a single attack.

use crate::config::GameConfig;
use crate::env::RngSource;
use crate::state::Player;

use super::{CombatError, CombatSide};

// ============================================================================
// Eligibility
// ============================================================================

/// Stats of a combatant that passed [`check_eligibility`].
///
/// Only eligible stats can be rolled with, which keeps every damage value
/// non-negative.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Eligible {
    attack: i64,
    defense: i64,
}

impl Eligible {
    pub fn attack(&self) -> i64 {
        self.attack
    }

    pub fn defense(&self) -> i64 {
        self.defense
    }
}

/// Gate a combatant on `attack >= 3` and `defense >= 1`.
pub fn check_eligibility(side: CombatSide, player: &Player) -> Result<Eligible, CombatError> {
    if player.attack < GameConfig::MIN_COMBAT_ATTACK
        || player.defense < GameConfig::MIN_COMBAT_DEFENSE
    {
        return Err(CombatError::IneligibleCombatant {
            side,
            attack: player.attack,
            defense: player.defense,
        });
    }

    Ok(Eligible {
        attack: player.attack,
        defense: player.defense,
    })
}

// ============================================================================
// Damage Roll
// ============================================================================

/// Outcome of one attack.
///
/// `damage == 0` exactly when `is_miss`, and a lucky strike is never a miss.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageRoll {
    pub damage: u64,
    pub is_crit: bool,
    pub is_miss: bool,
    pub is_lucky: bool,
}

/// Roll the damage `attacker` deals to `defender`.
///
/// # Formula
///
/// ```text
/// base      = attack  * uniform(0.5, 1.8)
/// reduction = defense * uniform(0.3, 0.8)
/// damage    = max(1, round_half_even(base - reduction))
///
/// crit  (15%): damage = floor(damage * uniform(1.5, 2.5))
/// miss  (10%): damage = 0, crit cleared
/// lucky  (5%): unless missed, damage = floor(attack * uniform(1.2, 2.0))
/// ```
///
/// # Draw order
///
/// base factor, reduction factor, crit check, [crit multiplier], miss check,
/// lucky check, [lucky factor]. The lucky check is drawn even on a miss.
pub fn roll_damage(
    attacker: Eligible,
    defender: Eligible,
    rng: &mut impl RngSource,
) -> DamageRoll {
    let (base_min, base_max) = GameConfig::BASE_DAMAGE_FACTOR;
    let (def_min, def_max) = GameConfig::DEFENSE_FACTOR;

    let base_damage = attacker.attack as f64 * rng.float_in(base_min, base_max);
    let defense_reduction = defender.defense as f64 * rng.float_in(def_min, def_max);
    let mut damage = (base_damage - defense_reduction).round_ties_even().max(1.0) as u64;

    let mut is_crit = rng.chance(GameConfig::CRIT_CHANCE);
    if is_crit {
        let (crit_min, crit_max) = GameConfig::CRIT_MULTIPLIER;
        damage = (damage as f64 * rng.float_in(crit_min, crit_max)).floor() as u64;
    }

    let is_miss = rng.chance(GameConfig::MISS_CHANCE);
    if is_miss {
        damage = 0;
        is_crit = false;
    }

    let is_lucky = rng.chance(GameConfig::LUCKY_CHANCE);
    if is_lucky && !is_miss {
        let (lucky_min, lucky_max) = GameConfig::LUCKY_FACTOR;
        damage = (attacker.attack as f64 * rng.float_in(lucky_min, lucky_max)).floor() as u64;
        return DamageRoll {
            damage,
            is_crit,
            is_miss: false,
            is_lucky: true,
        };
    }

    DamageRoll {
        damage,
        is_crit,
        is_miss,
        is_lucky: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{PcgRng, ScriptedRolls};

    /// Draws that keep crit, miss and lucky checks from firing.
    const NO_MODIFIERS: [f64; 3] = [0.99, 0.99, 0.99];

    fn eligible(attack: i64, defense: i64) -> Eligible {
        check_eligibility(CombatSide::Attacker, &Player::new().with_stats(attack, defense)).unwrap()
    }

    fn plain(base: f64, reduction: f64) -> ScriptedRolls {
        ScriptedRolls::default()
            .then_floats([base, reduction])
            .then_floats(NO_MODIFIERS)
    }

    #[test]
    fn eligibility_requires_both_thresholds() {
        assert!(check_eligibility(CombatSide::Attacker, &Player::new()).is_ok());
        assert!(check_eligibility(CombatSide::Attacker, &Player::new().with_stats(3, 1)).is_ok());

        let err = check_eligibility(CombatSide::Defender, &Player::new().with_stats(2, 5))
            .unwrap_err();
        assert_eq!(
            err,
            CombatError::IneligibleCombatant {
                side: CombatSide::Defender,
                attack: 2,
                defense: 5
            }
        );
        assert!(check_eligibility(CombatSide::Attacker, &Player::new().with_stats(30, 0)).is_err());
    }

    #[test]
    fn plain_roll_subtracts_reduction() {
        let mut rolls = plain(0.9, 0.5);
        let roll = roll_damage(eligible(10, 2), eligible(10, 2), &mut rolls);

        assert_eq!(roll, DamageRoll { damage: 8, ..DamageRoll::default() });
        assert!(rolls.is_exhausted());
    }

    #[test]
    fn rounding_is_half_to_even() {
        // 10 * 0.75 - 2 * 0.5 = 6.5
        let roll = roll_damage(eligible(10, 2), eligible(10, 2), &mut plain(0.75, 0.5));
        assert_eq!(roll.damage, 6);
    }

    #[test]
    fn heavy_armor_still_deals_one_damage() {
        let roll = roll_damage(eligible(3, 1), eligible(3, 10), &mut plain(0.5, 0.8));
        assert_eq!(roll.damage, 1);
    }

    #[test]
    fn crit_multiplies_and_floors() {
        let mut rolls = ScriptedRolls::default().then_floats([1.0, 0.5, 0.1, 1.9, 0.5, 0.5]);
        let roll = roll_damage(eligible(10, 2), eligible(10, 2), &mut rolls);

        // floor(9 * 1.9) = 17
        assert_eq!(roll.damage, 17);
        assert!(roll.is_crit);
        assert!(!roll.is_miss && !roll.is_lucky);
        assert!(rolls.is_exhausted());
    }

    #[test]
    fn miss_clears_crit_and_suppresses_lucky() {
        let mut rolls = ScriptedRolls::default().then_floats([1.0, 0.5, 0.1, 2.0, 0.05, 0.01]);
        let roll = roll_damage(eligible(10, 2), eligible(10, 2), &mut rolls);

        assert_eq!(
            roll,
            DamageRoll {
                damage: 0,
                is_crit: false,
                is_miss: true,
                is_lucky: false
            }
        );
        assert!(rolls.is_exhausted());
    }

    #[test]
    fn lucky_strike_ignores_defense_and_keeps_crit() {
        let mut rolls =
            ScriptedRolls::default().then_floats([1.0, 0.5, 0.1, 2.0, 0.5, 0.01, 1.5]);
        let roll = roll_damage(eligible(10, 2), eligible(10, 50), &mut rolls);

        assert_eq!(
            roll,
            DamageRoll {
                damage: 15,
                is_crit: true,
                is_miss: false,
                is_lucky: true
            }
        );
        assert!(rolls.is_exhausted());
    }

    #[test]
    fn random_rolls_respect_flag_invariants() {
        let mut rng = PcgRng::new(0xD0E1);
        let attacker = eligible(12, 3);
        let defender = eligible(8, 6);

        for _ in 0..10_000 {
            let roll = roll_damage(attacker, defender, &mut rng);
            assert_eq!(roll.damage == 0, roll.is_miss);
            if roll.is_lucky {
                assert!(!roll.is_miss);
            }
            if roll.is_miss {
                assert!(!roll.is_crit);
            }
        }
    }
}
