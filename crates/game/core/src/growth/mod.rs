//! Cooldown-gated stat growth.
//!
//! A player may grow once per cooldown window. Growth draws two independent
//! integer deltas and applies them without a floor, so a bad roll can shrink
//! a character.
//!
//! # Draw order
//!
//! 1. `attack_delta` in [`GameConfig::GROW_ATTACK_DELTA`]
//! 2. `defense_delta` in [`GameConfig::GROW_DEFENSE_DELTA`]

use crate::config::GameConfig;
use crate::env::RngSource;
use crate::error::{ErrorSeverity, GameError};
use crate::state::Player;

/// Errors raised by [`grow`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GrowthError {
    /// Growth attempted before the cooldown elapsed.
    #[error("growth on cooldown for another {remaining_secs}s")]
    CooldownActive { remaining_secs: u64 },
}

impl GameError for GrowthError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::CooldownActive { .. } => "GROWTH_COOLDOWN_ACTIVE",
        }
    }
}

/// Deltas drawn by one growth and the stats they produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GrowthResult {
    pub attack_delta: i64,
    pub defense_delta: i64,
    pub attack: i64,
    pub defense: i64,
    pub grown_at: i64,
}

impl GrowthResult {
    pub fn attack_trend(&self) -> Trend {
        Trend::of(self.attack_delta, Trend::ATTACK_SURGE)
    }

    pub fn defense_trend(&self) -> Trend {
        Trend::of(self.defense_delta, Trend::DEFENSE_SURGE)
    }
}

/// Qualitative direction of a growth delta, used by presentation layers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Trend {
    /// Exceptionally large gain.
    Surge,
    Up,
    Flat,
    Down,
    /// The largest possible loss.
    Crash,
}

impl Trend {
    pub const ATTACK_SURGE: i64 = 10;
    pub const DEFENSE_SURGE: i64 = 4;
    pub const CRASH: i64 = -2;

    pub fn of(delta: i64, surge_at: i64) -> Self {
        if delta >= surge_at {
            Self::Surge
        } else if delta <= Self::CRASH {
            Self::Crash
        } else if delta > 0 {
            Self::Up
        } else if delta < 0 {
            Self::Down
        } else {
            Self::Flat
        }
    }
}

/// Seconds left before `player` may grow again, zero when ready.
pub fn remaining_cooldown(config: &GameConfig, now: i64, player: &Player) -> u64 {
    let elapsed = now.saturating_sub(player.last_grow);
    let cooldown = i64::try_from(config.grow_cooldown_secs).unwrap_or(i64::MAX);
    u64::try_from(cooldown.saturating_sub(elapsed)).unwrap_or(0)
}

pub fn can_grow(config: &GameConfig, now: i64, player: &Player) -> bool {
    remaining_cooldown(config, now, player) == 0
}

/// Apply one growth to `player`.
///
/// Calling this while on cooldown is a contract violation reported as
/// [`GrowthError::CooldownActive`]; the player is left untouched.
pub fn grow(
    config: &GameConfig,
    now: i64,
    player: &mut Player,
    rng: &mut impl RngSource,
) -> Result<GrowthResult, GrowthError> {
    let remaining_secs = remaining_cooldown(config, now, player);
    if remaining_secs > 0 {
        return Err(GrowthError::CooldownActive { remaining_secs });
    }

    let (attack_min, attack_max) = GameConfig::GROW_ATTACK_DELTA;
    let (defense_min, defense_max) = GameConfig::GROW_DEFENSE_DELTA;
    let attack_delta = rng.int_in(attack_min, attack_max);
    let defense_delta = rng.int_in(defense_min, defense_max);

    player.attack = player.attack.saturating_add(attack_delta);
    player.defense = player.defense.saturating_add(defense_delta);
    player.last_grow = now;

    Ok(GrowthResult {
        attack_delta,
        defense_delta,
        attack: player.attack,
        defense: player.defense,
        grown_at: now,
    })
}
