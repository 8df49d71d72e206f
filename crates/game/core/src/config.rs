/// Rule constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameConfig {
    /// Seconds a player must wait between two growth actions.
    pub grow_cooldown_secs: u64,
}

impl GameConfig {
    // ===== growth =====
    pub const DEFAULT_GROW_COOLDOWN_SECS: u64 = 2 * 60 * 60;
    pub const GROW_ATTACK_DELTA: (i64, i64) = (-2, 13);
    pub const GROW_DEFENSE_DELTA: (i64, i64) = (-2, 5);

    // ===== combat eligibility =====
    pub const MIN_COMBAT_ATTACK: i64 = 3;
    pub const MIN_COMBAT_DEFENSE: i64 = 1;

    // ===== damage roll =====
    pub const BASE_DAMAGE_FACTOR: (f64, f64) = (0.5, 1.8);
    pub const DEFENSE_FACTOR: (f64, f64) = (0.3, 0.8);
    pub const CRIT_CHANCE: f64 = 0.15;
    pub const CRIT_MULTIPLIER: (f64, f64) = (1.5, 2.5);
    pub const MISS_CHANCE: f64 = 0.10;
    pub const LUCKY_CHANCE: f64 = 0.05;
    pub const LUCKY_FACTOR: (f64, f64) = (1.2, 2.0);

    // ===== victory bonus =====
    pub const BONUS_ATTACK: (i64, i64) = (2, 5);
    pub const BONUS_DEFENSE: (i64, i64) = (1, 3);

    pub fn new() -> Self {
        Self {
            grow_cooldown_secs: Self::DEFAULT_GROW_COOLDOWN_SECS,
        }
    }

    pub fn with_grow_cooldown(grow_cooldown_secs: u64) -> Self {
        Self { grow_cooldown_secs }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
