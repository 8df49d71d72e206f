//! Deterministic duel rules and data types shared by the runtime and clients.
//!
//! `arena-core` defines the canonical rules (growth, combat, challenges,
//! rankings) and the player roster they operate on. Nothing here performs I/O
//! or reads the clock: callers pass `now` and a [`RngSource`] explicitly.
//! All roster mutations flow through [`engine::ArenaEngine`], and the runtime
//! depends on the types re-exported here.
pub mod challenge;
pub mod combat;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod growth;
pub mod leaderboard;
pub mod state;

pub use challenge::{Challenge, ChallengeError, ChallengeId, ChallengeRegistry};
pub use combat::{
    CombatBonus, CombatError, CombatOutcome, CombatReport, CombatSide, DamageRoll, Eligible,
    adjudicate, check_eligibility, resolve_combat, roll_damage,
};
pub use config::GameConfig;
pub use engine::{AcceptError, ArenaEngine, ArenaState, Touched};
pub use env::{PcgRng, RngSource, ScriptedRolls};
pub use error::{ErrorSeverity, GameError};
pub use growth::{GrowthError, GrowthResult, Trend, can_grow, grow, remaining_cooldown};
pub use leaderboard::{LEADERBOARD_SIZE, LeaderboardEntry, Metric, MetricValue, rank};
pub use state::{
    DEFAULT_ATTACK, DEFAULT_DEFENSE, MAX_NAME_CHARS, NotFound, Player, PlayerId, Roster,
};
