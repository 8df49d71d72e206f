//! Authoritative duel state representation.
//!
//! This module owns the player records and the roster that maps stable
//! identities to them. Runtime layers clone or query the roster but mutate it
//! exclusively through the engine and the roster's own administrative helpers.
mod player;
mod roster;

pub use player::{DEFAULT_ATTACK, DEFAULT_DEFENSE, MAX_NAME_CHARS, Player, PlayerId};
pub use roster::{NotFound, Roster};
