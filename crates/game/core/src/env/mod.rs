//! Collaborators the rules consume but do not own.
//!
//! The only environment input the duel rules need besides `now` is a source
//! of random draws. Keeping it behind [`RngSource`] lets the runtime plug in
//! an entropy-seeded generator while tests replay exact draw sequences.
mod rng;

pub use rng::{PcgRng, RngSource, ScriptedRolls};
