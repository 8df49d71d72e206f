//! Worker tasks that back the runtime orchestration.
//!
//! The arena worker is the only owner of mutable arena state.

mod arena;

pub use arena::{ArenaWorker, Command};
