//! Terminal front end for the arena.
//!
//! Reads `<user> <action>` lines, runs them through an
//! [`arena_runtime::ArenaHandle`] and renders the replies as chat text.

pub mod command;
pub mod config;
pub mod dirs;
pub mod format;
pub mod logging;
pub mod names;
pub mod session;

pub use command::{Action, Board, Request};
pub use config::ClientConfig;
pub use session::Session;
