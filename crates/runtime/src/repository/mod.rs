//! Repository layer for the durable roster.
//!
//! Only the roster is persisted. Open challenges are ephemeral and live in
//! the worker's memory.

mod error;
mod file;
mod memory;
mod traits;

pub use error::{RepositoryError, Result};
pub use file::FileRosterRepository;
pub use memory::InMemoryRosterRepo;
pub use traits::PlayerRepository;
