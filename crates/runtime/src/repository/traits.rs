//! Repository contract for saving and loading the roster.

use arena_core::Roster;

use super::error::Result;

/// Durable store for the full roster.
///
/// The roster is written as a whole on every snapshot; there is no partial
/// update. Implementations must be usable from the worker task.
pub trait PlayerRepository: Send + Sync {
    /// Read the full mapping. A store that was never written is an empty
    /// roster, not an error.
    fn load(&self) -> Result<Roster>;

    /// Persist the full mapping, replacing whatever was stored before.
    fn save(&self, roster: &Roster) -> Result<()>;
}
