//! File-based PlayerRepository implementation.

use std::fs;
use std::path::{Path, PathBuf};

use arena_core::Roster;

use super::error::{RepositoryError, Result};
use super::traits::PlayerRepository;

/// Stores the roster as one pretty-printed JSON document.
///
/// # File Format
///
/// A JSON object keyed by player id:
///
/// ```json
/// {
///   "42": { "attack": 10, "defense": 2, "wins": 0, "losses": 0, "last_grow": 0 }
/// }
/// ```
///
/// `name` is present only once a display name was cached. Writes go to a
/// temporary sibling file that is then renamed over the target.
pub struct FileRosterRepository {
    path: PathBuf,
}

impl FileRosterRepository {
    /// Create a repository backed by `path`, creating its parent directory.
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(RepositoryError::Io)?;
        }
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        self.path.with_extension("json.tmp")
    }
}

impl PlayerRepository for FileRosterRepository {
    fn load(&self) -> Result<Roster> {
        if !self.path.exists() {
            tracing::debug!("No roster at {}, starting empty", self.path.display());
            return Ok(Roster::new());
        }

        let text = fs::read_to_string(&self.path).map_err(RepositoryError::Io)?;
        if text.trim().is_empty() {
            return Ok(Roster::new());
        }

        let roster: Roster = serde_json::from_str(&text)?;

        tracing::debug!(
            "Loaded {} players from {}",
            roster.len(),
            self.path.display()
        );

        Ok(roster)
    }

    fn save(&self, roster: &Roster) -> Result<()> {
        let temp_path = self.temp_path();

        let text = serde_json::to_string_pretty(roster)?;

        fs::write(&temp_path, text).map_err(RepositoryError::Io)?;

        // Atomic rename
        fs::rename(&temp_path, &self.path).map_err(RepositoryError::Io)?;

        tracing::debug!("Saved {} players to {}", roster.len(), self.path.display());

        Ok(())
    }
}
