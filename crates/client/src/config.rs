//! Client configuration structures and loaders.
use std::env;
use std::path::PathBuf;

use arena_core::PlayerId;

/// Settings owned by the terminal client rather than the runtime.
#[derive(Clone, Debug, Default)]
pub struct ClientConfig {
    /// The single identity allowed to run admin commands.
    pub admin_id: Option<PlayerId>,
    /// Overrides the platform log directory.
    pub log_dir: Option<PathBuf>,
}

impl ClientConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `ARENA_ADMIN_ID` - Identity allowed to reset and override (default: none)
    /// - `ARENA_LOG_DIR` - Log directory (default: platform cache dir)
    pub fn from_env() -> Self {
        Self {
            admin_id: read_env::<String>("ARENA_ADMIN_ID")
                .filter(|id| !id.trim().is_empty())
                .map(PlayerId::from),
            log_dir: env::var("ARENA_LOG_DIR").ok().map(PathBuf::from),
        }
    }

    pub fn is_admin(&self, id: &PlayerId) -> bool {
        self.admin_id.as_ref() == Some(id)
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
