//! Display-name enrichment for leaderboard rows.
//!
//! The platform that knows human-readable names is consulted outside the
//! worker, and the results are cached back through the handle. A slow or
//! failing lookup therefore never blocks other commands.

use async_trait::async_trait;

use arena_core::{LeaderboardEntry, MAX_NAME_CHARS, PlayerId};

use crate::api::{ArenaHandle, Result};

/// Best-effort lookup of a display name for an identity.
#[async_trait]
pub trait DisplayNameResolver: Send + Sync {
    /// `None` when the platform does not know the identity.
    async fn resolve(&self, id: &PlayerId) -> Option<String>;
}

/// Fill in missing names on `entries` and cache the resolved ones.
///
/// Rows whose name cannot be resolved keep `None`; presentation falls back
/// to a placeholder. Returns how many names were resolved.
pub async fn backfill_names(
    handle: &ArenaHandle,
    resolver: &dyn DisplayNameResolver,
    entries: &mut [LeaderboardEntry],
) -> Result<usize> {
    let mut resolved = 0;

    for entry in entries.iter_mut().filter(|entry| entry.name.is_none()) {
        let Some(name) = resolver.resolve(&entry.id).await else {
            tracing::debug!("No display name for {}", entry.id);
            continue;
        };

        handle.cache_name(entry.id.clone(), name.clone()).await?;
        entry.name = Some(name.chars().take(MAX_NAME_CHARS).collect());
        resolved += 1;
    }

    Ok(resolved)
}
