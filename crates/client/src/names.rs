//! In-process stand-in for the platform's name directory.

use std::collections::HashMap;
use std::sync::RwLock;

use arena_core::PlayerId;
use arena_runtime::DisplayNameResolver;
use async_trait::async_trait;

/// Names users announced with `register`.
#[derive(Debug, Default)]
pub struct NameBook {
    names: RwLock<HashMap<PlayerId, String>>,
}

impl NameBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, id: PlayerId, name: String) {
        if let Ok(mut names) = self.names.write() {
            names.insert(id, name);
        }
    }

    pub fn lookup(&self, id: &PlayerId) -> Option<String> {
        self.names.read().ok()?.get(id).cloned()
    }
}

#[async_trait]
impl DisplayNameResolver for NameBook {
    async fn resolve(&self, id: &PlayerId) -> Option<String> {
        self.lookup(id)
    }
}
