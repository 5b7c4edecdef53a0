//! Application-level data handle.

use std::sync::{Arc, OnceLock};

use crate::store::InMemoryUserStore;

/// Process-lifetime holder of the backing stores.
///
/// Outlives any accessor binding: disconnecting an accessor leaves the data
/// here, and reconnecting picks it up again.
#[derive(Debug, Default)]
pub struct Database {
    users: OnceLock<Arc<InMemoryUserStore>>,
}

impl Database {
    pub fn new() -> Self {
        Self::default()
    }

    /// Users store, created empty on first access and never reset.
    pub fn users(&self) -> Arc<InMemoryUserStore> {
        self.users
            .get_or_init(|| Arc::new(InMemoryUserStore::new()))
            .clone()
    }

    pub fn has_users_store(&self) -> bool {
        self.users.get().is_some()
    }
}
