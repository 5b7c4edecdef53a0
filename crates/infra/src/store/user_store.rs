use std::sync::{PoisonError, RwLock};

use crm_core::{Entity, User, UserId};

/// Ordered user collection.
///
/// Insertion order is observable through `list`. Lookups are linear scans;
/// there is no secondary index.
pub trait UserStore: Send + Sync {
    fn add(&self, user: User);
    fn list(&self) -> Vec<User>;
    fn get(&self, id: &UserId) -> Option<User>;
}

/// In-memory user store.
///
/// Requests run on a multi-threaded runtime, so the records sit behind a
/// single-writer/multi-reader lock. Every operation takes the lock once.
/// A poisoned lock is recovered: each operation is a single push or read,
/// so the records are never left half-updated.
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    users: RwLock<Vec<User>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.users.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl UserStore for InMemoryUserStore {
    fn add(&self, user: User) {
        self.users
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(user);
    }

    fn list(&self) -> Vec<User> {
        self.users
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn get(&self, id: &UserId) -> Option<User> {
        self.users
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|u| u.id() == id)
            .cloned()
    }
}
