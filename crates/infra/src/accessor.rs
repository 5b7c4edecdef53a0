//! Lifecycle-bound access to the user store.
//!
//! Handlers never touch a store directly; they go through a [`UserAccessor`]
//! that is bound to the application's [`Database`] at startup and unbound at
//! shutdown.

use std::sync::{Arc, PoisonError, RwLock};

use thiserror::Error;

use crm_core::{User, UserId};

use crate::database::Database;
use crate::store::UserStore;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AccessorError {
    #[error("accessor is not connected to a database")]
    NotConnected,
}

#[derive(Default)]
pub struct UserAccessor {
    binding: RwLock<Option<Arc<dyn UserStore>>>,
}

impl UserAccessor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind to `db`, creating its users store if it does not exist yet.
    ///
    /// Existing data is kept. Calling this again rebinds to the same store.
    pub async fn connect(&self, db: &Database) {
        let store: Arc<dyn UserStore> = db.users();
        *self.binding.write().unwrap_or_else(PoisonError::into_inner) = Some(store);
        tracing::info!("connect to database");
    }

    /// Drop the binding. The data stays in the [`Database`].
    pub async fn disconnect(&self) {
        self.binding
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        tracing::info!("disconnect from database");
    }

    pub fn is_connected(&self) -> bool {
        self.binding
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    pub async fn add_user(&self, user: User) -> Result<(), AccessorError> {
        self.store()?.add(user);
        Ok(())
    }

    pub async fn list_users(&self) -> Result<Vec<User>, AccessorError> {
        Ok(self.store()?.list())
    }

    pub async fn get_user(&self, id: &UserId) -> Result<Option<User>, AccessorError> {
        Ok(self.store()?.get(id))
    }

    // Clone the handle out so the binding lock is not held across store calls.
    fn store(&self) -> Result<Arc<dyn UserStore>, AccessorError> {
        self.binding
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or(AccessorError::NotConnected)
    }
}

impl core::fmt::Debug for UserAccessor {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("UserAccessor")
            .field("connected", &self.is_connected())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crm_core::Entity;

    #[tokio::test]
    async fn unbound_accessor_reports_not_connected() {
        let accessor = UserAccessor::new();
        assert!(!accessor.is_connected());
        assert_eq!(accessor.list_users().await, Err(AccessorError::NotConnected));
        assert_eq!(
            accessor.add_user(User::register("a@x.com")).await,
            Err(AccessorError::NotConnected)
        );
    }

    #[tokio::test]
    async fn connected_accessor_round_trips_users() {
        let db = Database::new();
        let accessor = UserAccessor::new();
        accessor.connect(&db).await;

        let user = User::register("a@x.com");
        accessor.add_user(user.clone()).await.unwrap();

        let fetched = accessor.get_user(user.id()).await.unwrap();
        assert_eq!(fetched, Some(user));
        assert_eq!(accessor.get_user(&UserId::new()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn list_preserves_creation_order() {
        let db = Database::new();
        let accessor = UserAccessor::new();
        accessor.connect(&db).await;

        let users: Vec<User> = ["u1@x.com", "u2@x.com", "u3@x.com"]
            .into_iter()
            .map(User::register)
            .collect();
        for u in &users {
            accessor.add_user(u.clone()).await.unwrap();
        }

        assert_eq!(accessor.list_users().await.unwrap(), users);
    }

    #[tokio::test]
    async fn reconnect_keeps_existing_data() {
        let db = Database::new();
        let accessor = UserAccessor::new();

        accessor.connect(&db).await;
        accessor.add_user(User::register("a@x.com")).await.unwrap();
        accessor.disconnect().await;
        assert!(!accessor.is_connected());
        assert_eq!(db.users().len(), 1);

        accessor.connect(&db).await;
        let users = accessor.list_users().await.unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].email(), "a@x.com");
    }

    #[tokio::test]
    async fn connect_twice_does_not_reset() {
        let db = Database::new();
        let accessor = UserAccessor::new();
        accessor.connect(&db).await;
        accessor.add_user(User::register("a@x.com")).await.unwrap();
        accessor.connect(&db).await;
        assert_eq!(accessor.list_users().await.unwrap().len(), 1);
    }
}
