//! Service wiring shared by every handler.

use crm_auth::Credentials;
use crm_infra::{Database, UserAccessor};

/// Dependencies injected into handlers via `Extension<Arc<AppServices>>`.
///
/// Owns the [`Database`] for the process lifetime; the accessor is bound to it
/// by [`AppServices::connect`] and unbound by [`AppServices::disconnect`].
#[derive(Debug)]
pub struct AppServices {
    database: Database,
    users: UserAccessor,
    credentials: Credentials,
}

impl AppServices {
    /// Build unconnected services.
    pub fn new(credentials: Credentials) -> Self {
        Self {
            database: Database::new(),
            users: UserAccessor::new(),
            credentials,
        }
    }

    /// Build services and bind the accessor in one step.
    pub async fn connected(credentials: Credentials) -> Self {
        let services = Self::new(credentials);
        services.connect().await;
        services
    }

    pub async fn connect(&self) {
        self.users.connect(&self.database).await;
    }

    pub async fn disconnect(&self) {
        self.users.disconnect().await;
    }

    pub fn users(&self) -> &UserAccessor {
        &self.users
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }
}
