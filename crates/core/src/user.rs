//! The directory's single record type.

use serde::{Deserialize, Serialize};

use crate::{Entity, UserId};

/// A user in the directory.
///
/// `email` is free-form and not required to be unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    email: String,
}

impl User {
    /// Create a user with a freshly generated id.
    pub fn register(email: impl Into<String>) -> Self {
        Self::with_id(UserId::new(), email)
    }

    pub fn with_id(id: UserId, email: impl Into<String>) -> Self {
        Self {
            id,
            email: email.into(),
        }
    }

    pub fn email(&self) -> &str {
        &self.email
    }
}

impl Entity for User {
    type Id = UserId;

    fn id(&self) -> &UserId {
        &self.id
    }
}
