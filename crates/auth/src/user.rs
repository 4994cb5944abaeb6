//! User-lookup collaborator.
//!
//! The token core never stores users; it asks a [`UserLookup`] for the
//! credential hash and current roles of a principal name.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::LookupError;
use crate::Role;

/// Stored view of a user, as returned by the user store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub username: String,
    /// bcrypt hash of the password.
    pub password_hash: String,
    pub roles: Vec<Role>,
    /// Disabled users can neither sign in nor be attached to a request.
    pub enabled: bool,
}

impl UserRecord {
    pub fn new(username: impl Into<String>, password_hash: impl Into<String>, roles: Vec<Role>) -> Self {
        Self {
            username: username.into(),
            password_hash: password_hash.into(),
            roles,
            enabled: true,
        }
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}

/// Look up a user by principal name.
#[async_trait]
pub trait UserLookup: Send + Sync {
    async fn find_by_subject(&self, name: &str) -> Result<Option<UserRecord>, LookupError>;
}

/// In-memory user store for development and tests.
#[derive(Debug, Default)]
pub struct InMemoryUserDirectory {
    users: RwLock<HashMap<String, UserRecord>>,
}

impl InMemoryUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a user, keyed by username.
    pub fn insert(&self, record: UserRecord) {
        self.users
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(record.username.clone(), record);
    }
}

#[async_trait]
impl UserLookup for InMemoryUserDirectory {
    async fn find_by_subject(&self, name: &str) -> Result<Option<UserRecord>, LookupError> {
        Ok(self
            .users
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(name)
            .cloned())
    }
}
