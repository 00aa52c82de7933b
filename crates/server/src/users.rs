//! User store boundary
//!
//! Credential storage is an external collaborator; the request-handling
//! layer only sees this trait. The in-memory implementation backs tests
//! and single-process deployments where durability is handled elsewhere.

use std::collections::HashMap;
use std::io;
use std::sync::RwLock;

/// A stored user record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub password: String,
}

/// Lookup/insert/persist capability over user records, injected into the
/// request-handling layer.
pub trait UserStore: Send + Sync {
    fn lookup(&self, email: &str) -> Option<UserRecord>;
    fn insert(&self, email: String, record: UserRecord);
    fn persist(&self) -> io::Result<()>;
}

/// Process-local user store.
#[derive(Default)]
pub struct InMemoryUserStore {
    users: RwLock<HashMap<String, UserRecord>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UserStore for InMemoryUserStore {
    fn lookup(&self, email: &str) -> Option<UserRecord> {
        self.users
            .read()
            .ok()
            .and_then(|users| users.get(email).cloned())
    }

    fn insert(&self, email: String, record: UserRecord) {
        if let Ok(mut users) = self.users.write() {
            users.insert(email, record);
        }
    }

    fn persist(&self) -> io::Result<()> {
        // Nothing to flush; durability belongs to an external store.
        Ok(())
    }
}
