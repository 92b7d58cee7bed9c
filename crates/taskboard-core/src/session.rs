//! Session
//!
//! The logged-in user, owned by an explicit object created at startup and
//! handed to the views, persisted through a [`KeyValueStore`].

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use log::{info, warn};
use thiserror::Error;

use crate::domain::User;

/// Storage key holding the serialized [`User`]
pub const USER_KEY: &str = "user";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("storage unavailable")]
    Unavailable,
    #[error("storage write failed: {0}")]
    Write(String),
    #[error("could not encode session: {0}")]
    Encode(String),
}

/// Persistent string key-value storage (browser localStorage in the UI)
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str);
}

/// In-memory store; clones share the same map
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().map_err(|_| StorageError::Unavailable)?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.remove(key);
        }
    }
}

/// Current user plus the store it is persisted in
#[derive(Debug, Clone)]
pub struct Session<S: KeyValueStore> {
    user: Option<User>,
    store: S,
}

impl<S: KeyValueStore> Session<S> {
    /// Load the persisted user, if any. Unreadable data is discarded.
    pub fn restore(store: S) -> Self {
        let user = match store.get(USER_KEY) {
            None => None,
            Some(raw) => match serde_json::from_str::<User>(&raw) {
                Ok(user) => {
                    info!("restored session for {}", user.email);
                    Some(user)
                }
                Err(e) => {
                    warn!("discarding unreadable stored session: {e}");
                    store.remove(USER_KEY);
                    None
                }
            },
        };
        Self { user, store }
    }

    /// Keep `user` in memory and persist it.
    ///
    /// The in-memory session is set even when persisting fails; the error
    /// only means the login will not survive a reload.
    pub fn login(&mut self, user: User) -> Result<(), StorageError> {
        info!("logged in as {}", user.email);
        let encoded = serde_json::to_string(&user).map_err(|e| StorageError::Encode(e.to_string()));
        self.user = Some(user);
        self.store.set(USER_KEY, &encoded?)
    }

    /// Clear both the in-memory and the persisted user
    pub fn logout(&mut self) {
        if let Some(user) = self.user.take() {
            info!("logged out {}", user.email);
        }
        self.store.remove(USER_KEY);
    }

    pub fn current_user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn user_id(&self) -> Option<u32> {
        self.user.as_ref().map(|u| u.id)
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ana() -> User {
        User { id: 1, email: "a@b.com".into(), username: "ana".into() }
    }

    #[test]
    fn starts_logged_out_with_empty_store() {
        let session = Session::restore(MemoryStore::new());
        assert!(!session.is_authenticated());
        assert_eq!(session.user_id(), None);
    }

    #[test]
    fn login_holds_exactly_the_returned_user() {
        let mut session = Session::restore(MemoryStore::new());
        session.login(ana()).unwrap();
        assert_eq!(session.current_user(), Some(&ana()));
        assert_eq!(session.user_id(), Some(1));
    }

    #[test]
    fn login_survives_restore() {
        let store = MemoryStore::new();
        let mut session = Session::restore(store.clone());
        session.login(ana()).unwrap();

        let reloaded = Session::restore(store);
        assert_eq!(reloaded.current_user(), Some(&ana()));
    }

    #[test]
    fn logout_clears_memory_and_storage() {
        let store = MemoryStore::new();
        let mut session = Session::restore(store.clone());
        session.login(ana()).unwrap();
        session.logout();

        assert!(!session.is_authenticated());
        assert_eq!(store.get(USER_KEY), None);
        assert!(!Session::restore(store).is_authenticated());
    }

    #[test]
    fn corrupt_entry_is_discarded() {
        let store = MemoryStore::new();
        store.set(USER_KEY, "{not json").unwrap();

        let session = Session::restore(store.clone());
        assert!(!session.is_authenticated());
        assert_eq!(store.get(USER_KEY), None);
    }
}
