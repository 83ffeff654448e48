//! In-memory session store.

use std::sync::{Arc, Weak};

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

/// Mapping from session id to the live transport of that session.
///
/// Cloning yields another handle to the same map. Values are handed out as
/// `Arc` clones so no map guard is ever held across an await point.
pub struct SessionStore<T> {
    sessions: Arc<DashMap<String, Arc<T>>>,
}

// Manual Clone impl - T itself does not need to be Clone
impl<T> Clone for SessionStore<T> {
    fn clone(&self) -> Self {
        Self {
            sessions: Arc::clone(&self.sessions),
        }
    }
}

impl<T> Default for SessionStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> SessionStore<T> {
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(DashMap::new()),
        }
    }

    pub fn get(&self, id: &str) -> Option<Arc<T>> {
        self.sessions.get(id).map(|entry| Arc::clone(entry.value()))
    }

    /// Register a session. Returns `false` and leaves the store untouched if
    /// the id is already taken.
    pub fn insert(&self, id: impl Into<String>, session: Arc<T>) -> bool {
        match self.sessions.entry(id.into()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(session);
                true
            }
        }
    }

    pub fn remove(&self, id: &str) -> Option<Arc<T>> {
        self.sessions.remove(id).map(|(_, session)| session)
    }

    /// Remove `id` only while it still maps to `session`.
    ///
    /// Returns `true` if an entry was removed.
    pub fn remove_if_same(&self, id: &str, session: &Weak<T>) -> bool {
        self.sessions
            .remove_if(id, |_, stored| std::ptr::eq(Arc::as_ptr(stored), session.as_ptr()))
            .is_some()
    }

    /// Whether `id` is registered and maps to exactly `session`.
    pub fn is_registered(&self, id: &str, session: &Arc<T>) -> bool {
        self.sessions
            .get(id)
            .is_some_and(|stored| Arc::ptr_eq(stored.value(), session))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.sessions.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Copy of every entry, for iterating without holding map guards.
    pub fn snapshot(&self) -> Vec<(String, Arc<T>)> {
        self.sessions
            .iter()
            .map(|entry| (entry.key().clone(), Arc::clone(entry.value())))
            .collect()
    }

    pub fn clear(&self) {
        self.sessions.clear();
    }
}
