//! Process-scoped session store.
//!
//! Holds the identity of the current session and notifies listeners when it
//! changes. Clones share one underlying state, so every consumer sees the
//! same value. A listener stays registered until its `ListenerHandle` is
//! dropped or explicitly unsubscribed.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock, Weak};

use crate::domain::foundation::UserId;
use crate::ports::IdentityResolver;

type Listener = Arc<dyn Fn(Option<&UserId>) + Send + Sync>;

#[derive(Default)]
struct Inner {
    current: RwLock<Option<UserId>>,
    listeners: Mutex<BTreeMap<u64, Listener>>,
    next_id: AtomicU64,
}

impl Inner {
    fn remove_listener(&self, id: u64) {
        if let Ok(mut listeners) = self.listeners.lock() {
            listeners.remove(&id);
        }
    }
}

#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<Inner>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current user, if signed in.
    pub fn get(&self) -> Option<UserId> {
        self.inner.current.read().ok().and_then(|c| c.clone())
    }

    pub fn set(&self, user_id: UserId) {
        self.replace(Some(user_id));
    }

    pub fn clear(&self) {
        self.replace(None);
    }

    /// Registers `listener` for identity changes.
    pub fn on_change<F>(&self, listener: F) -> ListenerHandle
    where
        F: Fn(Option<&UserId>) + Send + Sync + 'static,
    {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        if let Ok(mut listeners) = self.inner.listeners.lock() {
            listeners.insert(id, Arc::new(listener));
        }
        ListenerHandle {
            id,
            store: Arc::downgrade(&self.inner),
        }
    }

    pub fn listener_count(&self) -> usize {
        self.inner.listeners.lock().map(|l| l.len()).unwrap_or_default()
    }

    fn replace(&self, next: Option<UserId>) {
        let changed = match self.inner.current.write() {
            Ok(mut current) if *current != next => {
                *current = next.clone();
                true
            }
            _ => false,
        };
        if !changed {
            return;
        }

        tracing::debug!(signed_in = next.is_some(), "session identity changed");

        // Snapshot so listeners run without holding the lock.
        let listeners: Vec<Listener> = self
            .inner
            .listeners
            .lock()
            .map(|l| l.values().cloned().collect())
            .unwrap_or_default();
        for listener in listeners {
            listener(next.as_ref());
        }
    }
}

#[async_trait]
impl IdentityResolver for SessionStore {
    async fn current_user_id(&self) -> Option<UserId> {
        self.get()
    }
}

/// Subscription to a `SessionStore`. Dropping it unsubscribes.
#[must_use = "dropping the handle immediately unsubscribes the listener"]
pub struct ListenerHandle {
    id: u64,
    store: Weak<Inner>,
}

impl ListenerHandle {
    pub fn unsubscribe(self) {
        // Drop does the work.
    }
}

impl Drop for ListenerHandle {
    fn drop(&mut self) {
        if let Some(inner) = self.store.upgrade() {
            inner.remove_listener(self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    fn alice() -> UserId {
        UserId::new("alice").unwrap()
    }

    #[test]
    fn starts_signed_out() {
        assert_eq!(SessionStore::new().get(), None);
    }

    #[test]
    fn clones_share_state() {
        let store = SessionStore::new();
        let other = store.clone();
        store.set(alice());
        assert_eq!(other.get(), Some(alice()));
        other.clear();
        assert_eq!(store.get(), None);
    }

    #[test]
    fn listeners_see_changes_only() {
        let store = SessionStore::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let _handle = store.on_change(move |id| {
            sink.lock().unwrap().push(id.map(|u| u.as_str().to_string()));
        });

        store.set(alice());
        store.set(alice());
        store.clear();

        assert_eq!(*seen.lock().unwrap(), vec![Some("alice".to_string()), None]);
    }

    #[test]
    fn dropping_handle_unsubscribes() {
        let store = SessionStore::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let handle = store.on_change(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        assert_eq!(store.listener_count(), 1);

        store.set(alice());
        drop(handle);
        store.clear();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(store.listener_count(), 0);
    }

    #[test]
    fn explicit_unsubscribe() {
        let store = SessionStore::new();
        let handle = store.on_change(|_| {});
        handle.unsubscribe();
        assert_eq!(store.listener_count(), 0);
    }

    #[test]
    fn handle_outliving_store_is_harmless() {
        let handle = {
            let store = SessionStore::new();
            store.on_change(|_| {})
        };
        drop(handle);
    }

    #[tokio::test]
    async fn resolves_identity_for_the_pipeline() {
        let store = SessionStore::new();
        assert_eq!(store.current_user_id().await, None);
        store.set(alice());
        assert_eq!(store.current_user_id().await, Some(alice()));
    }
}
