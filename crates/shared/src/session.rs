//! Cookie-correlated session store.
//!
//! Replaces ambient per-visitor session state with an explicit mapping from
//! session id to typed state, owned by the process. The wizard and the staff
//! dashboard each hold their own store instance with their own cookie name;
//! the state type is whatever the caller puts in.
//!
//! Expiry is lazy: there is no background sweeper. Every access compares the
//! entry's last-activity stamp against the configured inactivity timeout and,
//! when it has been exceeded, resets the entry to its default state before
//! returning it. Identifiers can be regenerated in place (same state, new id)
//! to prevent session fixation after privilege-relevant changes.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::crypto::random_token;

const CSRF_TOKEN_LEN: usize = 32;

/// Opaque session identifier, carried in a cookie.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    /// Parses a cookie value. Anything that is not 32 lowercase hex chars is
    /// rejected so arbitrary client input never becomes a map key.
    pub fn parse(value: &str) -> Option<Self> {
        if value.len() == 32 && value.bytes().all(|b| b.is_ascii_hexdigit()) {
            Some(Self(value.to_ascii_lowercase()))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A point-in-time copy of one session's state and metadata.
#[derive(Debug, Clone)]
pub struct Snapshot<T> {
    pub state: T,
    pub csrf_token: String,
    pub created_at: DateTime<Utc>,
    pub last_activity: DateTime<Utc>,
    /// Seconds until the inactivity timeout would expire this session.
    pub time_remaining_secs: i64,
}

#[derive(Debug)]
struct Entry<T> {
    state: T,
    csrf_token: String,
    created_at: DateTime<Utc>,
    last_activity: DateTime<Utc>,
}

impl<T: Default> Entry<T> {
    fn fresh(now: DateTime<Utc>) -> Self {
        Self {
            state: T::default(),
            csrf_token: random_token(CSRF_TOKEN_LEN),
            created_at: now,
            last_activity: now,
        }
    }
}

/// In-process store of live sessions for one namespace.
#[derive(Debug)]
pub struct SessionStore<T> {
    entries: RwLock<HashMap<SessionId, Entry<T>>>,
    timeout: Duration,
}

impl<T: Default + Clone> SessionStore<T> {
    pub fn new(timeout_secs: i64) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            timeout: Duration::seconds(timeout_secs),
        }
    }

    /// Creates a new session with default state and returns its id.
    pub fn create(&self) -> SessionId {
        self.create_at(Utc::now())
    }

    pub fn create_at(&self, now: DateTime<Utc>) -> SessionId {
        let id = SessionId::generate();
        self.entries
            .write()
            .expect("session store lock poisoned")
            .insert(id.clone(), Entry::fresh(now));
        id
    }

    /// Reads a session's state, applying lazy expiry and stamping activity.
    ///
    /// Returns `None` for an unknown id. An expired entry is reset to default
    /// state (fresh csrf token, fresh timestamps) before being returned.
    pub fn load(&self, id: &SessionId) -> Option<Snapshot<T>> {
        self.load_at(id, Utc::now())
    }

    pub fn load_at(&self, id: &SessionId, now: DateTime<Utc>) -> Option<Snapshot<T>> {
        let mut entries = self.entries.write().expect("session store lock poisoned");
        let entry = entries.get_mut(id)?;
        if now - entry.last_activity > self.timeout {
            *entry = Entry::fresh(now);
        } else {
            entry.last_activity = now;
        }
        Some(self.snapshot(entry, now))
    }

    /// Mutates a session's state in place, applying lazy expiry first.
    ///
    /// The closure sees the post-expiry state. Returns the updated snapshot,
    /// or `None` for an unknown id.
    pub fn update<F>(&self, id: &SessionId, mutate: F) -> Option<Snapshot<T>>
    where
        F: FnOnce(&mut T),
    {
        self.update_at(id, Utc::now(), mutate)
    }

    pub fn update_at<F>(&self, id: &SessionId, now: DateTime<Utc>, mutate: F) -> Option<Snapshot<T>>
    where
        F: FnOnce(&mut T),
    {
        let mut entries = self.entries.write().expect("session store lock poisoned");
        let entry = entries.get_mut(id)?;
        if now - entry.last_activity > self.timeout {
            *entry = Entry::fresh(now);
        }
        mutate(&mut entry.state);
        entry.last_activity = now;
        Some(self.snapshot(entry, now))
    }

    /// Resets a session to default state without changing its id.
    pub fn clear(&self, id: &SessionId) {
        let now = Utc::now();
        let mut entries = self.entries.write().expect("session store lock poisoned");
        if let Some(entry) = entries.get_mut(id) {
            *entry = Entry::fresh(now);
        }
    }

    /// Moves a session's state under a freshly generated id.
    ///
    /// The old id stops resolving immediately. Returns the new id, or `None`
    /// for an unknown id.
    pub fn regenerate(&self, id: &SessionId) -> Option<SessionId> {
        let mut entries = self.entries.write().expect("session store lock poisoned");
        let entry = entries.remove(id)?;
        let new_id = SessionId::generate();
        entries.insert(new_id.clone(), entry);
        Some(new_id)
    }

    /// Removes a session entirely.
    pub fn destroy(&self, id: &SessionId) {
        self.entries
            .write()
            .expect("session store lock poisoned")
            .remove(id);
    }

    /// Checks the csrf token for a session without stamping activity.
    pub fn csrf_matches(&self, id: &SessionId, token: &str) -> bool {
        let entries = self.entries.read().expect("session store lock poisoned");
        entries
            .get(id)
            .map(|entry| entry.csrf_token == token)
            .unwrap_or(false)
    }

    fn snapshot(&self, entry: &Entry<T>, now: DateTime<Utc>) -> Snapshot<T> {
        let elapsed = (now - entry.last_activity).num_seconds();
        Snapshot {
            state: entry.state.clone(),
            csrf_token: entry.csrf_token.clone(),
            created_at: entry.created_at,
            last_activity: entry.last_activity,
            time_remaining_secs: (self.timeout.num_seconds() - elapsed).max(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TIMEOUT: i64 = 28_800; // 8 hours

    #[derive(Debug, Clone, Default, PartialEq)]
    struct Counter {
        value: i32,
    }

    fn now() -> DateTime<Utc> {
        Utc::now()
    }

    #[test]
    fn test_unknown_id_is_none() {
        let store: SessionStore<Counter> = SessionStore::new(TIMEOUT);
        let ghost = SessionId::generate();
        assert!(store.load(&ghost).is_none());
        assert!(store.update(&ghost, |_| {}).is_none());
        assert!(store.regenerate(&ghost).is_none());
    }

    #[test]
    fn test_create_then_load_default_state() {
        let store: SessionStore<Counter> = SessionStore::new(TIMEOUT);
        let id = store.create();
        let snap = store.load(&id).unwrap();
        assert_eq!(snap.state, Counter::default());
        assert_eq!(snap.csrf_token.len(), CSRF_TOKEN_LEN);
    }

    #[test]
    fn test_update_persists_state() {
        let store: SessionStore<Counter> = SessionStore::new(TIMEOUT);
        let id = store.create();
        store.update(&id, |s| s.value = 3).unwrap();
        assert_eq!(store.load(&id).unwrap().state.value, 3);
    }

    #[test]
    fn test_expired_session_resets_to_default() {
        let store: SessionStore<Counter> = SessionStore::new(TIMEOUT);
        let t0 = now();
        let id = store.create_at(t0);
        store.update_at(&id, t0, |s| s.value = 9).unwrap();

        // One second past the timeout: state must come back as default.
        let later = t0 + Duration::seconds(TIMEOUT + 1);
        let snap = store.load_at(&id, later).unwrap();
        assert_eq!(snap.state, Counter::default());
        assert_eq!(snap.last_activity, later);
    }

    #[test]
    fn test_session_within_timeout_is_kept() {
        let store: SessionStore<Counter> = SessionStore::new(TIMEOUT);
        let t0 = now();
        let id = store.create_at(t0);
        store.update_at(&id, t0, |s| s.value = 9).unwrap();

        let later = t0 + Duration::seconds(TIMEOUT - 1);
        assert_eq!(store.load_at(&id, later).unwrap().state.value, 9);
    }

    #[test]
    fn test_activity_stamp_slides_expiry_forward() {
        let store: SessionStore<Counter> = SessionStore::new(TIMEOUT);
        let t0 = now();
        let id = store.create_at(t0);
        store.update_at(&id, t0, |s| s.value = 5).unwrap();

        // Touch at t0+4h, then read at t0+10h: still inside the window
        // because the touch restarted the inactivity clock.
        let touch = t0 + Duration::hours(4);
        store.load_at(&id, touch).unwrap();
        let read = t0 + Duration::hours(10);
        assert_eq!(store.load_at(&id, read).unwrap().state.value, 5);
    }

    #[test]
    fn test_expiry_rotates_csrf_token() {
        let store: SessionStore<Counter> = SessionStore::new(TIMEOUT);
        let t0 = now();
        let id = store.create_at(t0);
        let before = store.load_at(&id, t0).unwrap().csrf_token;
        let after = store
            .load_at(&id, t0 + Duration::seconds(TIMEOUT + 1))
            .unwrap()
            .csrf_token;
        assert_ne!(before, after);
    }

    #[test]
    fn test_regenerate_moves_state_and_invalidates_old_id() {
        let store: SessionStore<Counter> = SessionStore::new(TIMEOUT);
        let id = store.create();
        store.update(&id, |s| s.value = 7).unwrap();

        let new_id = store.regenerate(&id).unwrap();
        assert_ne!(new_id, id);
        assert!(store.load(&id).is_none());
        assert_eq!(store.load(&new_id).unwrap().state.value, 7);
    }

    #[test]
    fn test_clear_resets_but_keeps_id() {
        let store: SessionStore<Counter> = SessionStore::new(TIMEOUT);
        let id = store.create();
        store.update(&id, |s| s.value = 7).unwrap();
        store.clear(&id);
        assert_eq!(store.load(&id).unwrap().state.value, 0);
    }

    #[test]
    fn test_destroy_removes_session() {
        let store: SessionStore<Counter> = SessionStore::new(TIMEOUT);
        let id = store.create();
        store.destroy(&id);
        assert!(store.load(&id).is_none());
    }

    #[test]
    fn test_csrf_matches() {
        let store: SessionStore<Counter> = SessionStore::new(TIMEOUT);
        let id = store.create();
        let token = store.load(&id).unwrap().csrf_token;
        assert!(store.csrf_matches(&id, &token));
        assert!(!store.csrf_matches(&id, "wrong-token"));
        assert!(!store.csrf_matches(&SessionId::generate(), &token));
    }

    #[test]
    fn test_time_remaining_full_after_access() {
        let store: SessionStore<Counter> = SessionStore::new(TIMEOUT);
        let t0 = now();
        let id = store.create_at(t0);
        // load stamps activity, so remaining time is the full timeout again
        let snap = store.load_at(&id, t0 + Duration::hours(2)).unwrap();
        assert_eq!(snap.time_remaining_secs, TIMEOUT);
    }

    #[test]
    fn test_session_id_parse() {
        let id = SessionId::generate();
        assert_eq!(SessionId::parse(id.as_str()), Some(id.clone()));
        assert!(SessionId::parse("").is_none());
        assert!(SessionId::parse("short").is_none());
        assert!(SessionId::parse(&"g".repeat(32)).is_none());
        assert!(SessionId::parse(&"a".repeat(33)).is_none());
    }

    #[test]
    fn test_stores_are_independent() {
        let wizard: SessionStore<Counter> = SessionStore::new(TIMEOUT);
        let dashboard: SessionStore<Counter> = SessionStore::new(TIMEOUT);
        let id = wizard.create();
        assert!(dashboard.load(&id).is_none());
    }
}
