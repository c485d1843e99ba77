//! Per-session UI state and the store that holds it between requests.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::filter::Selection;
use crate::normalize::NormalizationFlag;

const MAX_SESSION_ID_LEN: usize = 64;

/// Everything a reactive rule may read besides the immutable tables.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub selection: Selection,
    pub normalization: NormalizationFlag,
}

pub fn valid_session_id(id: &str) -> bool {
    !id.is_empty()
        && id.len() <= MAX_SESSION_ID_LEN
        && id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

#[derive(Debug)]
struct Entry {
    state: SessionState,
    last_seen: Instant,
}

/// Sessions idle past `ttl` are dropped; past `max_sessions` the least
/// recently seen session is evicted.
#[derive(Debug)]
pub struct SessionStore {
    sessions: HashMap<String, Entry>,
    ttl: Duration,
    max_sessions: usize,
}

impl SessionStore {
    pub fn new(ttl: Duration, max_sessions: usize) -> Self {
        Self {
            sessions: HashMap::new(),
            ttl,
            max_sessions: max_sessions.max(1),
        }
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Current state, creating a default session on first use.
    pub fn get_or_create(&mut self, id: &str, now: Instant) -> SessionState {
        if let Some(entry) = self.sessions.get_mut(id) {
            entry.last_seen = now;
            return entry.state.clone();
        }
        self.insert(id, SessionState::default(), now);
        SessionState::default()
    }

    pub fn commit(&mut self, id: &str, state: SessionState, now: Instant) {
        match self.sessions.get_mut(id) {
            Some(entry) => {
                entry.state = state;
                entry.last_seen = now;
            }
            None => self.insert(id, state, now),
        }
    }

    fn insert(&mut self, id: &str, state: SessionState, now: Instant) {
        if self.sessions.len() >= self.max_sessions {
            if let Some(oldest) = self
                .sessions
                .iter()
                .min_by_key(|(_, e)| e.last_seen)
                .map(|(k, _)| k.clone())
            {
                self.sessions.remove(&oldest);
            }
        }
        self.sessions.insert(id.to_string(), Entry { state, last_seen: now });
    }

    /// Drop idle sessions; returns how many were removed.
    pub fn prune(&mut self, now: Instant) -> usize {
        let before = self.sessions.len();
        let ttl = self.ttl;
        self.sessions
            .retain(|_, e| now.saturating_duration_since(e.last_seen) <= ttl);
        before - self.sessions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ModelId;

    #[test]
    fn test_fresh_session_has_defaults() {
        let mut store = SessionStore::new(Duration::from_secs(60), 8);
        let state = store.get_or_create("abc", Instant::now());
        assert_eq!(state.selection, Selection::All);
        assert!(!state.normalization.is_enabled());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_commit_then_read() {
        let mut store = SessionStore::new(Duration::from_secs(60), 8);
        let now = Instant::now();
        let state = SessionState {
            selection: Selection::only(&[ModelId::Ridge]),
            normalization: NormalizationFlag::new(true),
        };
        store.commit("s1", state.clone(), now);
        assert_eq!(store.get_or_create("s1", now), state);
    }

    #[test]
    fn test_prune_idle() {
        let mut store = SessionStore::new(Duration::from_secs(10), 8);
        let t0 = Instant::now();
        store.get_or_create("old", t0);
        store.get_or_create("new", t0 + Duration::from_secs(15));
        assert_eq!(store.prune(t0 + Duration::from_secs(20)), 1);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_evicts_least_recent_when_full() {
        let mut store = SessionStore::new(Duration::from_secs(60), 2);
        let t0 = Instant::now();
        store.get_or_create("a", t0);
        store.get_or_create("b", t0 + Duration::from_secs(1));
        store.get_or_create("a", t0 + Duration::from_secs(2));
        store.get_or_create("c", t0 + Duration::from_secs(3));
        assert_eq!(store.len(), 2);
        let t = t0 + Duration::from_secs(4);
        let before = store.len();
        store.get_or_create("a", t);
        assert_eq!(store.len(), before);
    }

    #[test]
    fn test_session_id_validation() {
        assert!(valid_session_id("a1-b_2"));
        assert!(!valid_session_id(""));
        assert!(!valid_session_id("../etc"));
        assert!(!valid_session_id(&"x".repeat(65)));
    }
}
