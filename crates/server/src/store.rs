use chrono::{DateTime, TimeDelta, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use uuid::Uuid;

use bulletin_core::SessionState;

/// One browser session's state.
///
/// The state lock is held for the whole of a generate or translate batch,
/// so a second action on the same session waits for the first to finish.
pub struct SessionHandle {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub state: tokio::sync::Mutex<SessionState>,
    last_active: Mutex<DateTime<Utc>>,
}

impl SessionHandle {
    fn new(now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: now,
            state: tokio::sync::Mutex::new(SessionState::new()),
            last_active: Mutex::new(now),
        }
    }

    fn touch(&self, now: DateTime<Utc>) {
        *self.last_active.lock().unwrap_or_else(PoisonError::into_inner) = now;
    }

    fn idle_since(&self) -> DateTime<Utc> {
        *self.last_active.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// In-memory session registry with idle expiry.
#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, Arc<SessionHandle>>>>,
    ttl: TimeDelta,
}

impl SessionStore {
    pub fn new(ttl_secs: u64) -> Self {
        let ttl = i64::try_from(ttl_secs)
            .ok()
            .and_then(TimeDelta::try_seconds)
            .unwrap_or(TimeDelta::MAX);
        Self {
            sessions: Arc::default(),
            ttl,
        }
    }

    /// Register a fresh session. Expired sessions are dropped first.
    pub fn create(&self) -> Arc<SessionHandle> {
        let now = Utc::now();
        self.prune_at(now);
        let handle = Arc::new(SessionHandle::new(now));
        self.sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(handle.id, Arc::clone(&handle));
        tracing::debug!(session = %handle.id, "session created");
        handle
    }

    /// Look up a live session and mark it active.
    pub fn get(&self, id: &Uuid) -> Option<Arc<SessionHandle>> {
        let now = Utc::now();
        let handle = self
            .sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned()?;
        if self.is_expired(&handle, now) {
            self.remove(id);
            return None;
        }
        handle.touch(now);
        Some(handle)
    }

    pub fn remove(&self, id: &Uuid) -> bool {
        self.sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(id)
            .is_some()
    }

    pub fn len(&self) -> usize {
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn is_expired(&self, handle: &SessionHandle, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(handle.idle_since()) > self.ttl
    }

    fn prune_at(&self, now: DateTime<Utc>) {
        let mut sessions = self
            .sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let before = sessions.len();
        sessions.retain(|_, handle| !self.is_expired(handle, now));
        let pruned = before - sessions.len();
        if pruned > 0 {
            tracing::info!(pruned, "expired idle sessions");
        }
    }
}
