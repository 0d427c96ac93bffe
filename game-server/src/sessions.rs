use std::sync::Mutex;
use std::time::{Duration, Instant};

use dashmap::DashMap;
use game_core::GameSession;
use game_types::GameId;

struct SessionSlot {
    session: GameSession,
    last_activity: Instant,
}

/// Process-wide map of live sessions. Every mutation for a given game id
/// goes through that session's own mutex, so two concurrent guesses for the
/// same game are applied one at a time; unrelated sessions never contend.
pub struct SessionStore {
    slots: DashMap<GameId, Mutex<SessionSlot>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            slots: DashMap::new(),
        }
    }

    pub fn insert(&self, session: GameSession) {
        self.slots.insert(
            session.id,
            Mutex::new(SessionSlot {
                session,
                last_activity: Instant::now(),
            }),
        );
    }

    /// Run `f` against the session under its lock, refreshing the activity
    /// timestamp. Returns `None` when the id is unknown. The closure must
    /// not block: anything slow (word generation, storage) happens outside.
    pub fn with_session<F, R>(&self, id: &GameId, f: F) -> Option<R>
    where
        F: FnOnce(&mut GameSession) -> R,
    {
        let slot = self.slots.get(id)?;
        let mut guard = slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        guard.last_activity = Instant::now();
        Some(f(&mut guard.session))
    }

    /// Drop sessions idle for longer than `ttl`. Returns how many were
    /// removed.
    pub fn evict_idle(&self, ttl: Duration) -> usize {
        let before = self.slots.len();
        self.slots.retain(|_, slot| {
            let guard = slot.get_mut().unwrap_or_else(|poisoned| poisoned.into_inner());
            guard.last_activity.elapsed() <= ttl
        });
        before - self.slots.len()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_types::SessionStatus;
    use uuid::Uuid;

    fn test_session() -> GameSession {
        GameSession::new(Uuid::new_v4(), "CAT".to_string(), 1, "animals".to_string())
    }

    #[test]
    fn test_insert_and_mutate() {
        let store = SessionStore::new();
        let session = test_session();
        let id = session.id;
        store.insert(session);

        let status = store.with_session(&id, |s| s.guess("c").unwrap());
        assert_eq!(status, Some(SessionStatus::Playing));

        let masked = store.with_session(&id, |s| s.masked());
        assert_eq!(masked.as_deref(), Some("C _ _"));
    }

    #[test]
    fn test_unknown_id() {
        let store = SessionStore::new();
        assert_eq!(store.with_session(&Uuid::new_v4(), |_| ()), None);
    }

    #[test]
    fn test_eviction_spares_active_sessions() {
        let store = SessionStore::new();
        let session = test_session();
        let id = session.id;
        store.insert(session);

        assert_eq!(store.evict_idle(Duration::from_secs(60)), 0);
        assert_eq!(store.len(), 1);

        assert_eq!(store.evict_idle(Duration::ZERO), 1);
        assert!(store.is_empty());
        assert_eq!(store.with_session(&id, |_| ()), None);
    }

    #[test]
    fn test_activity_refresh_on_access() {
        let store = SessionStore::new();
        let session = test_session();
        let id = session.id;
        store.insert(session);

        std::thread::sleep(Duration::from_millis(15));
        store.with_session(&id, |_| ());

        // Touched just now, so a 10ms TTL keeps it alive.
        assert_eq!(store.evict_idle(Duration::from_millis(10)), 0);
    }
}
