use std::collections::HashMap;
use std::sync::RwLock;
use std::time::Duration;

use tokio::time::Instant;
use tracing::debug;
use uuid::Uuid;

use crate::models::job::MatchResult;

pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(60 * 60);

struct Session {
    bookmarks: Vec<MatchResult>,
    touched_at: Instant,
}

impl Session {
    fn is_expired(&self, ttl: Duration) -> bool {
        self.touched_at.elapsed() >= ttl
    }
}

/// Per-session saved results. Append-only; saving the same result twice
/// keeps both copies. A session idle for longer than `ttl` is dropped and
/// behaves like an unknown id.
pub struct BookmarkStore {
    ttl: Duration,
    sessions: RwLock<HashMap<Uuid, Session>>,
}

impl BookmarkStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Registers a fresh session with an empty bookmark list. Idle sessions
    /// are swept first.
    pub fn create_session(&self) -> Uuid {
        let id = Uuid::new_v4();
        let mut sessions = self.sessions.write().unwrap_or_else(|e| e.into_inner());

        let before = sessions.len();
        sessions.retain(|_, s| !s.is_expired(self.ttl));
        if sessions.len() < before {
            debug!("Expired {} idle bookmark sessions", before - sessions.len());
        }

        sessions.insert(
            id,
            Session {
                bookmarks: Vec::new(),
                touched_at: Instant::now(),
            },
        );
        id
    }

    /// Appends and returns the session's new bookmark count, or `None` for an
    /// unknown or expired session.
    pub fn append(&self, session: Uuid, result: MatchResult) -> Option<usize> {
        let mut sessions = self.sessions.write().unwrap_or_else(|e| e.into_inner());
        let entry = self.live_session(&mut sessions, session)?;
        entry.bookmarks.push(result);
        Some(entry.bookmarks.len())
    }

    /// Bookmarks in save order, or `None` for an unknown or expired session.
    pub fn list(&self, session: Uuid) -> Option<Vec<MatchResult>> {
        let mut sessions = self.sessions.write().unwrap_or_else(|e| e.into_inner());
        self.live_session(&mut sessions, session)
            .map(|entry| entry.bookmarks.clone())
    }

    /// Ends a session. Returns `false` when it was unknown or already expired.
    pub fn remove_session(&self, session: Uuid) -> bool {
        let mut sessions = self.sessions.write().unwrap_or_else(|e| e.into_inner());
        sessions
            .remove(&session)
            .map_or(false, |s| !s.is_expired(self.ttl))
    }

    #[cfg(test)]
    fn session_count(&self) -> usize {
        self.sessions.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Looks up a session and refreshes its idle timer; drops it if expired.
    fn live_session<'a>(
        &self,
        sessions: &'a mut HashMap<Uuid, Session>,
        id: Uuid,
    ) -> Option<&'a mut Session> {
        if sessions.get(&id)?.is_expired(self.ttl) {
            sessions.remove(&id);
            return None;
        }
        let entry = sessions.get_mut(&id)?;
        entry.touched_at = Instant::now();
        Some(entry)
    }
}
