//! Server-side session storage.
//!
//! Sessions map an opaque random id (carried in the `sid` cookie) to a user id.
//! They live in process memory only; restarting the server logs everyone out.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::{DateTime, Utc};
use cookie::time;
use tokio::sync::RwLock;
use tokio::time::interval;
use uuid::Uuid;

use crate::shared::constants::SESSION_COOKIE;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub id: String,
    pub user_id: i32,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Start a new session for `user_id`
    async fn create(&self, user_id: i32) -> Session;

    /// Look up a live session and extend its expiry. Expired sessions are
    /// removed and reported as absent.
    async fn touch(&self, id: &str) -> Option<Session>;

    async fn destroy(&self, id: &str);

    /// Drop every session of a user, returning how many were removed
    async fn destroy_for_user(&self, user_id: i32) -> usize;

    /// Remove expired sessions, returning how many were removed
    async fn purge_expired(&self) -> usize;
}

/// Session store backed by a process-local map
pub struct MemorySessionStore {
    sessions: RwLock<HashMap<String, Session>>,
    ttl: chrono::Duration,
}

impl MemorySessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            ttl: chrono::Duration::from_std(ttl).unwrap_or(chrono::Duration::days(1)),
        }
    }

    #[cfg(test)]
    async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn create(&self, user_id: i32) -> Session {
        let now = Utc::now();
        let session = Session {
            id: Uuid::new_v4().simple().to_string(),
            user_id,
            created_at: now,
            expires_at: now + self.ttl,
        };

        self.sessions
            .write()
            .await
            .insert(session.id.clone(), session.clone());
        session
    }

    async fn touch(&self, id: &str) -> Option<Session> {
        let now = Utc::now();
        let mut sessions = self.sessions.write().await;

        match sessions.get_mut(id) {
            Some(session) if !session.is_expired(now) => {
                session.expires_at = now + self.ttl;
                Some(session.clone())
            }
            Some(_) => {
                sessions.remove(id);
                None
            }
            None => None,
        }
    }

    async fn destroy(&self, id: &str) {
        self.sessions.write().await.remove(id);
    }

    async fn destroy_for_user(&self, user_id: i32) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, s| s.user_id != user_id);
        before - sessions.len()
    }

    async fn purge_expired(&self) -> usize {
        let now = Utc::now();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, s| !s.is_expired(now));
        before - sessions.len()
    }
}

/// Background sweeper removing expired sessions
pub struct SessionSweeper {
    store: Arc<dyn SessionStore>,
    every: Duration,
}

impl SessionSweeper {
    pub fn new(store: Arc<dyn SessionStore>, every: Duration) -> Self {
        Self { store, every }
    }

    pub async fn run(&self) {
        tracing::info!("Starting session sweeper (every {:?})", self.every);

        let mut ticker = interval(self.every);
        loop {
            ticker.tick().await;

            let removed = self.store.purge_expired().await;
            if removed > 0 {
                tracing::debug!("Purged {} expired sessions", removed);
            }
        }
    }
}

// =============================================================================
// COOKIE HELPERS
// =============================================================================

/// Session id carried by the request's `sid` cookie, if any
pub fn session_id(jar: &CookieJar) -> Option<String> {
    jar.get(SESSION_COOKIE)
        .map(|c| c.value_trimmed().to_string())
        .filter(|id| !id.is_empty())
}

/// Cookie establishing the session, valid for `max_age`
pub fn session_cookie(session_id: String, max_age: Duration, secure: bool) -> Cookie<'static> {
    let max_age = i64::try_from(max_age.as_secs()).unwrap_or(i64::MAX);

    Cookie::build((SESSION_COOKIE, session_id))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(time::Duration::seconds(max_age))
        .build()
}

/// Cookie instructing the browser to drop the session cookie
pub fn removal_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build();
    cookie.make_removal();
    cookie
}
