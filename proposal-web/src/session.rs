//! In-memory staff sessions keyed by a random cookie value.

use std::collections::HashMap;

use axum::http::header::COOKIE;
use axum::http::HeaderMap;
use chrono::{DateTime, Duration, Utc};
use tokio::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

/// Session cookie name.
pub const SESSION_COOKIE: &str = "proposal_session";

/// A signed-in staff member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Staff email.
    pub email: String,
    /// Display name (the email's local part).
    pub name: String,
    /// When the session stops being valid.
    pub expires_at: DateTime<Utc>,
}

/// Session store shared by all requests.
#[derive(Debug)]
pub struct SessionStore {
    sessions: Mutex<HashMap<Uuid, Session>>,
    ttl: Duration,
}

impl SessionStore {
    /// Create a store whose sessions live for `ttl_mins` minutes.
    pub fn new(ttl_mins: u32) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            ttl: Duration::minutes(i64::from(ttl_mins)),
        }
    }

    /// Session lifetime in seconds, for the cookie `Max-Age`.
    pub fn ttl_secs(&self) -> i64 {
        self.ttl.num_seconds()
    }

    /// Start a session for `email` and return its id.
    pub async fn create(&self, email: &str) -> Uuid {
        self.create_at(email, Utc::now()).await
    }

    /// Start a session as of `now`.
    pub async fn create_at(&self, email: &str, now: DateTime<Utc>) -> Uuid {
        let id = Uuid::new_v4();
        let name = email
            .split_once('@')
            .map_or(email, |(local, _)| local)
            .to_owned();
        let session = Session {
            email: email.to_owned(),
            name,
            expires_at: now.checked_add_signed(self.ttl).unwrap_or(now),
        };
        let mut sessions = self.sessions.lock().await;
        sessions.retain(|_, s| s.expires_at > now);
        sessions.insert(id, session);
        debug!(email, active = sessions.len(), "session created");
        id
    }

    /// Look up a live session.
    pub async fn get(&self, id: Uuid) -> Option<Session> {
        self.get_at(id, Utc::now()).await
    }

    /// Look up a session as of `now`; expired sessions are dropped.
    pub async fn get_at(&self, id: Uuid, now: DateTime<Utc>) -> Option<Session> {
        let mut sessions = self.sessions.lock().await;
        match sessions.get(&id) {
            Some(session) if session.expires_at > now => Some(session.clone()),
            Some(_) => {
                sessions.remove(&id);
                None
            }
            None => None,
        }
    }

    /// End a session.
    pub async fn remove(&self, id: Uuid) {
        self.sessions.lock().await.remove(&id);
    }
}

/// Session id from the request's `Cookie` headers, if well formed.
pub fn session_id(headers: &HeaderMap) -> Option<Uuid> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .and_then(|(_, value)| Uuid::parse_str(value.trim()).ok())
}

/// `Set-Cookie` value establishing a session.
pub fn session_cookie(id: Uuid, max_age_secs: i64) -> String {
    format!("{SESSION_COOKIE}={id}; Path=/; HttpOnly; SameSite=Lax; Max-Age={max_age_secs}")
}

/// `Set-Cookie` value clearing the session.
pub fn clear_cookie() -> String {
    format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}
