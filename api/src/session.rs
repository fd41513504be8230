//! Bearer-token sessions
//!
//! Tokens are random UUIDs mapped to a steam id. They live in memory only, so
//! a restart logs everybody out. Tokens older than the store's TTL stop
//! resolving and are pruned on the next login.

use crate::{ApiError, ApiState};
use axum::extract::FromRequestParts;
use axum::http::{header::AUTHORIZATION, request::Parts};
use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct Session {
    pub steam_id: String,
    pub created_at: DateTime<Utc>,
}

/// Default session lifetime
pub const SESSION_TTL_HOURS: i64 = 24;

#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<DashMap<String, Session>>,
    ttl: Duration,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::with_ttl(Duration::hours(SESSION_TTL_HOURS))
    }
}

impl Session {
    fn is_expired(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        now - self.created_at >= ttl
    }
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            sessions: Arc::new(DashMap::new()),
            ttl,
        }
    }

    /// Issue a fresh token for `steam_id`, dropping expired sessions first
    pub fn issue(&self, steam_id: &str) -> String {
        let pruned = self.prune_expired();
        if pruned > 0 {
            tracing::debug!(pruned, "expired sessions removed");
        }

        let token = Uuid::new_v4().to_string();
        self.sessions.insert(
            token.clone(),
            Session {
                steam_id: steam_id.to_string(),
                created_at: Utc::now(),
            },
        );
        token
    }

    pub fn resolve(&self, token: &str) -> Option<Session> {
        let session = self.sessions.get(token).map(|entry| entry.value().clone())?;
        if session.is_expired(Utc::now(), self.ttl) {
            self.sessions.remove(token);
            return None;
        }
        Some(session)
    }

    /// Remove every expired session, returning how many were dropped
    pub fn prune_expired(&self) -> usize {
        let now = Utc::now();
        let before = self.sessions.len();
        self.sessions
            .retain(|_, session| !session.is_expired(now, self.ttl));
        before.saturating_sub(self.sessions.len())
    }

    pub fn revoke(&self, token: &str) -> Option<Session> {
        self.sessions.remove(token).map(|(_, session)| session)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

/// The authenticated caller, extracted from `Authorization: Bearer <token>`
#[derive(Debug, Clone)]
pub struct SessionUser {
    pub token: String,
    pub steam_id: String,
}

impl FromRequestParts<ApiState> for SessionUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ApiState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| ApiError::Unauthorized("Not logged in".to_string()))?;

        let token = header
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| ApiError::Unauthorized("Malformed authorization header".to_string()))?;

        let session = state.sessions.resolve(token).ok_or_else(|| {
            tracing::warn!("rejected unknown session token");
            ApiError::Unauthorized("Invalid or expired session".to_string())
        })?;

        Ok(SessionUser {
            token: token.to_string(),
            steam_id: session.steam_id,
        })
    }
}
