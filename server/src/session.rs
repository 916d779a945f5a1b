//! Opaque-token sessions backed by an in-memory map.
//!
//! Tokens are UUID v4 values carried in an `HttpOnly` cookie. Sessions are
//! looked up server-side and expire after the configured TTL; accounts and
//! watchlists persist on disk, sessions do not survive a restart.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::{
    extract::FromRequestParts,
    http::{header::COOKIE, request::Parts, HeaderMap},
};
use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::{error::AppError, state::AppState};

pub const SESSION_COOKIE: &str = "filmfest_session";

#[derive(Debug, Clone)]
struct Session {
    username: String,
    expires_at: DateTime<Utc>,
}

/// Server-side session table.
#[derive(Debug)]
pub struct Sessions {
    ttl: Duration,
    inner: Mutex<HashMap<Uuid, Session>>,
}

impl Sessions {
    pub fn new(ttl_hours: i64) -> Self {
        Self {
            ttl: Duration::hours(ttl_hours),
            inner: Mutex::new(HashMap::new()),
        }
    }

    /// Open a session for a user and return its token.
    pub fn create(&self, username: &str) -> Uuid {
        let token = Uuid::new_v4();
        self.inner.lock().unwrap().insert(
            token,
            Session {
                username: username.to_string(),
                expires_at: Utc::now() + self.ttl,
            },
        );
        token
    }

    /// Resolve a token to its username. Expired sessions are dropped.
    pub fn resolve(&self, token: Uuid) -> Option<String> {
        let mut sessions = self.inner.lock().unwrap();

        match sessions.get(&token) {
            Some(session) if session.expires_at > Utc::now() => Some(session.username.clone()),
            Some(_) => {
                sessions.remove(&token);
                None
            }
            None => None,
        }
    }

    pub fn revoke(&self, token: Uuid) {
        self.inner.lock().unwrap().remove(&token);
    }
}

/// `Set-Cookie` value establishing a session.
pub fn session_cookie(token: Uuid) -> String {
    format!("{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax")
}

/// `Set-Cookie` value clearing the session cookie.
pub fn clear_session_cookie() -> String {
    format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

/// Pull the session token out of the request's `Cookie` headers.
pub fn token_from_headers(headers: &HeaderMap) -> Option<Uuid> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().strip_prefix(SESSION_COOKIE))
        .filter_map(|rest| rest.strip_prefix('='))
        .find_map(|token| Uuid::parse_str(token).ok())
}

/// The identity behind the request's session cookie.
///
/// Handlers that take a `CurrentUser` are session-gated: a missing,
/// unknown, or expired token rejects with 401 before the handler runs.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub username: String,
}

impl FromRequestParts<Arc<AppState>> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let token = token_from_headers(&parts.headers).ok_or(AppError::Unauthorized)?;
        let username = state.sessions.resolve(token).ok_or(AppError::Unauthorized)?;

        Ok(CurrentUser { username })
    }
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    fn headers_with_cookie(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_token_from_single_cookie() {
        let token = Uuid::new_v4();
        let headers = headers_with_cookie(&format!("{SESSION_COOKIE}={token}"));
        assert_eq!(token_from_headers(&headers), Some(token));
    }

    #[test]
    fn test_token_among_other_cookies() {
        let token = Uuid::new_v4();
        let headers =
            headers_with_cookie(&format!("theme=dark; {SESSION_COOKIE}={token}; lang=en"));
        assert_eq!(token_from_headers(&headers), Some(token));
    }

    #[test]
    fn test_missing_or_garbage_token() {
        assert_eq!(token_from_headers(&HeaderMap::new()), None);

        let headers = headers_with_cookie(&format!("{SESSION_COOKIE}=not-a-uuid"));
        assert_eq!(token_from_headers(&headers), None);

        let headers = headers_with_cookie("theme=dark");
        assert_eq!(token_from_headers(&headers), None);
    }

    #[test]
    fn test_session_roundtrip() {
        let sessions = Sessions::new(1);
        let token = sessions.create("alice");

        assert_eq!(sessions.resolve(token), Some("alice".to_string()));

        sessions.revoke(token);
        assert_eq!(sessions.resolve(token), None);
    }

    #[test]
    fn test_expired_session_is_dropped() {
        let sessions = Sessions::new(-1);
        let token = sessions.create("alice");

        assert_eq!(sessions.resolve(token), None);
        // the expired entry is gone, not just hidden
        assert!(sessions.inner.lock().unwrap().is_empty());
    }

    #[test]
    fn test_unknown_token_resolves_to_none() {
        let sessions = Sessions::new(1);
        assert_eq!(sessions.resolve(Uuid::new_v4()), None);
    }

    #[test]
    fn test_cookie_values() {
        let token = Uuid::new_v4();
        let cookie = session_cookie(token);
        assert!(cookie.starts_with(&format!("{SESSION_COOKIE}={token}")));
        assert!(cookie.contains("HttpOnly"));

        assert!(clear_session_cookie().contains("Max-Age=0"));
    }
}
