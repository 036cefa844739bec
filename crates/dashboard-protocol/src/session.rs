//! Stored user session.
//!
//! The session is the JSON of the user-creation response, kept wherever
//! the embedding app keeps it. Anything that does not decode into a
//! usable, unexpired session reads as "no session"; callers never see an
//! error for it.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::rest::UserResponse;

/// A signed-in user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: u64,
    pub username: String,
    /// Bearer token for authenticated calls.
    pub token: Option<String>,
    /// Key for the portfolio endpoint.
    pub session_id: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl Session {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        matches!(self.expires_at, Some(at) if at <= now)
    }

    /// `Authorization` header value, when the session has a token.
    pub fn bearer(&self) -> Option<String> {
        self.token.as_ref().map(|t| format!("Bearer {}", t))
    }

    /// Identifier used in `/api/v1/portfolios/{id}`.
    pub fn portfolio_key(&self) -> Option<&str> {
        self.session_id.as_deref().or(self.token.as_deref())
    }
}

impl From<UserResponse> for Session {
    fn from(user: UserResponse) -> Self {
        Session {
            user_id: user.id,
            username: user.username,
            token: user.token,
            session_id: user.session_id,
            expires_at: user.expires_at,
        }
    }
}

/// Decode a stored session, checked against the current time.
pub fn decode_session(stored: &str) -> Option<Session> {
    decode_session_at(stored, Utc::now())
}

/// Decode a stored session as of `now`.
pub fn decode_session_at(stored: &str, now: DateTime<Utc>) -> Option<Session> {
    let stored = stored.trim();
    if stored.is_empty() {
        return None;
    }

    let user: UserResponse = match serde_json::from_str(stored) {
        Ok(user) => user,
        Err(e) => {
            debug!("discarding malformed session: {}", e);
            return None;
        }
    };

    let session = Session::from(user);
    if session.username.trim().is_empty() || session.portfolio_key().is_none() {
        debug!("discarding session without credentials");
        return None;
    }
    if session.is_expired(now) {
        debug!(user = %session.username, "discarding expired session");
        return None;
    }
    Some(session)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).single().expect("valid date")
    }

    #[test]
    fn valid_session_decodes() {
        let stored = r#"{"id": 4, "username": "ann", "token": "abc", "expiresAt": "2024-06-01T00:00:00Z"}"#;
        let session = decode_session_at(stored, at(2024, 5, 1)).expect("session");
        assert_eq!(session.user_id, 4);
        assert_eq!(session.bearer().as_deref(), Some("Bearer abc"));
        assert_eq!(session.portfolio_key(), Some("abc"));
    }

    #[test]
    fn session_id_only_is_enough() {
        let stored = r#"{"id": 1, "username": "bob", "sessionId": "s-9"}"#;
        let session = decode_session_at(stored, at(2024, 5, 1)).expect("session");
        assert_eq!(session.portfolio_key(), Some("s-9"));
        assert_eq!(session.bearer(), None);
    }

    #[test]
    fn expired_session_is_absent() {
        let stored = r#"{"id": 4, "username": "ann", "token": "abc", "expiresAt": "2024-06-01T00:00:00Z"}"#;
        assert!(decode_session_at(stored, at(2024, 6, 1)).is_none());
        assert!(decode_session_at(stored, at(2025, 1, 1)).is_none());
    }

    #[test]
    fn zone_less_expiry_is_honoured() {
        let stored = r#"{"id": 4, "username": "ann", "token": "abc", "expiresAt": "2024-06-01T00:00:00.5"}"#;
        assert!(decode_session_at(stored, at(2024, 5, 31)).is_some());
        assert!(decode_session_at(stored, at(2024, 6, 2)).is_none());
    }

    #[test]
    fn malformed_session_is_absent() {
        for stored in ["", "   ", "{", "null", "[]", r#"{"id": "x"}"#, r#"{"id": 1, "username": "ann"}"#] {
            assert!(decode_session_at(stored, at(2024, 1, 1)).is_none(), "{}", stored);
        }
    }
}
