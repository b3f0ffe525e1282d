//! Mock session helpers for router tests.
//!
//! Admin routes sit behind the session gate, which reads a signed `token` cookie.
//! `MockSession` mints that cookie directly so tests need no login round-trip.

use http::HeaderValue;
use uuid::Uuid;

use signage_auth_types::cookie::{SESSION_COOKIE, SESSION_TOKEN_EXP};
use signage_auth_types::token::{SessionClaims, sign_session_token};

/// Configurable identity baked into a test session cookie.
pub struct MockSession {
    pub admin_id: Uuid,
    pub email: String,
    pub role: String,
    pub issued_at: u64,
}

impl MockSession {
    pub fn admin(issued_at: u64) -> Self {
        Self {
            admin_id: Uuid::new_v4(),
            email: "admin@example.com".to_owned(),
            role: "admin".to_owned(),
            issued_at,
        }
    }

    pub fn with_role(mut self, role: &str) -> Self {
        self.role = role.to_owned();
        self
    }

    /// Signed token expiring `SESSION_TOKEN_EXP` seconds after `issued_at`.
    pub fn token(&self, secret: &str) -> String {
        let claims = SessionClaims {
            id: self.admin_id.to_string(),
            email: self.email.clone(),
            role: self.role.clone(),
            iat: self.issued_at,
            exp: self.issued_at + SESSION_TOKEN_EXP,
        };
        sign_session_token(&claims, secret).expect("sign test session token")
    }

    /// `Cookie` request header value as a browser would send it.
    pub fn cookie_header(&self, secret: &str) -> HeaderValue {
        HeaderValue::from_str(&format!("{SESSION_COOKIE}={}", self.token(secret)))
            .expect("valid cookie header")
    }
}
