//! Mock session helpers for HTTP tests.
//!
//! Mints a real session token signed with [`TEST_SESSION_SECRET`] so requests
//! pass through the same `SessionUser` extractor the service uses.

use axum::http::{HeaderName, HeaderValue, header};

use degreedash_auth_types::{cookie::SESSION_COOKIE, token::issue_session_token};

/// Session secret the test router must be configured with.
pub const TEST_SESSION_SECRET: &str = "degreedash-test-session-secret";

/// Identity carried by the mock session cookie.
pub struct MockSession {
    pub user_id: i32,
    pub email: String,
}

impl MockSession {
    pub fn new(user_id: i32, email: impl Into<String>) -> Self {
        Self {
            user_id,
            email: email.into(),
        }
    }

    /// `Cookie` header carrying a valid session for this identity.
    pub fn cookie_header(&self) -> (HeaderName, HeaderValue) {
        let token = issue_session_token(self.user_id, &self.email, TEST_SESSION_SECRET)
            .expect("failed to sign test session");
        (
            header::COOKIE,
            HeaderValue::from_str(&format!("{SESSION_COOKIE}={token}")).unwrap(),
        )
    }
}
