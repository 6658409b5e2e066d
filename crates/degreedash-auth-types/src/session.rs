//! Session-cookie extractor.

use axum::extract::FromRequestParts;
use axum::response::{IntoResponse, Response};
use axum_extra::extract::cookie::CookieJar;
use http::StatusCode;
use http::request::Parts;

use crate::cookie::SESSION_COOKIE;
use crate::token::{AuthError, SessionInfo, validate_session_token};

/// Application state that can verify session tokens.
pub trait SessionKey {
    fn session_secret(&self) -> &str;
}

/// Authenticated caller, taken from the `degreedash_session` cookie.
///
/// Rejects with 401 `{"kind": "UNAUTHORIZED"}` if the cookie is absent or invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionUser {
    pub user_id: i32,
    pub email: String,
}

impl From<SessionInfo> for SessionUser {
    fn from(info: SessionInfo) -> Self {
        Self {
            user_id: info.user_id,
            email: info.email,
        }
    }
}

/// Resolve the session from request headers without rejecting.
pub fn session_from_headers(
    headers: &http::HeaderMap,
    secret: &str,
) -> Result<SessionUser, AuthError> {
    let jar = CookieJar::from_headers(headers);
    let token = jar.get(SESSION_COOKIE).ok_or(AuthError::Missing)?;
    validate_session_token(token.value(), secret).map(SessionUser::from)
}

#[derive(Debug)]
pub struct SessionRejection(pub AuthError);

impl IntoResponse for SessionRejection {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "kind": "UNAUTHORIZED",
            "message": self.0.to_string(),
        });
        (StatusCode::UNAUTHORIZED, axum::Json(body)).into_response()
    }
}

impl<S> FromRequestParts<S> for SessionUser
where
    S: SessionKey + Send + Sync,
{
    type Rejection = SessionRejection;

    // axum-core 0.5 declares `fn -> impl Future + Send`; resolve synchronously and
    // return a 'static future.
    fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let result = session_from_headers(&parts.headers, state.session_secret());
        if let Err(e) = &result {
            tracing::debug!(error = %e, "session rejected");
        }
        async move { result.map_err(SessionRejection) }
    }
}
