//! Cookie builders for the session and the OAuth `state` round-trip.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;

use crate::token::SESSION_TOKEN_EXP;

/// Cookie name for the session token.
pub const SESSION_COOKIE: &str = "degreedash_session";

/// Cookie name for the pending OAuth `state` value.
pub const OAUTH_STATE_COOKIE: &str = "degreedash_oauth_state";

/// OAuth state cookie Max-Age in seconds (10 minutes).
pub const OAUTH_STATE_EXP: i64 = 600;

fn build(name: &'static str, value: String, max_age: Duration, secure: bool) -> Cookie<'static> {
    Cookie::build((name, value))
        .path("/")
        .max_age(max_age)
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .build()
}

/// Set the session cookie on the jar.
///
/// ```
/// use axum_extra::extract::cookie::CookieJar;
/// use degreedash_auth_types::cookie::{set_session_cookie, SESSION_COOKIE};
///
/// let jar = set_session_cookie(CookieJar::new(), "token_value".to_string(), false);
/// let cookie = jar.get(SESSION_COOKIE).unwrap();
/// assert_eq!(cookie.value(), "token_value");
/// assert_eq!(cookie.path(), Some("/"));
/// assert_eq!(cookie.max_age(), Some(time::Duration::seconds(86400)));
/// assert!(cookie.http_only().unwrap_or(false));
/// assert!(!cookie.secure().unwrap_or(false));
/// ```
pub fn set_session_cookie(jar: CookieJar, value: String, secure: bool) -> CookieJar {
    jar.add(build(
        SESSION_COOKIE,
        value,
        Duration::seconds(SESSION_TOKEN_EXP as i64),
        secure,
    ))
}

/// Clear the session cookie by setting Max-Age to 0.
///
/// ```
/// use axum_extra::extract::cookie::CookieJar;
/// use degreedash_auth_types::cookie::{clear_session_cookie, set_session_cookie, SESSION_COOKIE};
///
/// let jar = set_session_cookie(CookieJar::new(), "t".to_string(), true);
/// let jar = clear_session_cookie(jar, true);
/// let cookie = jar.get(SESSION_COOKIE).unwrap();
/// assert_eq!(cookie.value(), "");
/// assert_eq!(cookie.max_age(), Some(time::Duration::ZERO));
/// assert!(cookie.secure().unwrap_or(false));
/// ```
pub fn clear_session_cookie(jar: CookieJar, secure: bool) -> CookieJar {
    jar.add(build(SESSION_COOKIE, String::new(), Duration::ZERO, secure))
}

/// Set the short-lived OAuth state cookie.
///
/// ```
/// use axum_extra::extract::cookie::CookieJar;
/// use degreedash_auth_types::cookie::{set_oauth_state_cookie, OAUTH_STATE_COOKIE};
///
/// let jar = set_oauth_state_cookie(CookieJar::new(), "abc".to_string(), false);
/// let cookie = jar.get(OAUTH_STATE_COOKIE).unwrap();
/// assert_eq!(cookie.value(), "abc");
/// assert_eq!(cookie.max_age(), Some(time::Duration::seconds(600)));
/// ```
pub fn set_oauth_state_cookie(jar: CookieJar, state: String, secure: bool) -> CookieJar {
    jar.add(build(
        OAUTH_STATE_COOKIE,
        state,
        Duration::seconds(OAUTH_STATE_EXP),
        secure,
    ))
}

/// Clear the OAuth state cookie once the callback has consumed it.
pub fn clear_oauth_state_cookie(jar: CookieJar, secure: bool) -> CookieJar {
    jar.add(build(OAUTH_STATE_COOKIE, String::new(), Duration::ZERO, secure))
}
