//! Cookie builders for the admin session token.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;

/// Cookie name for the session token.
pub const SESSION_COOKIE: &str = "token";

/// Session lifetime in seconds (24 hours). Used for both the JWT `exp` and the cookie Max-Age.
pub const SESSION_TOKEN_EXP: u64 = 86_400;

/// Set the session cookie on the jar.
///
/// `secure` is on in production only so the console still works over plain HTTP locally.
///
/// ```
/// use axum_extra::extract::cookie::{CookieJar, SameSite};
/// use signage_auth_types::cookie::{set_session_cookie, SESSION_COOKIE};
///
/// let jar = CookieJar::new();
/// let jar = set_session_cookie(jar, "token_value".to_string(), true);
/// let cookie = jar.get(SESSION_COOKIE).unwrap();
/// assert_eq!(cookie.value(), "token_value");
/// assert_eq!(cookie.path(), Some("/"));
/// assert_eq!(cookie.max_age(), Some(time::Duration::seconds(86400)));
/// assert_eq!(cookie.same_site(), Some(SameSite::Strict));
/// assert!(cookie.http_only().unwrap_or(false));
/// assert!(cookie.secure().unwrap_or(false));
/// ```
pub fn set_session_cookie(jar: CookieJar, value: String, secure: bool) -> CookieJar {
    jar.add(session_cookie(value, Duration::seconds(SESSION_TOKEN_EXP as i64), secure))
}

/// Overwrite the session cookie with an empty, already-expired one.
///
/// Clearing a jar that has no session cookie is not an error.
///
/// ```
/// use axum_extra::extract::cookie::CookieJar;
/// use signage_auth_types::cookie::{clear_session_cookie, set_session_cookie, SESSION_COOKIE};
///
/// let jar = set_session_cookie(CookieJar::new(), "t".to_string(), false);
/// let jar = clear_session_cookie(jar, false);
/// let cookie = jar.get(SESSION_COOKIE).unwrap();
/// assert_eq!(cookie.value(), "");
/// assert_eq!(cookie.max_age(), Some(time::Duration::ZERO));
/// ```
pub fn clear_session_cookie(jar: CookieJar, secure: bool) -> CookieJar {
    jar.add(session_cookie(String::new(), Duration::ZERO, secure))
}

fn session_cookie(value: String, max_age: Duration, secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, value))
        .path("/")
        .max_age(max_age)
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Strict)
        .build()
}
