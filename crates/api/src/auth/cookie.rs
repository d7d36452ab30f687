//! Session cookie construction and parsing.
//!
//! The session JWT travels in an HTTP-only `token` cookie so that browser
//! scripts can never read it. `SameSite=Strict` keeps the cookie off
//! cross-site requests; the `Secure` attribute is added behind HTTPS via
//! [`crate::config::ServerConfig::cookie_secure`]. Non-browser clients may
//! send the same token as an `Authorization: Bearer` header instead.

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "token";

/// Build the `Set-Cookie` value that establishes a session.
pub fn session_cookie(token: &str, max_age_secs: i64, secure: bool) -> String {
    let mut cookie =
        format!("{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Strict; Max-Age={max_age_secs}");
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// Build the `Set-Cookie` value that clears the session (logout).
///
/// `Max-Age=0` instructs the browser to drop the cookie immediately.
pub fn clear_session_cookie(secure: bool) -> String {
    let mut cookie = format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Strict; Max-Age=0");
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// Extract the session token from a raw `Cookie` request header value.
///
/// The header carries `name=value` pairs separated by `"; "`. Returns the
/// value of the `token` cookie, or `None` when absent.
pub fn token_from_cookie_header(header: &str) -> Option<&str> {
    header.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == SESSION_COOKIE).then_some(value)
    })
}
