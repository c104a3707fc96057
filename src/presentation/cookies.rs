//! Session cookies. Both tokens travel as HttpOnly, SameSite=Strict cookies
//! scoped to `/`; `Secure` is added in production.

use crate::application::auth::tokens::{RefreshedAccess, SessionTokens};
use crate::infrastructure::config::AppConfig;
use axum::http::{HeaderMap, HeaderName, header};
use axum::response::AppendHeaders;

pub const ACCESS_COOKIE: &str = "accessToken";
pub const REFRESH_COOKIE: &str = "refreshToken";
/// Single-token cookie set by older clients; only ever cleared.
pub const LEGACY_COOKIE: &str = "jwt";

pub fn set_cookie(name: &str, value: &str, max_age: i64, secure: bool) -> String {
    let mut cookie = format!("{name}={value}; HttpOnly; SameSite=Strict; Path=/; Max-Age={max_age}");
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

pub fn clear_cookie(name: &str, secure: bool) -> String {
    set_cookie(name, "", 0, secure)
}

/// Value of the named cookie across all `Cookie` headers.
pub fn read_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.to_string())
        .filter(|value| !value.is_empty())
}

pub fn session_cookies(
    config: &AppConfig,
    session: &SessionTokens,
) -> AppendHeaders<[(HeaderName, String); 2]> {
    let secure = config.secure_cookies();
    AppendHeaders([
        (
            header::SET_COOKIE,
            set_cookie(ACCESS_COOKIE, &session.access_token, session.access_expires_in, secure),
        ),
        (
            header::SET_COOKIE,
            set_cookie(
                REFRESH_COOKIE,
                &session.refresh_token,
                session.refresh_expires_in,
                secure,
            ),
        ),
    ])
}

pub fn access_cookie(
    config: &AppConfig,
    refreshed: &RefreshedAccess,
) -> AppendHeaders<[(HeaderName, String); 1]> {
    AppendHeaders([(
        header::SET_COOKIE,
        set_cookie(
            ACCESS_COOKIE,
            &refreshed.access_token,
            refreshed.access_expires_in,
            config.secure_cookies(),
        ),
    )])
}

pub fn cleared_cookies(config: &AppConfig) -> AppendHeaders<[(HeaderName, String); 3]> {
    let secure = config.secure_cookies();
    AppendHeaders([
        (header::SET_COOKIE, clear_cookie(ACCESS_COOKIE, secure)),
        (header::SET_COOKIE, clear_cookie(REFRESH_COOKIE, secure)),
        (header::SET_COOKIE, clear_cookie(LEGACY_COOKIE, secure)),
    ])
}
