use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use http::HeaderMap;

use crate::config::SessionConfig;

pub const REDIRECT_COOKIE: &str = "post_login_redirect";
pub const DEFAULT_REDIRECT: &str = "/account";

const SESSION_DAYS: i64 = 30;

/// Auth token issued by the commerce API for the current shopper.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
}

/// Token from the session cookie, falling back to a bearer header.
pub fn token_from(headers: &HeaderMap, jar: &CookieJar, config: &SessionConfig) -> Option<String> {
    jar.get(&config.cookie_name)
        .map(|c| c.value().to_string())
        .filter(|t| !t.is_empty())
        .or_else(|| {
            headers
                .get(http::header::AUTHORIZATION)
                .and_then(|h| h.to_str().ok())
                .and_then(|h| h.strip_prefix("Bearer "))
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
        })
}

pub fn session_cookie(config: &SessionConfig, token: String) -> Cookie<'static> {
    Cookie::build((config.cookie_name.clone(), token))
        .path("/")
        .http_only(true)
        .secure(config.cookie_secure)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::days(SESSION_DAYS))
        .build()
}

pub fn session_removal(config: &SessionConfig) -> Cookie<'static> {
    Cookie::build(config.cookie_name.clone()).path("/").build()
}

pub fn redirect_cookie(config: &SessionConfig, path: String) -> Cookie<'static> {
    Cookie::build((REDIRECT_COOKIE, path))
        .path("/")
        .http_only(true)
        .secure(config.cookie_secure)
        .same_site(SameSite::Lax)
        .build()
}

pub fn redirect_removal() -> Cookie<'static> {
    Cookie::build(REDIRECT_COOKIE).path("/").build()
}

/// Only same-origin absolute paths are followed after sign-in.
pub fn is_safe_redirect(path: &str) -> bool {
    path.starts_with('/') && !path.starts_with("//") && !path.contains('\\')
}
