//! The `access_token` session cookie.
//!
//! Page requests from a browser carry the access token in an `HttpOnly`
//! cookie set by the auth endpoints; API clients send a Bearer header
//! instead.

use axum::http::header::COOKIE;
use axum::http::HeaderMap;

/// Name of the cookie holding the access token.
pub const ACCESS_TOKEN_COOKIE: &str = "access_token";

/// `Set-Cookie` value storing `token` for `max_age_secs`.
pub fn session_cookie(token: &str, max_age_secs: i64, secure: bool) -> String {
    let mut cookie = format!(
        "{ACCESS_TOKEN_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={max_age_secs}"
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// `Set-Cookie` value that removes the session cookie.
pub fn clear_session_cookie(secure: bool) -> String {
    session_cookie("", 0, secure)
}

/// Value of the cookie `name` in the request's `Cookie` headers.
pub fn read_cookie<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|header| header.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    #[test]
    fn session_cookie_attributes() {
        let cookie = session_cookie("abc", 3600, true);
        assert_eq!(
            cookie,
            "access_token=abc; Path=/; HttpOnly; SameSite=Lax; Max-Age=3600; Secure"
        );
        assert!(!session_cookie("abc", 60, false).contains("Secure"));
    }

    #[test]
    fn clearing_cookie_expires_immediately() {
        assert!(clear_session_cookie(false).starts_with("access_token=; "));
        assert!(clear_session_cookie(false).contains("Max-Age=0"));
    }

    #[test]
    fn reads_named_cookie_among_others() {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_static("theme=dark; access_token=tok123; lang=fr"),
        );
        assert_eq!(read_cookie(&headers, ACCESS_TOKEN_COOKIE), Some("tok123"));
        assert_eq!(read_cookie(&headers, "missing"), None);
    }

    #[test]
    fn empty_cookie_reads_as_absent() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("access_token="));
        assert_eq!(read_cookie(&headers, ACCESS_TOKEN_COOKIE), None);
    }
}
