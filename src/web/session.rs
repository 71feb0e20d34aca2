//! Theme preference carried in a session cookie
//!
//! The cookie has no `Max-Age`, so it lives as long as the browser session.
//! Every other filter is read fresh from the query string.

use crate::core::theme::Theme;
use axum::http::header::COOKIE;
use axum::http::{HeaderMap, HeaderValue};

pub const THEME_COOKIE: &str = "macrodash_theme";

fn theme_from_cookie(headers: &HeaderMap) -> Option<Theme> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == THEME_COOKIE)
        .and_then(|(_, value)| value.parse().ok())
}

/// Theme for this request and whether it was changed by the request.
///
/// An explicit `dark` query value wins (the last one, since the form sends a
/// hidden `off` before the checkbox), then the session cookie, then dark.
pub fn resolve_theme(headers: &HeaderMap, pairs: &[(String, String)]) -> (Theme, bool) {
    let requested = pairs
        .iter()
        .rev()
        .find(|(key, _)| key == "dark")
        .and_then(|(_, value)| Theme::from_dark_flag(value));
    match requested {
        Some(theme) => (theme, true),
        None => (theme_from_cookie(headers).unwrap_or_default(), false),
    }
}

pub fn theme_cookie(theme: Theme) -> HeaderValue {
    HeaderValue::from_static(match theme {
        Theme::Dark => "macrodash_theme=dark; Path=/; SameSite=Lax; HttpOnly",
        Theme::Light => "macrodash_theme=light; Path=/; SameSite=Lax; HttpOnly",
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_query_wins_and_last_value_counts() {
        let headers = HeaderMap::new();
        assert_eq!(
            resolve_theme(&headers, &pairs(&[("dark", "off"), ("dark", "on")])),
            (Theme::Dark, true)
        );
        assert_eq!(
            resolve_theme(&headers, &pairs(&[("dark", "off")])),
            (Theme::Light, true)
        );
    }

    #[test]
    fn test_cookie_persists_theme() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("other=1; macrodash_theme=light"));
        assert_eq!(resolve_theme(&headers, &[]), (Theme::Light, false));
        assert_eq!(resolve_theme(&HeaderMap::new(), &[]), (Theme::Dark, false));
    }

    #[test]
    fn test_cookie_value_round_trips() {
        let mut headers = HeaderMap::new();
        let cookie = theme_cookie(Theme::Light);
        let pair = cookie.to_str().unwrap().split(';').next().unwrap().to_string();
        headers.insert(COOKIE, HeaderValue::from_str(&pair).unwrap());
        assert_eq!(theme_from_cookie(&headers), Some(Theme::Light));
    }
}
