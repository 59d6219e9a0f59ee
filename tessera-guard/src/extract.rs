//! Token and identity extraction from request headers and cookies.

use http::HeaderMap;
use http::header::COOKIE;

/// Read a value from the named header, falling back to the named cookie when
/// the header is absent or empty.
///
/// Returns `None` when neither source yields a non-empty value. Values are
/// read as UTF-8; bytes that are not valid UTF-8 count as absent.
pub fn header_or_cookie(
    headers: &HeaderMap,
    header: Option<&str>,
    cookie: Option<&str>,
) -> Option<String> {
    if let Some(value) = header.and_then(|name| header_value(headers, name)) {
        return Some(value.to_string());
    }

    cookie
        .and_then(|name| cookie_value(headers, name))
        .map(str::to_string)
}

/// Non-empty value of the first header called `name`.
pub fn header_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| std::str::from_utf8(v.as_bytes()).ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

/// Non-empty value of the first cookie called `name`, across every `Cookie`
/// header on the request.
pub fn cookie_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| std::str::from_utf8(v.as_bytes()).ok())
        .flat_map(|line| line.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| key.trim() == name)
        .map(|(_, value)| unquote(value.trim()))
        .filter(|v| !v.is_empty())
}

fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.append(*name, HeaderValue::from_static(*value));
        }
        map
    }

    #[test]
    fn test_header_wins_over_cookie() {
        let map = headers(&[("x-csrf", "from-header"), ("cookie", "csrf=from-cookie")]);
        assert_eq!(
            header_or_cookie(&map, Some("X-CSRF"), Some("csrf")).as_deref(),
            Some("from-header")
        );
    }

    #[test]
    fn test_empty_header_falls_back_to_cookie() {
        let map = headers(&[("x-csrf", ""), ("cookie", "csrf=from-cookie")]);
        assert_eq!(
            header_or_cookie(&map, Some("x-csrf"), Some("csrf")).as_deref(),
            Some("from-cookie")
        );
    }

    #[test]
    fn test_missing_everywhere() {
        let map = headers(&[("cookie", "other=1")]);
        assert_eq!(header_or_cookie(&map, Some("x-csrf"), Some("csrf")), None);
        assert_eq!(header_or_cookie(&map, None, None), None);
    }

    #[test]
    fn test_cookie_parsing() {
        let map = headers(&[
            ("cookie", "a=1; session = abc ; empty="),
            ("cookie", "csrf=\"quoted==\"; b=2"),
        ]);
        assert_eq!(cookie_value(&map, "a"), Some("1"));
        assert_eq!(cookie_value(&map, "session"), Some("abc"));
        assert_eq!(cookie_value(&map, "csrf"), Some("quoted=="));
        assert_eq!(cookie_value(&map, "b"), Some("2"));
        assert_eq!(cookie_value(&map, "empty"), None);
        assert_eq!(cookie_value(&map, "missing"), None);
    }

    #[test]
    fn test_cookie_value_keeps_base64_padding() {
        let map = headers(&[("cookie", "csrf=AAAA-_8=; s=x")]);
        assert_eq!(cookie_value(&map, "csrf"), Some("AAAA-_8="));
    }

    #[test]
    fn test_utf8_values() {
        let mut map = HeaderMap::new();
        map.insert("x-session", HeaderValue::from_bytes("jürgen".as_bytes()).unwrap());
        map.insert("cookie", HeaderValue::from_bytes("s=zoë; t=1".as_bytes()).unwrap());
        assert_eq!(header_value(&map, "x-session"), Some("jürgen"));
        assert_eq!(cookie_value(&map, "s"), Some("zoë"));
    }

    #[test]
    fn test_non_utf8_value_is_absent() {
        let mut map = HeaderMap::new();
        map.insert("x-session", HeaderValue::from_bytes(b"\xff\xfe").unwrap());
        map.insert("cookie", HeaderValue::from_bytes(b"s=\xff").unwrap());
        assert_eq!(header_value(&map, "x-session"), None);
        assert_eq!(cookie_value(&map, "s"), None);
    }

    #[test]
    fn test_invalid_header_name_is_absent() {
        let map = headers(&[("x-csrf", "v")]);
        assert_eq!(header_value(&map, "not a header"), None);
    }
}
