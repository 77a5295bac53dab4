//! Canonical client address, the key for one-submission-per-source

use axum::http::HeaderMap;

fn header_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|h| h.to_str().ok())
        .filter(|v| !v.is_empty())
}

/// Resolve the address a request came from, honoring proxy headers.
///
/// Order: first entry of `X-Forwarded-For`, then `X-Real-IP`, then the
/// transport peer with its port suffix removed. The result is treated as an
/// opaque string and is not validated.
pub fn client_address(headers: &HeaderMap, peer: &str) -> String {
    if let Some(forwarded) = header_value(headers, "x-forwarded-for") {
        let first = forwarded.split(',').next().unwrap_or_default();
        return first.trim().to_string();
    }

    if let Some(real_ip) = header_value(headers, "x-real-ip") {
        return real_ip.to_string();
    }

    match peer.rfind(':') {
        Some(idx) => peer[..idx].to_string(),
        None => peer.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(*name, HeaderValue::from_static(value));
        }
        map
    }

    #[test]
    fn test_forwarded_for_takes_first_entry() {
        let h = headers(&[
            ("x-forwarded-for", "203.0.113.9, 10.0.0.2, 10.0.0.3"),
            ("x-real-ip", "10.0.0.2"),
        ]);
        assert_eq!(client_address(&h, "127.0.0.1:4000"), "203.0.113.9");

        let h = headers(&[("x-forwarded-for", "198.51.100.4")]);
        assert_eq!(client_address(&h, "127.0.0.1:4000"), "198.51.100.4");
    }

    #[test]
    fn test_real_ip_used_without_forwarded_for() {
        let h = headers(&[("x-real-ip", "198.51.100.7")]);
        assert_eq!(client_address(&h, "127.0.0.1:4000"), "198.51.100.7");
    }

    #[test]
    fn test_empty_headers_fall_through() {
        let h = headers(&[("x-forwarded-for", ""), ("x-real-ip", "")]);
        assert_eq!(client_address(&h, "192.0.2.1:51000"), "192.0.2.1");
    }

    #[test]
    fn test_peer_port_stripped() {
        let h = HeaderMap::new();
        assert_eq!(client_address(&h, "192.0.2.1:51000"), "192.0.2.1");
        assert_eq!(client_address(&h, "[::1]:8080"), "[::1]");
        assert_eq!(client_address(&h, "unix-socket"), "unix-socket");
    }
}
