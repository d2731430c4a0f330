//! Request metadata derivation.
//!
//! # Responsibilities
//! - Reuse the inbound request ID or generate a UUID v4
//! - Pick the most specific client IP available
//! - Capture method, path and user agent for log decoration

use std::borrow::Cow;
use std::net::SocketAddr;

use axum::http::{header, HeaderMap, Method, Uri};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const X_REQUEST_ID: &str = "x-request-id";
pub const X_REAL_IP: &str = "x-real-ip";
pub const X_FORWARDED_FOR: &str = "x-forwarded-for";

/// Descriptive record of one inbound HTTP request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestMetadata {
    /// Unique identifier for the request.
    pub id: String,

    /// Best guess at the upstream client's IP.
    pub ip: String,

    /// HTTP method.
    pub method: String,

    /// Request path, without query string.
    pub path: String,

    /// User agent of the upstream client.
    #[serde(rename = "ua")]
    pub user_agent: String,
}

impl RequestMetadata {
    /// Derive metadata from request parts. `remote_addr` is the raw
    /// connection address, if the server recorded one.
    pub fn from_parts(
        headers: &HeaderMap,
        method: &Method,
        uri: &Uri,
        remote_addr: Option<SocketAddr>,
    ) -> Self {
        Self {
            id: request_id(headers),
            ip: real_ip(headers, remote_addr),
            method: method.as_str().to_string(),
            path: uri.path().to_string(),
            user_agent: header_value(headers, header::USER_AGENT.as_str())
                .map(Cow::into_owned)
                .unwrap_or_default(),
        }
    }
}

/// The inbound `X-Request-ID`, or a fresh UUID v4 if absent or empty.
pub fn request_id(headers: &HeaderMap) -> String {
    match header_value(headers, X_REQUEST_ID) {
        Some(id) => id.into_owned(),
        None => Uuid::new_v4().to_string(),
    }
}

/// Depending on the path through the network, the originating client's IP
/// can be in several places. Checked in order: `X-Real-Ip`,
/// `X-Forwarded-For` (taken verbatim), the connection address.
pub fn real_ip(headers: &HeaderMap, remote_addr: Option<SocketAddr>) -> String {
    if let Some(ip) = header_value(headers, X_REAL_IP) {
        return ip.into_owned();
    }
    if let Some(ip) = header_value(headers, X_FORWARDED_FOR) {
        return ip.into_owned();
    }
    remote_addr.map(|addr| addr.to_string()).unwrap_or_default()
}

/// First value of `name`, if present and non-empty. Non-ASCII bytes are
/// kept; invalid UTF-8 is replaced rather than discarding the whole value.
fn header_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<Cow<'a, str>> {
    headers
        .get(name)
        .map(|v| String::from_utf8_lossy(v.as_bytes()))
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (k, v) in pairs {
            map.insert(*k, HeaderValue::from_static(*v));
        }
        map
    }

    fn remote() -> Option<SocketAddr> {
        Some("10.1.2.3:54321".parse().unwrap())
    }

    #[test]
    fn test_ip_precedence() {
        let all = headers(&[(X_REAL_IP, "1.1.1.1"), (X_FORWARDED_FOR, "2.2.2.2, 3.3.3.3")]);
        assert_eq!(real_ip(&all, remote()), "1.1.1.1");

        let forwarded = headers(&[(X_FORWARDED_FOR, "2.2.2.2, 3.3.3.3")]);
        assert_eq!(real_ip(&forwarded, remote()), "2.2.2.2, 3.3.3.3");

        assert_eq!(real_ip(&HeaderMap::new(), remote()), "10.1.2.3:54321");
        assert_eq!(real_ip(&HeaderMap::new(), None), "");
    }

    #[test]
    fn test_empty_header_falls_through() {
        let map = headers(&[(X_REAL_IP, ""), (X_FORWARDED_FOR, "2.2.2.2")]);
        assert_eq!(real_ip(&map, remote()), "2.2.2.2");
    }

    #[test]
    fn test_request_id_reused_or_generated() {
        let map = headers(&[(X_REQUEST_ID, "abc-123")]);
        assert_eq!(request_id(&map), "abc-123");

        let generated = request_id(&HeaderMap::new());
        assert!(Uuid::parse_str(&generated).is_ok());
        assert_ne!(generated, request_id(&HeaderMap::new()));
    }

    #[test]
    fn test_from_parts() {
        let map = headers(&[("user-agent", "GoTest 1.1"), (X_REQUEST_ID, "46f7e63a")]);
        let uri: Uri = "http://example.com/test?q=1".parse().unwrap();

        let md = RequestMetadata::from_parts(&map, &Method::GET, &uri, remote());
        assert_eq!(
            md,
            RequestMetadata {
                id: "46f7e63a".into(),
                ip: "10.1.2.3:54321".into(),
                method: "GET".into(),
                path: "/test".into(),
                user_agent: "GoTest 1.1".into(),
            }
        );
    }

    #[test]
    fn test_non_ascii_values_are_kept() {
        let mut map = HeaderMap::new();
        map.insert("user-agent", HeaderValue::from_bytes("Mozilla/5.0 (Linux; Müller)".as_bytes()).unwrap());
        map.insert(X_REQUEST_ID, HeaderValue::from_bytes("req-é".as_bytes()).unwrap());
        map.insert(X_REAL_IP, HeaderValue::from_bytes("fe80::1%é".as_bytes()).unwrap());
        let uri: Uri = "/test".parse().unwrap();

        let md = RequestMetadata::from_parts(&map, &Method::GET, &uri, remote());
        assert_eq!(md.user_agent, "Mozilla/5.0 (Linux; Müller)");
        assert_eq!(md.id, "req-é");
        assert_eq!(md.ip, "fe80::1%é");

        // Latin-1 bytes are not valid UTF-8 but still yield a value.
        let mut latin1 = HeaderMap::new();
        latin1.insert(X_REQUEST_ID, HeaderValue::from_bytes(b"req-\xe9").unwrap());
        assert_eq!(request_id(&latin1), "req-\u{fffd}");
    }

    #[test]
    fn test_serialized_keys() {
        let value = serde_json::to_value(RequestMetadata::default()).unwrap();
        let mut keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["id", "ip", "method", "path", "ua"]);
    }
}
