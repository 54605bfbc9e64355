//! Captured request header set.

use log::debug;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use crate::config::TRANSPORT_MANAGED_HEADERS;

/// HTTP headers replayed on every search request.
///
/// Built from captured name/value pairs. Transport-managed headers (`host`,
/// `content-length`, `connection`, `accept-encoding`) and HTTP/2 pseudo headers
/// are dropped, as are pairs that are not valid HTTP header tokens. A later
/// pair with the same name replaces an earlier one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeaderSet {
    headers: HeaderMap,
}

impl HeaderSet {
    /// Builds a set from captured name/value pairs, skipping headers that
    /// cannot or must not be replayed. A later duplicate replaces an earlier one.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut headers = HeaderMap::new();
        for (name, value) in pairs {
            let name = name.as_ref().trim().to_ascii_lowercase();
            if name.is_empty()
                || name.starts_with(':')
                || TRANSPORT_MANAGED_HEADERS.contains(&name.as_str())
            {
                continue;
            }
            let Ok(header_name) = HeaderName::from_bytes(name.as_bytes()) else {
                debug!("Skipping captured header with invalid name {:?}", name);
                continue;
            };
            let Ok(header_value) = HeaderValue::from_str(value.as_ref()) else {
                debug!("Skipping captured header {} with invalid value", name);
                continue;
            };
            headers.insert(header_name, header_value);
        }
        Self { headers }
    }

    /// Value of `name` (case-insensitive), if present and valid UTF-8.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Number of headers.
    pub fn len(&self) -> usize {
        self.headers.len()
    }

    /// Whether no header survived filtering.
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    /// Header names, for logging without leaking values.
    pub fn names(&self) -> Vec<&str> {
        self.headers.keys().map(|k| k.as_str()).collect()
    }

    /// Headers in the form `reqwest` sends.
    pub fn header_map(&self) -> &HeaderMap {
        &self.headers
    }
}
