//! Query request construction.
//!
//! Every SNS action is a `POST` to the configured host with all parameters in
//! the query string. [`QueryParams`] holds the per-call parameter table and
//! [`RequestBuilder`] turns it into an [`UnsignedRequest`].

use crate::signing::uri_encode_query;
use crate::transport::HttpRequest;
use std::collections::BTreeMap;

/// SNS API version sent with every request.
pub const API_VERSION: &str = "2010-03-31";

/// Content type sent with every request. SNS ignores it since there is no body.
pub const CONTENT_TYPE: &str = "application/json";

/// Parameter table for a single action.
///
/// Values are optional; a parameter whose value is absent or empty is never
/// sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    params: BTreeMap<String, Option<String>>,
}

impl QueryParams {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a parameter to a present value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.params.insert(name.into(), Some(value.into()));
    }

    /// Set a parameter that may be absent.
    pub fn insert_opt(&mut self, name: impl Into<String>, value: Option<impl Into<String>>) {
        self.params.insert(name.into(), value.map(Into::into));
    }

    /// Look up the raw value of a parameter.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.params.get(name).and_then(|v| v.as_deref())
    }

    /// Number of entries, including absent ones.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Whether the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Entries that will actually be sent, in name order.
    pub fn present(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().filter_map(|(name, value)| match value.as_deref() {
            Some(v) if !v.is_empty() => Some((name.as_str(), v)),
            _ => None,
        })
    }

    /// Encode the present entries as a query string.
    pub fn to_query_string(&self) -> String {
        self.present()
            .map(|(name, value)| format!("{}={}", uri_encode_query(name), uri_encode_query(value)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

impl<K, V> FromIterator<(K, Option<V>)> for QueryParams
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, Option<V>)>>(iter: I) -> Self {
        let mut params = QueryParams::new();
        for (name, value) in iter {
            params.insert_opt(name, value);
        }
        params
    }
}

/// A request that has been fully assembled but not yet signed.
#[derive(Debug, Clone)]
pub struct UnsignedRequest {
    request: HttpRequest,
}

impl UnsignedRequest {
    /// The HTTP method.
    pub fn method(&self) -> &str {
        &self.request.method
    }

    /// The target URL, including the query string.
    pub fn url(&self) -> &str {
        &self.request.url
    }

    /// The encoded query string.
    pub fn query(&self) -> &str {
        self.request
            .url
            .split_once('?')
            .map(|(_, q)| q)
            .unwrap_or("")
    }

    /// Borrow the underlying HTTP request.
    pub fn as_http(&self) -> &HttpRequest {
        &self.request
    }

    /// Consume into the underlying HTTP request.
    pub fn into_http(self) -> HttpRequest {
        self.request
    }
}

/// Builds unsigned query requests against a fixed host.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    host: String,
}

impl RequestBuilder {
    /// Create a builder for a host whose trailing slash is already stripped.
    pub fn new(host: impl Into<String>) -> Self {
        Self { host: host.into() }
    }

    /// The host requests are sent to.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Build the request for `action`.
    ///
    /// `Version` and `Action` are injected before filtering, overriding any
    /// caller-supplied value.
    pub fn build(&self, action: &str, mut params: QueryParams) -> UnsignedRequest {
        params.insert("Version", API_VERSION);
        params.insert("Action", action);

        let url = format!("{}?{}", self.host, params.to_query_string());
        let request = HttpRequest::new("POST", url).with_header("Content-Type", CONTENT_TYPE);

        UnsignedRequest { request }
    }
}
