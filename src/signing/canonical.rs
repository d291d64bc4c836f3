//! Canonical request construction.

use super::{is_signed_header, sha256_hex};
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::collections::BTreeMap;

/// Everything except RFC 3986 unreserved characters.
const QUERY_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Percent-encode a query parameter name or value.
///
/// The output is valid both on the wire and inside a canonical request.
pub fn uri_encode_query(value: &str) -> String {
    utf8_percent_encode(value, QUERY_SET).to_string()
}

fn reencode(raw: &str) -> String {
    uri_encode_query(&percent_decode_str(raw).decode_utf8_lossy())
}

/// Canonical form of an encoded query string: every pair decoded, re-encoded
/// with the unreserved set, and sorted by name then value.
pub fn canonical_query(query: &str) -> String {
    let mut pairs: Vec<(String, String)> = query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (name, value) = pair.split_once('=').unwrap_or((pair, ""));
            (reencode(name), reencode(value))
        })
        .collect();
    pairs.sort();

    pairs
        .into_iter()
        .map(|(name, value)| format!("{}={}", name, value))
        .collect::<Vec<_>>()
        .join("&")
}

/// A Signature V4 canonical request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalRequest {
    text: String,
    signed_headers: String,
}

impl CanonicalRequest {
    /// Build the canonical request for a body-less request.
    ///
    /// Only headers accepted by [`is_signed_header`] are included. Header
    /// names are lowercased, values have runs of whitespace collapsed, and
    /// repeated headers are joined with commas.
    pub fn new(
        method: &str,
        path: &str,
        query: &str,
        headers: &[(String, String)],
        payload_hash: &str,
    ) -> Self {
        let mut signed: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (name, value) in headers.iter().filter(|(name, _)| is_signed_header(name)) {
            let value = value.split_whitespace().collect::<Vec<_>>().join(" ");
            signed.entry(name.to_lowercase()).or_default().push(value);
        }

        let canonical_headers: String = signed
            .iter()
            .map(|(name, values)| format!("{}:{}\n", name, values.join(",")))
            .collect();
        let signed_headers = signed.keys().cloned().collect::<Vec<_>>().join(";");

        let path = if path.is_empty() { "/" } else { path };
        let text = format!(
            "{}\n{}\n{}\n{}\n{}\n{}",
            method.to_uppercase(),
            path,
            canonical_query(query),
            canonical_headers,
            signed_headers,
            payload_hash
        );

        Self {
            text,
            signed_headers,
        }
    }

    /// Semicolon-separated lowercase names of the signed headers.
    pub fn signed_headers(&self) -> &str {
        &self.signed_headers
    }

    /// The canonical request text.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Hex SHA-256 of the canonical request, as used in the string to sign.
    pub fn digest(&self) -> String {
        sha256_hex(self.text.as_bytes())
    }
}
