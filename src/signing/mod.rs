//! AWS Signature V4 signing for SNS query requests.
//!
//! The client treats signing as a pluggable capability: anything implementing
//! [`AwsSigner`] can turn an [`UnsignedRequest`](crate::request::UnsignedRequest)
//! into a [`SignedRequest`]. [`AwsSignerV4`] is the default.
//!
//! SNS query requests never carry a body, so the payload hash is always the
//! hash of the empty string.

mod canonical;
mod signer;

pub use canonical::{canonical_query, uri_encode_query, CanonicalRequest};
pub use signer::{AwsSigner, AwsSignerV4, SignedRequest};

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};
use std::fmt;

type HmacSha256 = Hmac<Sha256>;

/// AWS Signature V4 algorithm identifier.
pub const AWS_ALGORITHM: &str = "AWS4-HMAC-SHA256";

/// Signing name of the SNS service.
pub const SNS_SERVICE: &str = "sns";

/// SHA-256 of the empty payload.
pub const EMPTY_PAYLOAD_SHA256: &str =
    "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

/// Lowercase hex SHA-256 digest.
pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

fn hmac_sha256(key: &[u8], data: &[u8]) -> Vec<u8> {
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC can take key of any size");
    mac.update(data);
    mac.finalize().into_bytes().to_vec()
}

/// `x-amz-date` value (`YYYYMMDD'T'HHMMSS'Z'`).
pub fn amz_date(timestamp: &DateTime<Utc>) -> String {
    timestamp.format("%Y%m%dT%H%M%SZ").to_string()
}

/// Headers covered by the signature: `host`, `content-type` and `x-amz-*`.
pub fn is_signed_header(name: &str) -> bool {
    name.eq_ignore_ascii_case("host")
        || name.eq_ignore_ascii_case("content-type")
        || name
            .get(..6)
            .map_or(false, |prefix| prefix.eq_ignore_ascii_case("x-amz-"))
}

/// The `{date}/{region}/{service}/aws4_request` scope a signature is valid for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialScope {
    date_stamp: String,
    region: String,
    service: String,
}

impl CredentialScope {
    /// Scope for the UTC day of `timestamp`.
    pub fn new(timestamp: &DateTime<Utc>, region: &str, service: &str) -> Self {
        Self {
            date_stamp: timestamp.format("%Y%m%d").to_string(),
            region: region.to_string(),
            service: service.to_string(),
        }
    }

    /// `YYYYMMDD` part of the scope.
    pub fn date_stamp(&self) -> &str {
        &self.date_stamp
    }

    /// Derive the signing key: `AWS4<secret>` chained through date, region,
    /// service and the `aws4_request` terminator.
    pub fn signing_key(&self, secret_access_key: &str) -> Vec<u8> {
        let seed = format!("AWS4{}", secret_access_key).into_bytes();
        [
            self.date_stamp.as_str(),
            self.region.as_str(),
            self.service.as_str(),
            "aws4_request",
        ]
        .iter()
        .fold(seed, |key, part| hmac_sha256(&key, part.as_bytes()))
    }

    /// Hex signature of `string_to_sign` under this scope.
    pub fn sign(&self, secret_access_key: &str, string_to_sign: &str) -> String {
        hex::encode(hmac_sha256(
            &self.signing_key(secret_access_key),
            string_to_sign.as_bytes(),
        ))
    }
}

impl fmt::Display for CredentialScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}/aws4_request",
            self.date_stamp, self.region, self.service
        )
    }
}
