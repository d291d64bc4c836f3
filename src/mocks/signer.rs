//! Mock signer for testing.

use crate::credentials::AwsCredentials;
use crate::error::SigningError;
use crate::request::UnsignedRequest;
use crate::signing::{AwsSigner, SignedRequest};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

/// A request as the signer saw it.
#[derive(Debug, Clone)]
pub struct SignRecord {
    /// HTTP method.
    pub method: String,
    /// Full request URL.
    pub url: String,
    /// Access key the request was signed with.
    pub access_key_id: String,
}

/// Mock signer that adds fixed headers and records each call.
pub struct MockSigner {
    headers: HashMap<String, String>,
    error: Option<SigningError>,
    sign_count: AtomicUsize,
    records: Mutex<Vec<SignRecord>>,
}

impl MockSigner {
    /// Create a new mock signer.
    pub fn new() -> Self {
        let headers = [
            (
                "authorization",
                "AWS4-HMAC-SHA256 Credential=mock/20240115/us-west-2/sns/aws4_request",
            ),
            ("x-amz-date", "20240115T100000Z"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        Self {
            headers,
            error: None,
            sign_count: AtomicUsize::new(0),
            records: Mutex::new(Vec::new()),
        }
    }

    /// Create a mock signer that rejects every request.
    pub fn with_error(error: SigningError) -> Self {
        Self {
            headers: HashMap::new(),
            error: Some(error),
            sign_count: AtomicUsize::new(0),
            records: Mutex::new(Vec::new()),
        }
    }

    /// Number of sign calls.
    pub fn sign_count(&self) -> usize {
        self.sign_count.load(Ordering::SeqCst)
    }

    /// Last request handed to the signer.
    pub fn last_sign_request(&self) -> Option<SignRecord> {
        self.records.lock().last().cloned()
    }
}

impl Default for MockSigner {
    fn default() -> Self {
        Self::new()
    }
}

impl AwsSigner for MockSigner {
    fn sign(
        &self,
        request: UnsignedRequest,
        credentials: &AwsCredentials,
    ) -> Result<SignedRequest, SigningError> {
        self.sign_count.fetch_add(1, Ordering::SeqCst);
        self.records.lock().push(SignRecord {
            method: request.method().to_string(),
            url: request.url().to_string(),
            access_key_id: credentials.access_key_id().to_string(),
        });

        if let Some(error) = &self.error {
            return Err(error.clone());
        }

        let request = request.into_http().with_headers(self.headers.clone());
        Ok(SignedRequest::new(request))
    }
}

impl std::fmt::Debug for MockSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockSigner")
            .field("sign_count", &self.sign_count())
            .field("fails", &self.error.is_some())
            .finish()
    }
}
