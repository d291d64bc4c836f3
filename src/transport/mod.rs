//! HTTP transport layer for SNS requests.
//!
//! The dispatcher hands every signed request to an [`HttpTransport`].
//! Connection pooling, timeouts and TLS are the transport's business; the
//! rest of the crate never retries and never imposes its own deadline.

use crate::config::SnsConfig;
use crate::error::{NetworkError, SnsError};
use async_trait::async_trait;
use bytes::Bytes;
use once_cell::sync::OnceCell;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

fn find_header<'a>(headers: &'a HashMap<String, String>, name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(name))
        .map(|(_, v)| v.as_str())
}

/// Outbound request.
///
/// SNS query requests carry every parameter in the URL, so there is no body.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// HTTP method.
    pub method: String,
    /// Request URL, including the encoded query string.
    pub url: String,
    /// Request headers.
    pub headers: HashMap<String, String>,
}

impl HttpRequest {
    /// Request with no headers.
    pub fn new(method: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            url: url.into(),
            headers: HashMap::new(),
        }
    }

    /// Set one header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Set several headers, replacing existing values.
    pub fn with_headers(mut self, headers: HashMap<String, String>) -> Self {
        self.headers.extend(headers);
        self
    }

    /// Header value, matched case-insensitively.
    pub fn get_header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }
}

/// Response as delivered by the transport, before classification.
#[derive(Debug)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response headers. Values that are not valid UTF-8 are dropped.
    pub headers: HashMap<String, String>,
    /// Raw response body.
    pub body: Bytes,
}

impl HttpResponse {
    /// Whether the status is in `200..=299`.
    pub fn is_success(&self) -> bool {
        (200..=299).contains(&self.status)
    }

    /// Header value, matched case-insensitively.
    pub fn get_header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }

    /// The `x-amzn-RequestId` header.
    pub fn request_id(&self) -> Option<&str> {
        self.get_header("x-amzn-requestid")
    }
}

/// Sends signed requests.
///
/// Implementations must be safe for concurrent use; a client may have many
/// requests in flight on the same transport. `send` is called exactly once
/// per operation.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Send the request and return whatever the server answered.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, SnsError>;
}

static SHARED_TRANSPORT: OnceCell<Arc<ReqwestTransport>> = OnceCell::new();

/// The process-wide transport used by [`SnsClient::new`](crate::SnsClient::new)
/// when no transport is supplied.
pub fn shared_transport() -> Result<Arc<ReqwestTransport>, SnsError> {
    SHARED_TRANSPORT
        .get_or_try_init(|| ReqwestTransport::new().map(Arc::new))
        .cloned()
}

/// [`HttpTransport`] backed by a pooled reqwest client.
pub struct ReqwestTransport {
    client: reqwest::Client,
    read_timeout: Duration,
}

impl ReqwestTransport {
    /// Transport with default settings.
    pub fn new() -> Result<Self, SnsError> {
        Self::builder().build()
    }

    /// Transport using the connection settings of `config`.
    pub fn from_config(config: &SnsConfig) -> Result<Self, SnsError> {
        Self::builder()
            .connect_timeout(config.connect_timeout)
            .read_timeout(config.read_timeout)
            .pool_max_idle_per_host(config.max_connections as usize)
            .pool_idle_timeout(Some(config.idle_timeout))
            .verify_ssl(config.verify_ssl)
            .build()
    }

    /// Transport builder.
    pub fn builder() -> ReqwestTransportBuilder {
        ReqwestTransportBuilder::default()
    }

    fn network_error(&self, error: reqwest::Error) -> SnsError {
        let error = if error.is_timeout() {
            NetworkError::Timeout {
                duration: self.read_timeout,
            }
        } else {
            NetworkError::ConnectionFailed {
                message: error.to_string(),
            }
        };
        SnsError::Network(error)
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, SnsError> {
        let method = reqwest::Method::from_bytes(request.method.as_bytes()).map_err(|e| {
            SnsError::Network(NetworkError::ConnectionFailed {
                message: format!("invalid HTTP method '{}': {}", request.method, e),
            })
        })?;

        let response = request
            .headers
            .iter()
            .fold(self.client.request(method, &request.url), |builder, (name, value)| {
                builder.header(name, value)
            })
            .send()
            .await
            .map_err(|e| self.network_error(e))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.to_string(), value.to_string()))
            })
            .collect();
        let body = response.bytes().await.map_err(|e| self.network_error(e))?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

impl std::fmt::Debug for ReqwestTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestTransport")
            .field("read_timeout", &self.read_timeout)
            .finish_non_exhaustive()
    }
}

/// Builder for [`ReqwestTransport`].
#[derive(Debug, Clone)]
pub struct ReqwestTransportBuilder {
    connect_timeout: Duration,
    read_timeout: Duration,
    pool_max_idle_per_host: usize,
    pool_idle_timeout: Option<Duration>,
    verify_ssl: bool,
    user_agent: String,
}

impl Default for ReqwestTransportBuilder {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(5),
            read_timeout: Duration::from_secs(30),
            pool_max_idle_per_host: 100,
            pool_idle_timeout: Some(Duration::from_secs(90)),
            verify_ssl: true,
            user_agent: format!("aws-sns-integration/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ReqwestTransportBuilder {
    /// Connection timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Overall request timeout, reported as [`NetworkError::Timeout`].
    pub fn read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }

    /// Idle connections kept per host.
    pub fn pool_max_idle_per_host(mut self, max: usize) -> Self {
        self.pool_max_idle_per_host = max;
        self
    }

    /// How long an idle connection is kept; `None` keeps it forever.
    pub fn pool_idle_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.pool_idle_timeout = timeout;
        self
    }

    /// Verify server certificates. Only disable against local test servers.
    pub fn verify_ssl(mut self, verify: bool) -> Self {
        self.verify_ssl = verify;
        self
    }

    /// `User-Agent` header value.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Build the transport.
    pub fn build(self) -> Result<ReqwestTransport, SnsError> {
        let client = reqwest::Client::builder()
            .connect_timeout(self.connect_timeout)
            .timeout(self.read_timeout)
            .pool_max_idle_per_host(self.pool_max_idle_per_host)
            .pool_idle_timeout(self.pool_idle_timeout)
            .danger_accept_invalid_certs(!self.verify_ssl)
            .user_agent(self.user_agent)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| {
                SnsError::Network(NetworkError::TlsError {
                    message: e.to_string(),
                })
            })?;

        Ok(ReqwestTransport {
            client,
            read_timeout: self.read_timeout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16, headers: &[(&str, &str)]) -> HttpResponse {
        HttpResponse {
            status,
            headers: headers
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            body: Bytes::new(),
        }
    }

    #[test]
    fn test_request_headers_are_case_insensitive() {
        let request = HttpRequest::new("POST", "https://sns.us-east-1.amazonaws.com?Action=Publish")
            .with_header("Content-Type", "application/json");

        assert_eq!(request.get_header("content-type"), Some("application/json"));
        assert_eq!(request.get_header("CONTENT-TYPE"), Some("application/json"));
        assert_eq!(request.get_header("accept"), None);
    }

    #[test]
    fn test_response_success_range() {
        assert!(response(200, &[]).is_success());
        assert!(response(299, &[]).is_success());
        assert!(!response(300, &[]).is_success());
        assert!(!response(403, &[]).is_success());
    }

    #[test]
    fn test_response_request_id() {
        let response = response(200, &[("x-amzn-RequestId", "ABC123")]);
        assert_eq!(response.request_id(), Some("ABC123"));
    }

    #[test]
    fn test_transport_from_config() {
        let config = SnsConfig::builder()
            .access_keys("AKID", "SECRET")
            .read_timeout(Duration::from_secs(60))
            .max_connections(10)
            .build()
            .unwrap();

        let transport = ReqwestTransport::from_config(&config).unwrap();
        assert_eq!(transport.read_timeout, Duration::from_secs(60));
    }

    #[test]
    fn test_shared_transport_is_reused() {
        let first = shared_transport().unwrap();
        let second = shared_transport().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }
}
