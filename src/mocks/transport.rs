//! Mock HTTP transport for testing.

use crate::error::{NetworkError, SnsError};
use crate::transport::{HttpRequest, HttpResponse, HttpTransport};
use async_trait::async_trait;
use bytes::Bytes;
use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};

/// Mock HTTP response.
#[derive(Debug, Clone)]
pub struct MockResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response headers.
    pub headers: HashMap<String, String>,
    /// Response body.
    pub body: Bytes,
}

impl MockResponse {
    /// Create a response with the given status and body.
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body: body.into(),
        }
    }

    /// Create a successful response with empty body.
    pub fn ok() -> Self {
        Self::new(200, Bytes::new())
    }

    /// Create a successful response with body.
    pub fn ok_with_body(body: impl Into<Bytes>) -> Self {
        Self::new(200, body)
    }

    /// Create an error response.
    pub fn error(status: u16, body: impl Into<Bytes>) -> Self {
        Self::new(status, body)
    }

    /// Add a header to the response.
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }
}

/// Builder for mock transports.
#[derive(Default)]
pub struct MockResponseBuilder {
    responses: Vec<MockResponse>,
}

impl MockResponseBuilder {
    /// Create a new mock response builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a response to return.
    pub fn respond(mut self, response: MockResponse) -> Self {
        self.responses.push(response);
        self
    }

    /// Build the mock transport.
    pub fn build(self) -> MockTransport {
        MockTransport::with_responses(self.responses)
    }
}

/// Mock HTTP transport that records every request it receives.
#[derive(Default)]
pub struct MockTransport {
    responses: Mutex<VecDeque<MockResponse>>,
    requests: Mutex<Vec<HttpRequest>>,
    default_response: Option<MockResponse>,
    error: Option<NetworkError>,
}

impl MockTransport {
    /// Create a new mock transport with no responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock transport with queued responses.
    pub fn with_responses(responses: Vec<MockResponse>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            ..Self::default()
        }
    }

    /// Create a mock transport with a default response.
    pub fn with_default(response: MockResponse) -> Self {
        Self {
            default_response: Some(response),
            ..Self::default()
        }
    }

    /// Create a mock transport that fails every request.
    pub fn with_error(error: NetworkError) -> Self {
        Self {
            error: Some(error),
            ..Self::default()
        }
    }

    /// Create a builder for the mock transport.
    pub fn builder() -> MockResponseBuilder {
        MockResponseBuilder::new()
    }

    /// Queue a response to return.
    pub fn queue_response(&self, response: MockResponse) {
        self.responses.lock().push_back(response);
    }

    /// Get all recorded requests.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().clone()
    }

    /// Get the number of requests made.
    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }

    /// Get the last request made.
    pub fn last_request(&self) -> Option<HttpRequest> {
        self.requests.lock().last().cloned()
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, SnsError> {
        self.requests.lock().push(request);

        if let Some(error) = &self.error {
            return Err(SnsError::Network(error.clone()));
        }

        let response = self
            .responses
            .lock()
            .pop_front()
            .or_else(|| self.default_response.clone());

        match response {
            Some(mock) => Ok(HttpResponse {
                status: mock.status,
                headers: mock.headers,
                body: mock.body,
            }),
            None => Err(SnsError::Network(NetworkError::ConnectionFailed {
                message: "No mock response available".to_string(),
            })),
        }
    }
}

impl std::fmt::Debug for MockTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockTransport")
            .field("queued_responses", &self.responses.lock().len())
            .field("recorded_requests", &self.requests.lock().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_responses_are_returned_in_order() {
        let transport = MockTransport::builder()
            .respond(MockResponse::ok_with_body("first"))
            .respond(MockResponse::error(500, "second"))
            .build();

        let first = transport
            .send(HttpRequest::new("POST", "https://example.com"))
            .await
            .unwrap();
        let second = transport
            .send(HttpRequest::new("POST", "https://example.com"))
            .await
            .unwrap();

        assert_eq!(first.body, Bytes::from("first"));
        assert_eq!(second.status, 500);
        assert_eq!(transport.request_count(), 2);
    }

    #[tokio::test]
    async fn test_exhausted_queue_fails() {
        let transport = MockTransport::new();
        let result = transport
            .send(HttpRequest::new("POST", "https://example.com"))
            .await;

        assert!(matches!(result, Err(SnsError::Network(_))));
        assert_eq!(transport.request_count(), 1);
    }

    #[tokio::test]
    async fn test_default_response_repeats() {
        let transport =
            MockTransport::with_default(MockResponse::ok().with_header("x-amzn-RequestId", "r1"));

        for _ in 0..3 {
            let response = transport
                .send(HttpRequest::new("POST", "https://example.com"))
                .await
                .unwrap();
            assert_eq!(response.request_id(), Some("r1"));
        }
    }

    #[tokio::test]
    async fn test_injected_error() {
        let transport = MockTransport::with_error(NetworkError::ConnectionFailed {
            message: "refused".to_string(),
        });
        transport.queue_response(MockResponse::ok());

        let result = transport
            .send(HttpRequest::new("POST", "https://example.com"))
            .await;
        assert!(matches!(
            result,
            Err(SnsError::Network(NetworkError::ConnectionFailed { .. }))
        ));
        assert_eq!(
            transport.last_request().map(|r| r.url),
            Some("https://example.com".to_string())
        );
    }
}
