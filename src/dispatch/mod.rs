//! Request dispatch pipeline.
//!
//! Every SNS action runs through the same steps: build the query request,
//! sign it once, submit it to the transport once, classify the outcome and,
//! for read actions, decode the body. Nothing is retried; the first failure
//! ends the call.

use crate::credentials::AwsCredentials;
use crate::error::{classify, SnsError};
use crate::request::{QueryParams, RequestBuilder};
use crate::signing::AwsSigner;
use crate::transport::{HttpResponse, HttpTransport};
use crate::xml::{self, XmlDocument};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Runs actions against one host with one set of credentials.
pub struct Dispatcher {
    builder: RequestBuilder,
    signer: Arc<dyn AwsSigner>,
    transport: Arc<dyn HttpTransport>,
    credentials: AwsCredentials,
}

impl Dispatcher {
    /// Create a dispatcher.
    pub fn new(
        builder: RequestBuilder,
        signer: Arc<dyn AwsSigner>,
        transport: Arc<dyn HttpTransport>,
        credentials: AwsCredentials,
    ) -> Self {
        Self {
            builder,
            signer,
            transport,
            credentials,
        }
    }

    /// Run an action and return the raw response once it classifies as success.
    #[instrument(skip_all, fields(action = %action))]
    pub async fn execute(&self, action: &str, params: QueryParams) -> Result<HttpResponse, SnsError> {
        let request = self.builder.build(action, params);

        let signed = self
            .signer
            .sign(request, &self.credentials)
            .map_err(|e| {
                warn!(error = %e, "Request signing failed");
                SnsError::Signing(e)
            })?;

        debug!(host = %self.builder.host(), "Dispatching request");

        // Transport errors already carry their context and pass through as-is.
        let response = match self.transport.send(signed.into_http()).await {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "Transport failed");
                return Err(e);
            }
        };

        if let Some(error) = classify(Some(response.status), Some(&response.body), None) {
            warn!(status = response.status, error = %error, "Request failed");
            return Err(error);
        }

        debug!(
            status = response.status,
            request_id = response.request_id(),
            "Request succeeded"
        );
        Ok(response)
    }

    /// Run an action whose success body carries nothing of interest.
    pub async fn send(&self, action: &str, params: QueryParams) -> Result<(), SnsError> {
        self.execute(action, params).await.map(|_| ())
    }

    /// Run an action and decode its success body.
    pub async fn fetch<T, F>(&self, action: &str, params: QueryParams, decode: F) -> Result<T, SnsError>
    where
        F: FnOnce(&XmlDocument) -> Option<T>,
    {
        let response = self.execute(action, params).await?;
        decode_body(action, &response.body, decode)
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("host", &self.builder.host())
            .finish_non_exhaustive()
    }
}

/// Decode a success body, reporting any shape mismatch as a decode failure.
pub fn decode_body<T, F>(action: &str, body: &[u8], decode: F) -> Result<T, SnsError>
where
    F: FnOnce(&XmlDocument) -> Option<T>,
{
    let decode_error = |message: String| {
        warn!(action, %message, "Failed to decode response");
        SnsError::Decode {
            operation: action.to_string(),
            message,
        }
    };

    let text = std::str::from_utf8(body)
        .map_err(|e| decode_error(format!("body is not valid UTF-8: {}", e)))?;

    let doc = xml::parse(text).map_err(|e| decode_error(e.to_string()))?;

    decode(&doc).ok_or_else(|| decode_error("response is missing required elements".to_string()))
}
