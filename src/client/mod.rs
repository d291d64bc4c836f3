//! SNS client implementation.
//!
//! This module provides the main SNS client interface and builder. Every
//! operation is one parameter table run through the shared dispatch pipeline.

use crate::config::SnsConfig;
use crate::dispatch::Dispatcher;
use crate::error::SnsError;
use crate::request::{QueryParams, RequestBuilder};
use crate::signing::{AwsSigner, AwsSignerV4};
use crate::transport::{shared_transport, HttpTransport, ReqwestTransport};
use crate::types::*;
use serde::Serialize;
use std::sync::Arc;

/// SNS client.
///
/// Calls share nothing but the read-only configuration, so one client can
/// drive any number of concurrent requests.
pub struct SnsClient {
    config: Arc<SnsConfig>,
    dispatcher: Dispatcher,
}

impl SnsClient {
    /// Create a client for `host` with long-term credentials.
    ///
    /// One trailing slash on `host` is dropped. Without a transport the
    /// process-wide shared [`ReqwestTransport`] is used.
    pub fn new(
        host: impl Into<String>,
        transport: Option<Arc<dyn HttpTransport>>,
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
    ) -> Result<Self, SnsError> {
        let config = SnsConfig::builder()
            .host(host)
            .access_keys(access_key_id, secret_access_key)
            .build()?;

        let transport = match transport {
            Some(transport) => transport,
            None => shared_transport()? as Arc<dyn HttpTransport>,
        };

        Ok(Self::from_parts(config, transport, None))
    }

    /// Create a new client builder.
    pub fn builder() -> SnsClientBuilder {
        SnsClientBuilder::new()
    }

    fn from_parts(
        config: SnsConfig,
        transport: Arc<dyn HttpTransport>,
        signer: Option<Arc<dyn AwsSigner>>,
    ) -> Self {
        let signer = signer
            .unwrap_or_else(|| Arc::new(AwsSignerV4::new(&config.region)) as Arc<dyn AwsSigner>);
        let dispatcher = Dispatcher::new(
            RequestBuilder::new(&config.host),
            signer,
            transport,
            config.credentials.clone(),
        );

        Self {
            config: Arc::new(config),
            dispatcher,
        }
    }

    /// Get the client configuration.
    pub fn config(&self) -> &SnsConfig {
        &self.config
    }

    /// Publish a plain message to a topic or endpoint.
    pub async fn publish(&self, request: PublishRequest) -> Result<(), SnsError> {
        self.dispatcher.send("Publish", request.to_params()).await
    }

    /// Publish a structured message.
    ///
    /// The payload is serialized to JSON once and sent with
    /// `MessageStructure=json`. A payload that cannot be serialized fails
    /// before any request is built.
    pub async fn publish_json<T>(&self, message: &T, target: PublishTarget) -> Result<(), SnsError>
    where
        T: Serialize + ?Sized,
    {
        let json = serde_json::to_string(message).map_err(|e| SnsError::Serialization {
            message: e.to_string(),
        })?;

        self.publish(target.into_request(json)).await
    }

    /// Register a device token with a platform application.
    pub async fn create_platform_endpoint(
        &self,
        request: CreatePlatformEndpointRequest,
    ) -> Result<CreatePlatformEndpointOutput, SnsError> {
        self.dispatcher
            .fetch(
                "CreatePlatformEndpoint",
                request.to_params(),
                CreatePlatformEndpointOutput::from_xml,
            )
            .await
    }

    /// List one page of platform applications.
    pub async fn list_platform_applications(
        &self,
        request: ListPlatformApplicationsRequest,
    ) -> Result<PlatformApplications, SnsError> {
        self.dispatcher
            .fetch(
                "ListPlatformApplications",
                request.to_params(),
                PlatformApplications::from_xml,
            )
            .await
    }

    /// List one page of endpoints belonging to a platform application.
    pub async fn list_endpoints_by_platform_application(
        &self,
        request: ListEndpointsRequest,
    ) -> Result<PlatformApplicationEndpoints, SnsError> {
        self.dispatcher
            .fetch(
                "ListEndpointsByPlatformApplication",
                request.to_params(),
                PlatformApplicationEndpoints::from_xml,
            )
            .await
    }

    /// Delete an endpoint.
    pub async fn delete_endpoint(&self, endpoint_arn: impl Into<String>) -> Result<(), SnsError> {
        self.dispatcher
            .send("DeleteEndpoint", endpoint_params(endpoint_arn))
            .await
    }

    /// Read every attribute of an endpoint.
    pub async fn get_endpoint_attributes(
        &self,
        endpoint_arn: impl Into<String>,
    ) -> Result<EndpointAttributes, SnsError> {
        self.dispatcher
            .fetch(
                "GetEndpointAttributes",
                endpoint_params(endpoint_arn),
                EndpointAttributes::from_xml,
            )
            .await
    }

    /// Overwrite attributes of an endpoint.
    pub async fn set_endpoint_attributes(
        &self,
        request: SetEndpointAttributesRequest,
    ) -> Result<(), SnsError> {
        self.dispatcher
            .send("SetEndpointAttributes", request.to_params())
            .await
    }
}

fn endpoint_params(endpoint_arn: impl Into<String>) -> QueryParams {
    let mut params = QueryParams::new();
    params.insert("EndpointArn", endpoint_arn);
    params
}

impl std::fmt::Debug for SnsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SnsClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Builder for SNS client.
#[derive(Default)]
pub struct SnsClientBuilder {
    config: Option<SnsConfig>,
    from_env: bool,
    transport: Option<Arc<dyn HttpTransport>>,
    signer: Option<Arc<dyn AwsSigner>>,
}

impl SnsClientBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use the provided configuration.
    pub fn config(mut self, config: SnsConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Load configuration from environment variables.
    pub fn from_env(mut self) -> Self {
        self.from_env = true;
        self
    }

    /// Use a custom HTTP transport.
    pub fn transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Use a custom request signer.
    pub fn signer(mut self, signer: Arc<dyn AwsSigner>) -> Self {
        self.signer = Some(signer);
        self
    }

    /// Build the SNS client.
    pub fn build(self) -> Result<SnsClient, SnsError> {
        let config = if let Some(config) = self.config {
            config
        } else if self.from_env {
            SnsConfig::builder().from_env().build()?
        } else {
            SnsConfig::builder().build()?
        };

        let transport: Arc<dyn HttpTransport> = match self.transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::from_config(&config)?),
        };

        Ok(SnsClient::from_parts(config, transport, self.signer))
    }
}
