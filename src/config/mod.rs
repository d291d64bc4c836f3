//! Configuration types for the SNS client.
//!
//! This module provides the `SnsConfig` type: the host requests are sent to,
//! the signing region, credentials, and settings for the default transport.
//! A config is immutable once built and shared by every call a client makes.

use crate::credentials::{self, AwsCredentials};
use crate::error::{ConfigurationError, SnsError};
use std::time::Duration;
use url::Url;

/// Region used when none is configured and none can be read from the host.
pub const DEFAULT_REGION: &str = "us-east-1";

/// Configuration for the SNS client.
#[derive(Clone)]
pub struct SnsConfig {
    /// Base URL with any trailing slash removed.
    pub host: String,

    /// AWS region used for signing (e.g., "us-west-2").
    pub region: String,

    /// Credentials passed to the signer on every call.
    pub credentials: AwsCredentials,

    /// Connection timeout for the default transport.
    pub connect_timeout: Duration,

    /// Read timeout for the default transport.
    pub read_timeout: Duration,

    /// Maximum idle connections per host for the default transport.
    pub max_connections: u32,

    /// Idle connection timeout for the default transport.
    pub idle_timeout: Duration,

    /// Verify SSL certificates.
    pub verify_ssl: bool,
}

impl std::fmt::Debug for SnsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SnsConfig")
            .field("host", &self.host)
            .field("region", &self.region)
            .field("connect_timeout", &self.connect_timeout)
            .field("read_timeout", &self.read_timeout)
            .field("max_connections", &self.max_connections)
            .field("idle_timeout", &self.idle_timeout)
            .field("verify_ssl", &self.verify_ssl)
            // Intentionally omit credentials
            .finish_non_exhaustive()
    }
}

impl SnsConfig {
    /// Create a new configuration builder.
    pub fn builder() -> SnsConfigBuilder {
        SnsConfigBuilder::default()
    }

    /// Default public endpoint for a region.
    pub fn endpoint_for_region(region: &str) -> String {
        format!("https://sns.{}.amazonaws.com", region)
    }
}

/// Strip one trailing slash, as the host is joined directly with `?query`.
pub fn normalize_host(host: &str) -> String {
    host.strip_suffix('/').unwrap_or(host).to_string()
}

/// Read the region out of a `sns.<region>.amazonaws.com` style host.
pub fn region_from_host(host: &Url) -> Option<String> {
    let name = host.host_str()?;
    let mut labels = name.split('.');
    if labels.next()? != "sns" {
        return None;
    }
    let region = labels.next()?;
    if labels.next()? != "amazonaws" {
        return None;
    }
    Some(region.to_string())
}

fn validate_host(host: &str) -> Result<Url, SnsError> {
    let url = Url::parse(host).map_err(|e| {
        SnsError::Configuration(ConfigurationError::InvalidEndpoint {
            url: host.to_string(),
            details: e.to_string(),
        })
    })?;

    if url.host_str().is_none() {
        return Err(SnsError::Configuration(ConfigurationError::InvalidEndpoint {
            url: host.to_string(),
            details: "URL has no host".to_string(),
        }));
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(SnsError::Configuration(ConfigurationError::InvalidEndpoint {
            url: host.to_string(),
            details: "URL must not carry a query or fragment".to_string(),
        }));
    }

    Ok(url)
}

/// Builder for SNS configuration.
#[derive(Default)]
pub struct SnsConfigBuilder {
    host: Option<String>,
    region: Option<String>,
    credentials: Option<AwsCredentials>,
    connect_timeout: Option<Duration>,
    read_timeout: Option<Duration>,
    max_connections: Option<u32>,
    idle_timeout: Option<Duration>,
    verify_ssl: Option<bool>,
}

impl SnsConfigBuilder {
    /// Create a new builder with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the host URL (e.g., `https://sns.us-west-2.amazonaws.com/`).
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Set the signing region.
    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Set the credentials.
    pub fn credentials(mut self, credentials: AwsCredentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Set long-term credentials from an access key pair.
    pub fn access_keys(
        self,
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
    ) -> Self {
        self.credentials(AwsCredentials::new(access_key_id, secret_access_key))
    }

    /// Set the connection timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Set the read timeout.
    pub fn read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = Some(timeout);
        self
    }

    /// Set the maximum idle connections per host.
    pub fn max_connections(mut self, connections: u32) -> Self {
        self.max_connections = Some(connections);
        self
    }

    /// Set the idle connection timeout.
    pub fn idle_timeout(mut self, timeout: Duration) -> Self {
        self.idle_timeout = Some(timeout);
        self
    }

    /// Enable or disable SSL verification.
    pub fn verify_ssl(mut self, verify: bool) -> Self {
        self.verify_ssl = Some(verify);
        self
    }

    /// Load configuration from environment variables.
    ///
    /// Values already set on the builder are overwritten by variables that
    /// are present.
    pub fn from_env(self) -> Self {
        self.from_lookup(|name| std::env::var(name).ok())
    }

    pub(crate) fn from_lookup<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(region) = lookup("AWS_REGION").or_else(|| lookup("AWS_DEFAULT_REGION")) {
            self.region = Some(region);
        }

        if let Some(endpoint) =
            lookup("AWS_ENDPOINT_URL_SNS").or_else(|| lookup("AWS_ENDPOINT_URL"))
        {
            self.host = Some(endpoint);
        }

        if let Some(creds) = credentials::credentials_from_lookup(&lookup) {
            self.credentials = Some(creds);
        }

        self
    }

    /// Build the configuration.
    pub fn build(self) -> Result<SnsConfig, SnsError> {
        let credentials = self
            .credentials
            .ok_or(SnsError::Configuration(ConfigurationError::MissingCredentials))?;

        let (host, url) = match self.host {
            Some(host) => {
                let host = normalize_host(&host);
                let url = validate_host(&host)?;
                (host, url)
            }
            None => {
                let region = self.region.as_deref().unwrap_or(DEFAULT_REGION);
                let host = SnsConfig::endpoint_for_region(region);
                let url = validate_host(&host)?;
                (host, url)
            }
        };

        let region = self
            .region
            .or_else(|| region_from_host(&url))
            .unwrap_or_else(|| DEFAULT_REGION.to_string());

        if region.is_empty() {
            return Err(SnsError::Configuration(
                ConfigurationError::InvalidConfiguration {
                    field: "region".to_string(),
                    message: "region must not be empty".to_string(),
                },
            ));
        }

        Ok(SnsConfig {
            host,
            region,
            credentials,
            connect_timeout: self.connect_timeout.unwrap_or(Duration::from_secs(5)),
            read_timeout: self.read_timeout.unwrap_or(Duration::from_secs(30)),
            max_connections: self.max_connections.unwrap_or(100),
            idle_timeout: self.idle_timeout.unwrap_or(Duration::from_secs(90)),
            verify_ssl: self.verify_ssl.unwrap_or(true),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn builder() -> SnsConfigBuilder {
        SnsConfig::builder().access_keys("AKID", "SECRET")
    }

    #[test]
    fn test_trailing_slash_stripped_once() {
        let config = builder()
            .host("https://sns.us-west-2.amazonaws.com/")
            .build()
            .unwrap();
        assert_eq!(config.host, "https://sns.us-west-2.amazonaws.com");

        let config = builder().host("http://localhost:9911/sns//").build().unwrap();
        assert_eq!(config.host, "http://localhost:9911/sns/");
    }

    #[test]
    fn test_region_derived_from_host() {
        let config = builder()
            .host("https://sns.eu-central-1.amazonaws.com")
            .build()
            .unwrap();
        assert_eq!(config.region, "eu-central-1");
    }

    #[test]
    fn test_explicit_region_wins() {
        let config = builder()
            .host("https://sns.eu-central-1.amazonaws.com")
            .region("us-west-2")
            .build()
            .unwrap();
        assert_eq!(config.region, "us-west-2");
    }

    #[test]
    fn test_default_host_from_region() {
        let config = builder().region("ap-southeast-2").build().unwrap();
        assert_eq!(config.host, "https://sns.ap-southeast-2.amazonaws.com");

        let config = builder().build().unwrap();
        assert_eq!(config.host, "https://sns.us-east-1.amazonaws.com");
        assert_eq!(config.region, DEFAULT_REGION);
    }

    #[test]
    fn test_custom_host_falls_back_to_default_region() {
        let config = builder().host("http://localhost:4566").build().unwrap();
        assert_eq!(config.region, DEFAULT_REGION);
    }

    #[test]
    fn test_invalid_host() {
        let result = builder().host("not a url").build();
        assert!(matches!(
            result,
            Err(SnsError::Configuration(ConfigurationError::InvalidEndpoint { .. }))
        ));

        let result = builder().host("https://sns.example.com/?x=1").build();
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_credentials() {
        let result = SnsConfig::builder().build();
        assert!(matches!(
            result,
            Err(SnsError::Configuration(ConfigurationError::MissingCredentials))
        ));
    }

    #[test]
    fn test_from_lookup() {
        let vars: HashMap<&str, &str> = [
            ("AWS_REGION", "us-west-2"),
            ("AWS_ENDPOINT_URL_SNS", "http://localhost:4566/"),
            ("AWS_ACCESS_KEY_ID", "AKID"),
            ("AWS_SECRET_ACCESS_KEY", "SECRET"),
        ]
        .into_iter()
        .collect();

        let config = SnsConfig::builder()
            .from_lookup(|name| vars.get(name).map(|v| v.to_string()))
            .build()
            .unwrap();

        assert_eq!(config.host, "http://localhost:4566");
        assert_eq!(config.region, "us-west-2");
        assert_eq!(config.credentials.access_key_id(), "AKID");
    }

    #[test]
    fn test_debug_omits_credentials() {
        let config = builder().build().unwrap();
        let debug = format!("{:?}", config);
        assert!(!debug.contains("SECRET"));
        assert!(!debug.contains("AKID"));
    }
}
