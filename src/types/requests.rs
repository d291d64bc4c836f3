//! Request types for SNS operations.
//!
//! Each request knows how to lay itself out as a [`QueryParams`] table for its
//! action.

use crate::request::QueryParams;
use std::collections::BTreeMap;

/// Message structure value that makes SNS treat `Message` as per-protocol JSON.
pub const MESSAGE_STRUCTURE_JSON: &str = "json";

/// Request to publish a message to a topic or endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublishRequest {
    /// Message body.
    pub message: String,
    /// Subject line for email endpoints.
    pub subject: Option<String>,
    /// Target endpoint ARN.
    pub target_arn: Option<String>,
    /// Target topic ARN.
    pub topic_arn: Option<String>,
    /// Message structure, `json` for per-protocol messages.
    pub message_structure: Option<String>,
}

impl PublishRequest {
    /// Create a new publish request.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Self::default()
        }
    }

    /// Set the subject.
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Set the target endpoint ARN.
    pub fn with_target_arn(mut self, target_arn: impl Into<String>) -> Self {
        self.target_arn = Some(target_arn.into());
        self
    }

    /// Set the topic ARN.
    pub fn with_topic_arn(mut self, topic_arn: impl Into<String>) -> Self {
        self.topic_arn = Some(topic_arn.into());
        self
    }

    /// Set the message structure.
    pub fn with_message_structure(mut self, structure: impl Into<String>) -> Self {
        self.message_structure = Some(structure.into());
        self
    }

    /// Parameter table for the `Publish` action.
    pub fn to_params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params.insert("Message", self.message.as_str());
        params.insert_opt("Subject", self.subject.as_deref());
        params.insert_opt("TargetArn", self.target_arn.as_deref());
        params.insert_opt("TopicArn", self.topic_arn.as_deref());
        params.insert_opt("MessageStructure", self.message_structure.as_deref());
        params
    }
}

/// Addressing for a structured (per-protocol JSON) publish.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublishTarget {
    /// Subject line for email endpoints.
    pub subject: Option<String>,
    /// Target endpoint ARN.
    pub target_arn: Option<String>,
    /// Target topic ARN.
    pub topic_arn: Option<String>,
}

impl PublishTarget {
    /// Publish to a topic.
    pub fn topic(topic_arn: impl Into<String>) -> Self {
        Self {
            topic_arn: Some(topic_arn.into()),
            ..Self::default()
        }
    }

    /// Publish directly to an endpoint.
    pub fn endpoint(target_arn: impl Into<String>) -> Self {
        Self {
            target_arn: Some(target_arn.into()),
            ..Self::default()
        }
    }

    /// Set the subject.
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Combine with serialized JSON text into a publish request.
    pub fn into_request(self, json: String) -> PublishRequest {
        PublishRequest {
            message: json,
            subject: self.subject,
            target_arn: self.target_arn,
            topic_arn: self.topic_arn,
            message_structure: Some(MESSAGE_STRUCTURE_JSON.to_string()),
        }
    }
}

/// Request to register a device token with a platform application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePlatformEndpointRequest {
    /// Device token.
    pub token: String,
    /// Platform application ARN.
    pub platform_application_arn: String,
    /// Arbitrary user data stored with the endpoint.
    pub custom_user_data: Option<String>,
}

impl CreatePlatformEndpointRequest {
    /// Create a new request.
    pub fn new(token: impl Into<String>, platform_application_arn: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            platform_application_arn: platform_application_arn.into(),
            custom_user_data: None,
        }
    }

    /// Set custom user data.
    pub fn with_custom_user_data(mut self, data: impl Into<String>) -> Self {
        self.custom_user_data = Some(data.into());
        self
    }

    /// Parameter table for the `CreatePlatformEndpoint` action.
    pub fn to_params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params.insert("Token", self.token.as_str());
        params.insert("PlatformApplicationArn", self.platform_application_arn.as_str());
        params.insert_opt("CustomUserData", self.custom_user_data.as_deref());
        params
    }
}

/// Request for one page of platform applications.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListPlatformApplicationsRequest {
    /// Continuation token from a previous page.
    pub next_token: Option<String>,
}

impl ListPlatformApplicationsRequest {
    /// Request the first page.
    pub fn new() -> Self {
        Self::default()
    }

    /// Continue from a previous page.
    pub fn with_next_token(mut self, token: impl Into<String>) -> Self {
        self.next_token = Some(token.into());
        self
    }

    /// Parameter table for the `ListPlatformApplications` action.
    pub fn to_params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params.insert_opt("NextToken", self.next_token.as_deref());
        params
    }
}

/// Request for one page of endpoints belonging to a platform application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEndpointsRequest {
    /// Platform application ARN.
    pub platform_application_arn: String,
    /// Continuation token from a previous page.
    pub next_token: Option<String>,
}

impl ListEndpointsRequest {
    /// Request the first page.
    pub fn new(platform_application_arn: impl Into<String>) -> Self {
        Self {
            platform_application_arn: platform_application_arn.into(),
            next_token: None,
        }
    }

    /// Continue from a previous page.
    pub fn with_next_token(mut self, token: impl Into<String>) -> Self {
        self.next_token = Some(token.into());
        self
    }

    /// Parameter table for the `ListEndpointsByPlatformApplication` action.
    pub fn to_params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params.insert("PlatformApplicationArn", self.platform_application_arn.as_str());
        params.insert_opt("NextToken", self.next_token.as_deref());
        params
    }
}

/// Request to replace attributes on an endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetEndpointAttributesRequest {
    /// Endpoint ARN.
    pub endpoint_arn: String,
    /// Attributes to set, flattened in key order.
    pub attributes: BTreeMap<String, String>,
}

impl SetEndpointAttributesRequest {
    /// Create a request with no attributes.
    pub fn new(endpoint_arn: impl Into<String>) -> Self {
        Self {
            endpoint_arn: endpoint_arn.into(),
            attributes: BTreeMap::new(),
        }
    }

    /// Add an attribute.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Add several attributes.
    pub fn with_attributes<I, K, V>(mut self, attributes: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.attributes
            .extend(attributes.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Parameter table for the `SetEndpointAttributes` action.
    ///
    /// Attributes become `Attributes.entry.N.key` / `Attributes.entry.N.value`
    /// with `N` starting at 1.
    pub fn to_params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params.insert("EndpointArn", self.endpoint_arn.as_str());
        for (index, (key, value)) in self.attributes.iter().enumerate() {
            let n = index + 1;
            params.insert(format!("Attributes.entry.{}.key", n), key.as_str());
            params.insert(format!("Attributes.entry.{}.value", n), value.as_str());
        }
        params
    }
}
