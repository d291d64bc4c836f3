//! Response types for SNS operations.
//!
//! Each type decodes from a parsed response document. Decoding is total over
//! well-formed success bodies and yields `None` when any required element is
//! missing; nothing is defaulted.

use crate::xml::{XmlDocument, XmlNode};
use std::collections::HashMap;

fn request_id(doc: &XmlDocument, response: &str) -> Option<String> {
    doc.text_at(&[response, "ResponseMetadata", "RequestId"])
        .filter(|id| !id.is_empty())
        .map(str::to_string)
}

fn next_token(result: &XmlNode) -> Option<String> {
    result
        .text_at(&["NextToken"])
        .filter(|token| !token.is_empty())
        .map(str::to_string)
}

/// Decode an `Attributes/entry` list. Every entry needs both `key` and `value`;
/// a repeated key keeps the last value.
fn decode_entries(attributes: &XmlNode) -> Option<HashMap<String, String>> {
    attributes
        .all(&["entry"])
        .into_iter()
        .map(|entry| {
            let key = entry.text_at(&["key"])?;
            let value = entry.text_at(&["value"])?;
            Some((key.to_string(), value.to_string()))
        })
        .collect()
}

/// Response from CreatePlatformEndpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePlatformEndpointOutput {
    /// ARN of the created (or already existing) endpoint.
    pub endpoint_arn: String,
    /// AWS request ID.
    pub request_id: Option<String>,
}

impl CreatePlatformEndpointOutput {
    const RESPONSE: &'static str = "CreatePlatformEndpointResponse";

    /// Decode from a response document.
    pub fn from_xml(doc: &XmlDocument) -> Option<Self> {
        let endpoint_arn = doc.text_at(&[
            Self::RESPONSE,
            "CreatePlatformEndpointResult",
            "EndpointArn",
        ])?;

        Some(Self {
            endpoint_arn: endpoint_arn.to_string(),
            request_id: request_id(doc, Self::RESPONSE),
        })
    }
}

/// One page of platform applications.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformApplications {
    /// Continuation token when more pages exist.
    pub next_token: Option<String>,
    /// Platform application ARNs on this page.
    pub application_arns: Vec<String>,
    /// AWS request ID.
    pub request_id: Option<String>,
}

impl PlatformApplications {
    const RESPONSE: &'static str = "ListPlatformApplicationsResponse";

    /// Decode from a response document.
    pub fn from_xml(doc: &XmlDocument) -> Option<Self> {
        let result = doc.get(&[Self::RESPONSE, "ListPlatformApplicationsResult"])?;
        let applications = result.child("PlatformApplications")?;

        let application_arns = applications
            .all(&["member"])
            .into_iter()
            .map(|member| member.text_at(&["PlatformApplicationArn"]).map(str::to_string))
            .collect::<Option<Vec<_>>>()?;

        Some(Self {
            next_token: next_token(result),
            application_arns,
            request_id: request_id(doc, Self::RESPONSE),
        })
    }
}

/// A registered device endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    /// Endpoint ARN.
    pub arn: String,
    /// Whether the endpoint accepts deliveries.
    pub enabled: bool,
    /// Device registration token.
    pub token: String,
    /// Every attribute returned for the endpoint, including `Enabled` and `Token`.
    pub attributes: HashMap<String, String>,
}

impl Endpoint {
    /// Decode from a `member` element of an endpoint listing.
    pub fn from_xml(member: &XmlNode) -> Option<Self> {
        let arn = member.text_at(&["EndpointArn"])?;
        let attributes = decode_entries(member.child("Attributes")?)?;
        let enabled = attributes.get("Enabled")? == "true";
        let token = attributes.get("Token")?.clone();

        Some(Self {
            arn: arn.to_string(),
            enabled,
            token,
            attributes,
        })
    }
}

/// One page of endpoints for a platform application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformApplicationEndpoints {
    /// Continuation token when more pages exist.
    pub next_token: Option<String>,
    /// Endpoints on this page.
    pub endpoints: Vec<Endpoint>,
    /// AWS request ID.
    pub request_id: Option<String>,
}

impl PlatformApplicationEndpoints {
    const RESPONSE: &'static str = "ListEndpointsByPlatformApplicationResponse";

    /// Decode from a response document.
    pub fn from_xml(doc: &XmlDocument) -> Option<Self> {
        let result = doc.get(&[Self::RESPONSE, "ListEndpointsByPlatformApplicationResult"])?;

        let endpoints = result
            .child("Endpoints")?
            .all(&["member"])
            .into_iter()
            .map(Endpoint::from_xml)
            .collect::<Option<Vec<_>>>()?;

        Some(Self {
            next_token: next_token(result),
            endpoints,
            request_id: request_id(doc, Self::RESPONSE),
        })
    }
}

/// Attributes of a single endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointAttributes {
    /// Attribute name to value.
    pub attributes: HashMap<String, String>,
    /// AWS request ID.
    pub request_id: Option<String>,
}

impl EndpointAttributes {
    const RESPONSE: &'static str = "GetEndpointAttributesResponse";

    /// Decode from a response document.
    pub fn from_xml(doc: &XmlDocument) -> Option<Self> {
        let attributes = doc.get(&[
            Self::RESPONSE,
            "GetEndpointAttributesResult",
            "Attributes",
        ])?;

        Some(Self {
            attributes: decode_entries(attributes)?,
            request_id: request_id(doc, Self::RESPONSE),
        })
    }

    /// Look up one attribute.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// The `Enabled` attribute, if present.
    pub fn enabled(&self) -> Option<bool> {
        self.get("Enabled").map(|v| v == "true")
    }

    /// The `Token` attribute, if present.
    pub fn token(&self) -> Option<&str> {
        self.get("Token")
    }
}
