//! Mock implementations for testing.
//!
//! This module provides a recording transport, a recording signer and canned
//! SNS response bodies.

mod signer;
mod transport;

pub use signer::{MockSigner, SignRecord};
pub use transport::{MockResponse, MockResponseBuilder, MockTransport};

use crate::types::*;

/// Test fixtures for SNS operations.
pub struct TestFixtures;

impl TestFixtures {
    /// Platform application ARN used across fixtures.
    pub const APPLICATION_ARN: &'static str =
        "arn:aws:sns:us-west-2:123456789012:app/APNS_SANDBOX/Test";

    /// Endpoint ARN used across fixtures.
    pub const ENDPOINT_ARN: &'static str =
        "arn:aws:sns:us-west-2:123456789012:endpoint/APNS_SANDBOX/Test/1";

    /// Create a sample publish request for testing.
    pub fn sample_publish_request() -> PublishRequest {
        PublishRequest::new("hello")
            .with_subject("greeting")
            .with_topic_arn("arn:aws:sns:us-west-2:123456789012:updates")
    }

    /// Create a sample endpoint registration for testing.
    pub fn sample_create_endpoint_request() -> CreatePlatformEndpointRequest {
        CreatePlatformEndpointRequest::new("225EF46104D58C43", Self::APPLICATION_ARN)
            .with_custom_user_data("user-1")
    }

    /// Sample XML for a CreatePlatformEndpoint response.
    pub fn create_platform_endpoint_xml() -> &'static str {
        r#"<CreatePlatformEndpointResponse xmlns="http://sns.amazonaws.com/doc/2010-03-31/">
  <CreatePlatformEndpointResult>
    <EndpointArn>arn:aws:sns:us-west-2:123456789012:endpoint/APNS_SANDBOX/Test/1</EndpointArn>
  </CreatePlatformEndpointResult>
  <ResponseMetadata>
    <RequestId>req-create-endpoint</RequestId>
  </ResponseMetadata>
</CreatePlatformEndpointResponse>"#
    }

    /// Sample XML for a ListPlatformApplications response with a second page.
    pub fn list_platform_applications_xml() -> &'static str {
        r#"<ListPlatformApplicationsResponse xmlns="http://sns.amazonaws.com/doc/2010-03-31/">
  <ListPlatformApplicationsResult>
    <PlatformApplications>
      <member>
        <PlatformApplicationArn>arn:aws:sns:us-west-2:123456789012:app/APNS_SANDBOX/Test</PlatformApplicationArn>
        <Attributes>
          <entry><key>AppleCertificateExpiryDate</key><value>2027-01-01T00:00:00Z</value></entry>
        </Attributes>
      </member>
      <member>
        <PlatformApplicationArn>arn:aws:sns:us-west-2:123456789012:app/GCM/Android</PlatformApplicationArn>
        <Attributes/>
      </member>
    </PlatformApplications>
    <NextToken>page-2</NextToken>
  </ListPlatformApplicationsResult>
  <ResponseMetadata>
    <RequestId>req-list-apps</RequestId>
  </ResponseMetadata>
</ListPlatformApplicationsResponse>"#
    }

    /// Sample XML for a ListEndpointsByPlatformApplication response.
    pub fn list_endpoints_xml() -> &'static str {
        r#"<ListEndpointsByPlatformApplicationResponse xmlns="http://sns.amazonaws.com/doc/2010-03-31/">
  <ListEndpointsByPlatformApplicationResult>
    <Endpoints>
      <member>
        <EndpointArn>arn:aws:sns:us-west-2:123456789012:endpoint/APNS_SANDBOX/Test/1</EndpointArn>
        <Attributes>
          <entry><key>Enabled</key><value>true</value></entry>
          <entry><key>Token</key><value>225EF46104D58C43</value></entry>
          <entry><key>CustomUserData</key><value>user-1</value></entry>
        </Attributes>
      </member>
      <member>
        <EndpointArn>arn:aws:sns:us-west-2:123456789012:endpoint/APNS_SANDBOX/Test/2</EndpointArn>
        <Attributes>
          <entry><key>Enabled</key><value>false</value></entry>
          <entry><key>Token</key><value>9A3185CB9D441784</value></entry>
        </Attributes>
      </member>
    </Endpoints>
  </ListEndpointsByPlatformApplicationResult>
  <ResponseMetadata>
    <RequestId>req-list-endpoints</RequestId>
  </ResponseMetadata>
</ListEndpointsByPlatformApplicationResponse>"#
    }

    /// Sample XML for a GetEndpointAttributes response.
    pub fn get_endpoint_attributes_xml() -> &'static str {
        r#"<GetEndpointAttributesResponse xmlns="http://sns.amazonaws.com/doc/2010-03-31/">
  <GetEndpointAttributesResult>
    <Attributes>
      <entry><key>Enabled</key><value>true</value></entry>
      <entry><key>Token</key><value>225EF46104D58C43</value></entry>
      <entry><key>CustomUserData</key><value></value></entry>
    </Attributes>
  </GetEndpointAttributesResult>
  <ResponseMetadata>
    <RequestId>req-get-attributes</RequestId>
  </ResponseMetadata>
</GetEndpointAttributesResponse>"#
    }

    /// Sample XML for a Publish response.
    pub fn publish_xml() -> &'static str {
        r#"<PublishResponse xmlns="http://sns.amazonaws.com/doc/2010-03-31/">
  <PublishResult>
    <MessageId>94f20ce6-13c5-43a0-9a9e-ca52d816e90b</MessageId>
  </PublishResult>
  <ResponseMetadata>
    <RequestId>req-publish</RequestId>
  </ResponseMetadata>
</PublishResponse>"#
    }

    /// Sample XML for a service error response.
    pub fn error_xml(code: &str, message: &str) -> String {
        format!(
            r#"<ErrorResponse xmlns="http://sns.amazonaws.com/doc/2010-03-31/">
  <Error>
    <Type>Sender</Type>
    <Code>{}</Code>
    <Message>{}</Message>
  </Error>
  <RequestId>req-error</RequestId>
</ErrorResponse>"#,
            code, message
        )
    }
}
