//! AWS credentials.
//!
//! A client holds one set of credentials for its whole lifetime and passes
//! them unmodified to the signer on every call. Secrets are kept in
//! [`SecretString`] and never appear in `Debug` output.

mod env;

pub use env::{credentials_from_env, AWS_ACCESS_KEY_ID, AWS_SECRET_ACCESS_KEY, AWS_SESSION_TOKEN};
pub(crate) use env::credentials_from_lookup;

use secrecy::{ExposeSecret, SecretString};
use std::fmt;

/// Access key pair, plus a session token when the credentials are temporary.
#[derive(Clone)]
pub struct AwsCredentials {
    access_key_id: String,
    secret_access_key: SecretString,
    session_token: Option<SecretString>,
}

impl AwsCredentials {
    /// Long-term credentials.
    pub fn new(access_key_id: impl Into<String>, secret_access_key: impl Into<String>) -> Self {
        Self {
            access_key_id: access_key_id.into(),
            secret_access_key: SecretString::new(secret_access_key.into()),
            session_token: None,
        }
    }

    /// Temporary credentials, e.g. from STS.
    pub fn with_session_token(
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
        session_token: impl Into<String>,
    ) -> Self {
        Self {
            session_token: Some(SecretString::new(session_token.into())),
            ..Self::new(access_key_id, secret_access_key)
        }
    }

    /// The access key ID. Not secret, and safe to log.
    pub fn access_key_id(&self) -> &str {
        &self.access_key_id
    }

    /// The secret key. Only the signer should read this.
    pub fn secret_access_key(&self) -> &str {
        self.secret_access_key.expose_secret()
    }

    /// The session token sent as `x-amz-security-token`.
    pub fn session_token(&self) -> Option<&str> {
        self.session_token
            .as_ref()
            .map(|token| token.expose_secret().as_str())
    }

    /// Whether these are temporary credentials.
    pub fn is_temporary(&self) -> bool {
        self.session_token.is_some()
    }
}

impl fmt::Debug for AwsCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AwsCredentials")
            .field("access_key_id", &self.access_key_id)
            .field("temporary", &self.is_temporary())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_long_term() {
        let creds = AwsCredentials::new("AKID", "SECRET");
        assert_eq!(creds.access_key_id(), "AKID");
        assert_eq!(creds.secret_access_key(), "SECRET");
        assert_eq!(creds.session_token(), None);
        assert!(!creds.is_temporary());
    }

    #[test]
    fn test_temporary() {
        let creds = AwsCredentials::with_session_token("AKID", "SECRET", "TOKEN");
        assert_eq!(creds.secret_access_key(), "SECRET");
        assert_eq!(creds.session_token(), Some("TOKEN"));
        assert!(creds.is_temporary());
    }

    #[test]
    fn test_debug_hides_secrets() {
        let creds = AwsCredentials::with_session_token("AKID", "SECRET", "TOKEN");
        let debug = format!("{:?}", creds);

        assert!(debug.contains("AKID"));
        assert!(debug.contains("temporary: true"));
        assert!(!debug.contains("SECRET"));
        assert!(!debug.contains("TOKEN"));
    }
}
