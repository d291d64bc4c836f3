//! Credentials from environment variables.

use super::AwsCredentials;
use std::env;

/// Access key ID variable.
pub const AWS_ACCESS_KEY_ID: &str = "AWS_ACCESS_KEY_ID";
/// Secret access key variable.
pub const AWS_SECRET_ACCESS_KEY: &str = "AWS_SECRET_ACCESS_KEY";
/// Session token variable, set for temporary credentials.
pub const AWS_SESSION_TOKEN: &str = "AWS_SESSION_TOKEN";

/// Load credentials from the standard AWS environment variables.
///
/// Returns `None` unless both `AWS_ACCESS_KEY_ID` and `AWS_SECRET_ACCESS_KEY`
/// are set to non-empty values. `AWS_SESSION_TOKEN` is optional.
pub fn credentials_from_env() -> Option<AwsCredentials> {
    credentials_from_lookup(|name| env::var(name).ok())
}

pub(crate) fn credentials_from_lookup<F>(lookup: F) -> Option<AwsCredentials>
where
    F: Fn(&str) -> Option<String>,
{
    let non_empty = |name: &str| lookup(name).filter(|v| !v.is_empty());

    let access_key_id = non_empty(AWS_ACCESS_KEY_ID)?;
    let secret_access_key = non_empty(AWS_SECRET_ACCESS_KEY)?;

    Some(match non_empty(AWS_SESSION_TOKEN) {
        Some(token) => AwsCredentials::with_session_token(access_key_id, secret_access_key, token),
        None => AwsCredentials::new(access_key_id, secret_access_key),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_long_term_credentials() {
        let creds = credentials_from_lookup(lookup(&[
            (AWS_ACCESS_KEY_ID, "AKID"),
            (AWS_SECRET_ACCESS_KEY, "SECRET"),
        ]))
        .unwrap();

        assert_eq!(creds.access_key_id(), "AKID");
        assert!(!creds.is_temporary());
    }

    #[test]
    fn test_session_token() {
        let creds = credentials_from_lookup(lookup(&[
            (AWS_ACCESS_KEY_ID, "AKID"),
            (AWS_SECRET_ACCESS_KEY, "SECRET"),
            (AWS_SESSION_TOKEN, "TOKEN"),
        ]))
        .unwrap();

        assert_eq!(creds.session_token(), Some("TOKEN"));
    }

    #[test]
    fn test_missing_or_empty_values() {
        assert!(credentials_from_lookup(lookup(&[(AWS_ACCESS_KEY_ID, "AKID")])).is_none());
        assert!(credentials_from_lookup(lookup(&[
            (AWS_ACCESS_KEY_ID, ""),
            (AWS_SECRET_ACCESS_KEY, "SECRET"),
        ]))
        .is_none());
    }
}
