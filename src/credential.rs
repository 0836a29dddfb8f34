//! Caller credentials.

use crate::error::{OauthError, Result};

/// Credential material for signing: the consumer key/secret pair handed out
/// by the service, plus the optional access token/secret pair obtained
/// through the three-legged handshake (which this crate does not perform).
///
/// The `Debug` implementation redacts both secrets to prevent accidental
/// leakage in logs.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    api_key: Option<String>,
    shared_secret: Option<String>,
    access_token: Option<String>,
    access_secret: Option<String>,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key)
            .field("shared_secret", &self.shared_secret.as_ref().map(|_| "****"))
            .field("access_token", &self.access_token)
            .field("access_secret", &self.access_secret.as_ref().map(|_| "****"))
            .finish()
    }
}

impl Credentials {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API key (a.k.a. the OAuth consumer key).
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Alias for [`Credentials::api_key`]: some services hand the same
    /// value out under the name "consumer key". Fills `api_key` only when
    /// it is still unset.
    pub fn consumer_key(mut self, key: impl Into<String>) -> Self {
        if self.api_key.is_none() {
            self.api_key = Some(key.into());
        }
        self
    }

    /// Sets the shared (consumer) secret.
    pub fn shared_secret(mut self, secret: impl Into<String>) -> Self {
        self.shared_secret = Some(secret.into());
        self
    }

    /// Sets the access token obtained from the service.
    pub fn access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    /// Sets the secret paired with the access token.
    pub fn access_secret(mut self, secret: impl Into<String>) -> Self {
        self.access_secret = Some(secret.into());
        self
    }

    pub fn get_api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    pub fn get_shared_secret(&self) -> Option<&str> {
        self.shared_secret.as_deref()
    }

    pub fn get_access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    pub fn get_access_secret(&self) -> Option<&str> {
        self.access_secret.as_deref()
    }

    /// Validates that the credential set is complete enough to sign with.
    ///
    /// `api_key` and `shared_secret` are mandatory. The access token/secret
    /// pair is optional but must be complete: either one without the other
    /// is a configuration error.
    pub fn validate(&self) -> Result<()> {
        if self.api_key.is_none() {
            return Err(OauthError::Config(
                "missing required api_key (consumer_key)".to_string(),
            ));
        }
        if self.shared_secret.is_none() {
            return Err(OauthError::Config(
                "missing required shared_secret".to_string(),
            ));
        }
        if self.access_token.is_some() && self.access_secret.is_none() {
            return Err(OauthError::Config(
                "missing access_secret for supplied access_token".to_string(),
            ));
        }
        if self.access_secret.is_some() && self.access_token.is_none() {
            return Err(OauthError::Config(
                "missing access_token for supplied access_secret".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_pair_validates() {
        let credentials = Credentials::new().api_key("k").shared_secret("s");
        assert!(credentials.validate().is_ok());
    }

    #[test]
    fn full_set_validates() {
        let credentials = Credentials::new()
            .api_key("k")
            .shared_secret("s")
            .access_token("t")
            .access_secret("ts");
        assert!(credentials.validate().is_ok());
    }

    #[test]
    fn consumer_key_aliases_api_key() {
        let credentials = Credentials::new().consumer_key("ck").shared_secret("s");
        assert_eq!(credentials.get_api_key(), Some("ck"));
        assert!(credentials.validate().is_ok());
    }

    #[test]
    fn api_key_wins_over_alias() {
        let credentials = Credentials::new().api_key("real").consumer_key("alias");
        assert_eq!(credentials.get_api_key(), Some("real"));
    }

    #[test]
    fn missing_api_key_fails() {
        let err = Credentials::new().shared_secret("s").validate().unwrap_err();
        match err {
            OauthError::Config(msg) => assert!(msg.contains("api_key")),
            other => panic!("expected OauthError::Config, got: {:?}", other),
        }
    }

    #[test]
    fn missing_shared_secret_fails() {
        let err = Credentials::new().api_key("k").validate().unwrap_err();
        match err {
            OauthError::Config(msg) => assert!(msg.contains("shared_secret")),
            other => panic!("expected OauthError::Config, got: {:?}", other),
        }
    }

    #[test]
    fn token_without_secret_fails() {
        let err = Credentials::new()
            .api_key("k")
            .shared_secret("s")
            .access_token("t")
            .validate()
            .unwrap_err();
        match err {
            OauthError::Config(msg) => assert!(msg.contains("access_secret")),
            other => panic!("expected OauthError::Config, got: {:?}", other),
        }
    }

    #[test]
    fn secret_without_token_fails() {
        let err = Credentials::new()
            .api_key("k")
            .shared_secret("s")
            .access_secret("ts")
            .validate()
            .unwrap_err();
        match err {
            OauthError::Config(msg) => assert!(msg.contains("access_token")),
            other => panic!("expected OauthError::Config, got: {:?}", other),
        }
    }

    #[test]
    fn debug_redacts_secrets() {
        let credentials = Credentials::new()
            .api_key("visible-key")
            .shared_secret("top-secret")
            .access_secret("also-secret");
        let rendered = format!("{:?}", credentials);
        assert!(rendered.contains("visible-key"));
        assert!(!rendered.contains("top-secret"));
        assert!(!rendered.contains("also-secret"));
    }
}
