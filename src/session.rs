//! The signing session façade.

use std::sync::OnceLock;

use regex::Regex;

use crate::credential::Credentials;
use crate::encode::percent_encode;
use crate::error::{OauthError, Result};
use crate::normalize::{base_string, normalize};
use crate::params::{DEFAULT_NONCE_LENGTH, ParamStore, ParamValue};
use crate::sign::{SignatureMethod, sign};

/// Cached regex for HTTP action validation (after uppercasing).
static ACTION_REGEX: OnceLock<Regex> = OnceLock::new();

fn action_regex() -> &'static Regex {
    ACTION_REGEX.get_or_init(|| Regex::new(r"^[A-Z]+$").expect("invalid ACTION_REGEX pattern"))
}

/// Optional overrides applied at the start of [`Session::sign_with`].
///
/// Every field is optional; anything left `None` falls back to whatever the
/// session was configured with through its setters.
#[derive(Debug, Default)]
pub struct SignConfig {
    /// HTTP action (e.g. `GET`, `POST`).
    pub action: Option<String>,
    /// Target URL, scheme+host+path with no query.
    pub path: Option<String>,
    /// Signature method name (`PLAINTEXT` or `HMAC-SHA1`, any case).
    pub method: Option<String>,
    /// Credentials to sign with, replacing the session's set.
    pub credentials: Option<Credentials>,
    /// Parameters merged into the session's store.
    pub parameters: Option<ParamStore>,
}

/// The rendered output of a successful [`Session::sign_with`] call.
#[derive(Debug, Clone)]
pub struct SignedRequest {
    /// The full final parameter mapping, including `oauth_signature`.
    pub parameters: ParamStore,
    /// The percent-encoded signature value alone.
    pub signature: String,
    /// `path?normalized_params`, signature included.
    pub signed_url: String,
    /// Comma-joined `key="encoded-value"` pairs for every `oauth_*`
    /// parameter, in insertion order. The `OAuth ` auth-scheme label is NOT
    /// included; prepend it when placing this into a transport header.
    pub header: String,
    /// The signature base string that was signed, for interop debugging.
    pub base_string: String,
}

/// A single signing session: one request's parameters and credentials.
///
/// Sessions are mutable single-owner values; construct one per logical
/// request. Configuration calls validate eagerly and chain. Invoking
/// [`Session::sign`] twice without pinning `oauth_nonce` and
/// `oauth_timestamp` yields a different nonce, timestamp, and signature
/// each time.
///
/// ```
/// use oauth1_sign::{Credentials, Session};
///
/// # fn main() -> oauth1_sign::Result<()> {
/// let mut session = Session::new();
/// session
///     .set_url("http://example.com/rest/")?
///     .set_query_string("foo=bar&gorp=banana")?
///     .set_credentials(
///         Credentials::new().api_key("12345abcd").shared_secret("xyz-5309"),
///     )?;
/// let signed = session.sign()?;
/// println!("{}", signed.signed_url);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Session {
    path: Option<String>,
    action: Option<String>,
    params: ParamStore,
    credentials: Credentials,
    nonce_length: usize,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            path: None,
            action: None,
            params: ParamStore::new(),
            credentials: Credentials::new(),
            nonce_length: DEFAULT_NONCE_LENGTH,
        }
    }
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convenience constructor for the common consumer key/secret pair.
    pub fn with_keys(api_key: impl Into<String>, shared_secret: impl Into<String>) -> Self {
        Self {
            credentials: Credentials::new().api_key(api_key).shared_secret(shared_secret),
            ..Self::default()
        }
    }

    /// Sets the target URL (scheme+host+path, no query arguments).
    pub fn set_url(&mut self, path: impl Into<String>) -> Result<&mut Self> {
        let path = path.into();
        if path.is_empty() {
            return Err(OauthError::Config("no path specified for set_url".to_string()));
        }
        self.path = Some(path);
        Ok(self)
    }

    /// Alias for [`Session::set_url`].
    pub fn set_path(&mut self, path: impl Into<String>) -> Result<&mut Self> {
        self.set_url(path)
    }

    /// Sets the HTTP action. Uppercased; anything but `A-Z` is rejected.
    /// Defaults to `GET` when never set.
    pub fn set_action(&mut self, action: &str) -> Result<&mut Self> {
        let action = action.to_uppercase();
        if !action_regex().is_match(&action) {
            return Err(OauthError::Validation(format!(
                "invalid action '{}'; must be letters only",
                action
            )));
        }
        self.action = Some(action);
        Ok(self)
    }

    /// Merges a prebuilt parameter set into the session. Existing keys are
    /// replaced; new keys are appended.
    pub fn set_parameters(&mut self, params: ParamStore) -> &mut Self {
        self.params.merge(params);
        self
    }

    /// Parses a query string and merges it into the session's parameters.
    pub fn set_query_string(&mut self, query: &str) -> Result<&mut Self> {
        let parsed = ParamStore::from_query_string(query)?;
        self.params.merge(parsed);
        Ok(self)
    }

    /// Replaces the session's credentials, validating them eagerly.
    pub fn set_credentials(&mut self, credentials: Credentials) -> Result<&mut Self> {
        credentials.validate()?;
        self.credentials = credentials;
        Ok(self)
    }

    /// Sets the signature method, rejecting unknown methods here rather
    /// than at signing time. The canonical uppercase form is stored as the
    /// `oauth_signature_method` parameter.
    pub fn set_signature_method(&mut self, method: &str) -> Result<&mut Self> {
        let method: SignatureMethod = method.parse()?;
        self.params.set("oauth_signature_method", method.as_str());
        Ok(self)
    }

    /// Overrides the generated nonce length (default 5).
    pub fn set_nonce_length(&mut self, length: usize) -> &mut Self {
        self.nonce_length = length;
        self
    }

    /// Clears parameters and path, keeping credentials and action, so the
    /// session can sign a fresh request.
    pub fn reset(&mut self) -> &mut Self {
        self.params = ParamStore::new();
        self.path = None;
        self
    }

    /// Signs with the session's current configuration.
    pub fn sign(&mut self) -> Result<SignedRequest> {
        self.sign_with(SignConfig::default())
    }

    /// Applies the overrides in `config`, then validates credentials, fills
    /// parameter defaults, computes the base string and signature, splices
    /// `oauth_signature` back into the parameter store, and renders the
    /// output forms.
    pub fn sign_with(&mut self, config: SignConfig) -> Result<SignedRequest> {
        if let Some(action) = &config.action {
            self.set_action(action)?;
        }
        if let Some(path) = config.path {
            self.set_url(path)?;
        }
        if let Some(method) = &config.method {
            self.set_signature_method(method)?;
        }
        if let Some(credentials) = config.credentials {
            self.set_credentials(credentials)?;
        }
        if let Some(parameters) = config.parameters {
            self.set_parameters(parameters);
        }

        self.credentials.validate()?;
        let path = self
            .path
            .clone()
            .ok_or_else(|| OauthError::Config("no path set; call set_url before sign".to_string()))?;
        let action = self.action.clone().unwrap_or_else(|| "GET".to_string());
        let nonce_length = self.nonce_length;

        self.params.fill_defaults(&self.credentials, nonce_length)?;

        let base = base_string(&action, &path, &self.params);
        let method = self.signature_method()?;
        let signature = sign(method, &base, &self.credentials);
        self.params.set("oauth_signature", signature.as_str());

        Ok(SignedRequest {
            signature: percent_encode(&signature),
            signed_url: format!("{}?{}", path, normalize(&self.params)),
            header: render_header(&self.params),
            base_string: base,
            parameters: self.params.clone(),
        })
    }

    /// Renders the `Authorization` header attribute list, signing first
    /// (with defaults) if no signature has been computed yet.
    pub fn header_string(&mut self) -> Result<String> {
        if !self.params.contains("oauth_signature") {
            self.sign()?;
        }
        Ok(render_header(&self.params))
    }

    /// Reads the signature method back out of the parameter store.
    ///
    /// The store is the single source of truth for `oauth_signature_method`
    /// so that callers may also inject it as an ordinary parameter; an
    /// unparseable or multi-valued entry is a configuration error.
    fn signature_method(&self) -> Result<SignatureMethod> {
        match self.params.get("oauth_signature_method") {
            Some(ParamValue::Scalar(name)) => name.parse(),
            Some(ParamValue::Multi(_)) => Err(OauthError::Config(
                "oauth_signature_method must be a single value".to_string(),
            )),
            None => Ok(SignatureMethod::HmacSha1),
        }
    }
}

/// Renders the `oauth_*` attributes as `key="encoded-value"`, joined
/// with `", "`, in parameter insertion order. Multi-values expand into
/// repeated attributes.
fn render_header(params: &ParamStore) -> String {
    let mut attributes = Vec::new();
    for (key, value) in params.iter() {
        if !key.starts_with("oauth_") {
            continue;
        }
        match value {
            ParamValue::Scalar(v) => {
                attributes.push(format!("{}=\"{}\"", key, percent_encode(v)));
            }
            ParamValue::Multi(values) => {
                for v in values {
                    attributes.push(format!("{}=\"{}\"", key, percent_encode(v)));
                }
            }
        }
    }
    attributes.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configured_session() -> Session {
        let mut session = Session::with_keys("test_key", "test_secret");
        session.set_url("http://example.com/test").unwrap();
        session
    }

    #[test]
    fn action_is_uppercased() {
        let mut session = Session::new();
        session.set_action("post").unwrap();
        assert_eq!(session.action.as_deref(), Some("POST"));
    }

    #[test]
    fn invalid_action_fails() {
        let mut session = Session::new();
        let err = session.set_action("GET/POST").unwrap_err();
        match err {
            OauthError::Validation(msg) => assert!(msg.contains("GET/POST")),
            other => panic!("expected OauthError::Validation, got: {:?}", other),
        }
    }

    #[test]
    fn empty_path_fails() {
        let mut session = Session::new();
        assert!(matches!(session.set_url(""), Err(OauthError::Config(_))));
    }

    #[test]
    fn unknown_method_fails_at_set_time() {
        let mut session = configured_session();
        let err = session.set_signature_method("RSA-SHA1").unwrap_err();
        assert!(matches!(err, OauthError::Config(_)));
        // The store was not touched.
        assert!(!session.params.contains("oauth_signature_method"));
    }

    #[test]
    fn method_is_canonicalized_into_params() {
        let mut session = configured_session();
        session.set_signature_method("plaintext").unwrap();
        assert_eq!(
            session.params.get("oauth_signature_method"),
            Some(&ParamValue::Scalar("PLAINTEXT".into()))
        );
    }

    #[test]
    fn signing_without_path_fails() {
        let mut session = Session::with_keys("k", "s");
        let err = session.sign().unwrap_err();
        match err {
            OauthError::Config(msg) => assert!(msg.contains("path")),
            other => panic!("expected OauthError::Config, got: {:?}", other),
        }
    }

    #[test]
    fn signing_without_credentials_fails() {
        let mut session = Session::new();
        session.set_url("http://example.com/test").unwrap();
        assert!(matches!(session.sign(), Err(OauthError::Config(_))));
    }

    #[test]
    fn plaintext_signature_is_the_secret_key() {
        let mut session = configured_session();
        session.set_signature_method("PLAINTEXT").unwrap();
        let signed = session.sign().unwrap();
        assert_eq!(signed.signature, "test_secret%26");
        assert_eq!(
            signed.parameters.get("oauth_signature"),
            Some(&ParamValue::Scalar("test_secret&".into()))
        );
    }

    #[test]
    fn signed_url_includes_signature() {
        let mut session = configured_session();
        let signed = session.sign().unwrap();
        assert!(signed.signed_url.starts_with("http://example.com/test?"));
        assert!(signed.signed_url.contains("oauth_signature="));
    }

    #[test]
    fn resigning_regenerates_nonce_and_signature() {
        let mut session = configured_session();
        let first = session.sign().unwrap();
        session.reset();
        session.set_url("http://example.com/test").unwrap();
        let second = session.sign().unwrap();
        assert_ne!(
            first.parameters.get("oauth_nonce"),
            second.parameters.get("oauth_nonce")
        );
    }

    #[test]
    fn header_string_signs_on_demand() {
        let mut session = configured_session();
        let header = session.header_string().unwrap();
        assert!(header.contains("oauth_signature=\""));
        assert!(header.contains("oauth_nonce=\""));
        assert!(!header.starts_with("OAuth"));
    }

    #[test]
    fn header_skips_non_oauth_params() {
        let mut session = configured_session();
        session.set_query_string("foo=bar").unwrap();
        let header = session.header_string().unwrap();
        assert!(!header.contains("foo"));
    }

    #[test]
    fn nonce_length_override() {
        let mut session = configured_session();
        session.set_nonce_length(12);
        let signed = session.sign().unwrap();
        match signed.parameters.get("oauth_nonce") {
            Some(ParamValue::Scalar(nonce)) => assert_eq!(nonce.len(), 12),
            other => panic!("expected scalar nonce, got: {:?}", other),
        }
    }

    #[test]
    fn reset_keeps_credentials() {
        let mut session = configured_session();
        session.sign().unwrap();
        session.reset();
        assert!(session.params.is_empty());
        session.set_url("http://example.com/other").unwrap();
        assert!(session.sign().is_ok());
    }
}
