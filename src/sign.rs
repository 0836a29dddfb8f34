//! Signature methods and signing dispatch.

use std::fmt;
use std::str::FromStr;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;

use crate::credential::Credentials;
use crate::encode::percent_encode;
use crate::error::{OauthError, Result};
use crate::hash::hmac_sha1;

/// Supported OAuth 1.0 signature methods.
///
/// Parsing is case-insensitive; the canonical rendering is uppercase
/// (`PLAINTEXT`, `HMAC-SHA1`). Unknown methods are rejected when the method
/// is set, not at signing time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureMethod {
    Plaintext,
    HmacSha1,
}

impl SignatureMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            SignatureMethod::Plaintext => "PLAINTEXT",
            SignatureMethod::HmacSha1 => "HMAC-SHA1",
        }
    }
}

impl fmt::Display for SignatureMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SignatureMethod {
    type Err = OauthError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_uppercase().as_str() {
            "PLAINTEXT" => Ok(SignatureMethod::Plaintext),
            "HMAC-SHA1" => Ok(SignatureMethod::HmacSha1),
            _ => Err(OauthError::Config(format!(
                "unknown signature method '{}'; expected PLAINTEXT or HMAC-SHA1",
                s
            ))),
        }
    }
}

/// Builds the signing key: `encode(shared_secret)&encode(access_secret)`,
/// with an absent access secret contributing the empty string.
pub(crate) fn secret_key(credentials: &Credentials) -> String {
    format!(
        "{}&{}",
        percent_encode(credentials.get_shared_secret().unwrap_or("")),
        percent_encode(credentials.get_access_secret().unwrap_or(""))
    )
}

/// Signs the base string with the given method.
///
/// PLAINTEXT returns the secret key verbatim (relying on transport
/// confidentiality); HMAC-SHA1 returns the base64 of the keyed digest.
pub fn sign(method: SignatureMethod, base_string: &str, credentials: &Credentials) -> String {
    let key = secret_key(credentials);
    match method {
        SignatureMethod::Plaintext => key,
        SignatureMethod::HmacSha1 => {
            BASE64.encode(hmac_sha1(key.as_bytes(), base_string.as_bytes()))
        }
    }
}
