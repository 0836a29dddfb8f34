//! Request parameter storage.
//!
//! Parameters are a multimap: a key holds either a single value or an
//! ordered list of values (repeated query keys). OAuth protocol parameters
//! (`oauth_nonce`, `oauth_timestamp`, ...) are ordinary entries of the same
//! map once filled in. Entries keep first-insertion order; sorting happens
//! only during normalization.

use std::time::{SystemTime, UNIX_EPOCH};

use rand::Rng;

use crate::credential::Credentials;
use crate::encode::percent_encode;
use crate::error::{OauthError, Result};

/// Alphabet the default nonce is drawn from.
const NONCE_CHARS: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Default length of a generated `oauth_nonce`.
pub const DEFAULT_NONCE_LENGTH: usize = 5;

/// A parameter value: a single string or an ordered list of strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Scalar(String),
    Multi(Vec<String>),
}

impl ParamValue {
    /// Percent-encodes a scalar value.
    ///
    /// Calling this on a multi-valued parameter is a programming error:
    /// callers must expand the list and encode each element. Failing here
    /// beats silently stringifying the list into the signature.
    pub fn encoded(&self) -> Result<String> {
        match self {
            ParamValue::Scalar(s) => Ok(percent_encode(s)),
            ParamValue::Multi(_) => Err(OauthError::Encoding(
                "cannot percent-encode a multi-valued parameter; expand its values first"
                    .to_string(),
            )),
        }
    }

    fn push(&mut self, value: String) {
        match self {
            ParamValue::Scalar(existing) => {
                *self = ParamValue::Multi(vec![std::mem::take(existing), value]);
            }
            ParamValue::Multi(values) => values.push(value),
        }
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Scalar(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Scalar(value.to_string())
    }
}

impl From<Vec<String>> for ParamValue {
    fn from(values: Vec<String>) -> Self {
        ParamValue::Multi(values)
    }
}

/// Insertion-ordered parameter multimap.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParamStore {
    entries: Vec<(String, ParamValue)>,
}

impl ParamStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses an `application/x-www-form-urlencoded`-style query string.
    ///
    /// Segments split on `&`, each on the first `=`. A repeated key
    /// accumulates into a multi-value in encounter order. Values are taken
    /// verbatim (no URL-decoding). A segment without `=` fails the whole
    /// parse: silently dropping it would change the signature. Empty
    /// segments (`a=1&&b=2`) are skipped.
    pub fn from_query_string(query: &str) -> Result<Self> {
        let mut store = Self::new();
        for segment in query.split('&') {
            if segment.is_empty() {
                continue;
            }
            let Some((key, value)) = segment.split_once('=') else {
                return Err(OauthError::Parse(format!(
                    "query segment '{}' has no '='",
                    segment
                )));
            };
            if key.is_empty() {
                return Err(OauthError::Parse(format!(
                    "query segment '{}' has an empty key",
                    segment
                )));
            }
            store.append(key, value);
        }
        Ok(store)
    }

    /// Adopts a prebuilt set of key/value pairs.
    ///
    /// Later duplicates of a key accumulate into a multi-value, same as
    /// repeated query-string keys.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<ParamValue>,
    {
        let mut store = Self::new();
        for (key, value) in pairs {
            let key = key.into();
            match value.into() {
                ParamValue::Scalar(v) => store.append(&key, &v),
                ParamValue::Multi(vs) => {
                    for v in vs {
                        store.append(&key, &v);
                    }
                }
            }
        }
        store
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Sets `key` to a single value, replacing any existing value but
    /// keeping the key's original position.
    pub fn set(&mut self, key: &str, value: impl Into<ParamValue>) {
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some((_, existing)) => *existing = value.into(),
            None => self.entries.push((key.to_string(), value.into())),
        }
    }

    /// Appends a value for `key`, converting an existing scalar into a
    /// multi-value.
    pub fn append(&mut self, key: &str, value: &str) {
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some((_, existing)) => existing.push(value.to_string()),
            None => self
                .entries
                .push((key.to_string(), ParamValue::Scalar(value.to_string()))),
        }
    }

    /// Merges `other` into this store: existing keys are replaced in place,
    /// new keys are appended.
    pub fn merge(&mut self, other: ParamStore) {
        for (key, value) in other.entries {
            self.set(&key, value);
        }
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Fills the OAuth protocol parameters that are still absent.
    ///
    /// The fill order (nonce, timestamp, consumer key, token, signature
    /// method, version) is observable through header rendering, so it is
    /// fixed. Pre-supplied values are left untouched; pinning
    /// `oauth_nonce`/`oauth_timestamp` is how callers get deterministic
    /// signatures.
    pub fn fill_defaults(
        &mut self,
        credentials: &Credentials,
        nonce_length: usize,
    ) -> Result<()> {
        if !self.contains("oauth_nonce") {
            self.set("oauth_nonce", generate_nonce(nonce_length));
        }
        if !self.contains("oauth_timestamp") {
            self.set("oauth_timestamp", unix_timestamp());
        }
        if !self.contains("oauth_consumer_key") {
            let api_key = credentials.get_api_key().ok_or_else(|| {
                OauthError::Config(
                    "no api_key (oauth_consumer_key) set; cannot fill oauth_consumer_key"
                        .to_string(),
                )
            })?;
            self.set("oauth_consumer_key", api_key);
        }
        if !self.contains("oauth_token") {
            if credentials.get_access_secret().is_some() {
                let token = credentials.get_access_token().ok_or_else(|| {
                    OauthError::Config(
                        "access_secret is set but access_token is missing".to_string(),
                    )
                })?;
                self.set("oauth_token", token);
            }
            // Neither token nor secret: no oauth_token parameter at all.
        }
        if !self.contains("oauth_signature_method") {
            self.set("oauth_signature_method", "HMAC-SHA1");
        }
        if !self.contains("oauth_version") {
            self.set("oauth_version", "1.0");
        }
        Ok(())
    }
}

/// Generates a random nonce from the alphanumeric alphabet.
fn generate_nonce(length: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..length)
        .map(|_| NONCE_CHARS[rng.gen_range(0..NONCE_CHARS.len())] as char)
        .collect()
}

/// Current Unix time in whole seconds.
fn unix_timestamp() -> String {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time is before Unix epoch")
        .as_secs()
        .to_string()
}
