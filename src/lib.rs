//! Client-side OAuth 1.0 request signing.
//!
//! This crate builds the OAuth elements only; it does not transmit
//! requests, exchange tokens, or verify signatures on a receiving server.
//! Given a target URL, an HTTP action, request parameters, and credentials,
//! it produces the canonical signature base string, a PLAINTEXT or
//! HMAC-SHA1 signature, and three renderings of the signed request:
//!
//! - [`SignedRequest::signed_url`] — `path?normalized_params`, ready to use
//!   as a link
//! - [`SignedRequest::header`] — the `Authorization` header attribute list
//! - [`SignedRequest::parameters`] — the final parameter mapping, including
//!   `oauth_signature`
//!
//! # Quick Start
//!
//! ```
//! use oauth1_sign::{Credentials, Session, SignConfig};
//!
//! # fn main() -> oauth1_sign::Result<()> {
//! let mut session = Session::new();
//! let signed = session.sign_with(SignConfig {
//!     path: Some("http://example.com/rest/".into()),
//!     parameters: Some(oauth1_sign::ParamStore::from_query_string(
//!         "foo=bar&gorp=banana",
//!     )?),
//!     credentials: Some(
//!         Credentials::new()
//!             .api_key("12345abcd")
//!             .shared_secret("xyz-5309"),
//!     ),
//!     ..SignConfig::default()
//! })?;
//!
//! // The caller prepends the auth-scheme label when sending.
//! let authorization = format!("OAuth {}", signed.header);
//! # let _ = authorization;
//! # Ok(())
//! # }
//! ```
//!
//! Signatures are deterministic once `oauth_nonce` and `oauth_timestamp`
//! are pinned as ordinary parameters; otherwise each [`Session::sign`] call
//! generates fresh values.

pub mod credential;
pub mod encode;
pub mod error;
pub mod hash;
pub mod normalize;
pub mod params;
pub mod session;
pub mod sign;

pub use credential::Credentials;
pub use error::{OauthError, Result};
pub use params::{ParamStore, ParamValue};
pub use session::{Session, SignConfig, SignedRequest};
pub use sign::SignatureMethod;

// Compile-time assertions: key types must be Send + Sync so sessions can be
// moved across threads (one session per logical request).
const _: () = {
    const fn assert_send_sync<T: Send + Sync>() {}
    let _ = assert_send_sync::<Session>;
    let _ = assert_send_sync::<SignedRequest>;
    let _ = assert_send_sync::<Credentials>;
    let _ = assert_send_sync::<OauthError>;
};
