//! Parameter normalization and the signature base string.
//!
//! This ordering is load-bearing: signer and verifier only agree if both
//! apply the identical sort over identical key/value sets, including the
//! value sort for repeated keys.

use crate::encode::percent_encode;
use crate::params::{ParamStore, ParamValue};

/// Builds the canonical `key=value&...` string over the parameter set.
///
/// Keys containing `_secret` are excluded (a credential stored as a
/// parameter must never leak into the base string). Keys sort byte-wise
/// ascending; a multi-value expands into repeated pairs with its values
/// sorted byte-wise, independent of their original order.
pub fn normalize(params: &ParamStore) -> String {
    let mut entries: Vec<(&str, &ParamValue)> = params
        .iter()
        .filter(|(key, _)| !key.contains("_secret"))
        .collect();
    entries.sort_unstable_by(|a, b| a.0.cmp(b.0));

    let mut pairs = Vec::with_capacity(entries.len());
    for (key, value) in entries {
        match value {
            ParamValue::Scalar(v) => {
                pairs.push(format!("{}={}", percent_encode(key), percent_encode(v)));
            }
            ParamValue::Multi(values) => {
                let mut sorted = values.clone();
                sorted.sort_unstable();
                for v in sorted {
                    pairs.push(format!("{}={}", percent_encode(key), percent_encode(&v)));
                }
            }
        }
    }
    pairs.join("&")
}

/// Builds the signature base string:
/// `ACTION&encode(path)&encode(normalize(params))`.
pub fn base_string(action: &str, path: &str, params: &ParamStore) -> String {
    format!(
        "{}&{}&{}",
        action.to_uppercase(),
        percent_encode(path),
        percent_encode(&normalize(params))
    )
}
