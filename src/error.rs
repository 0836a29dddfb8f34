use thiserror::Error;

/// Errors that can occur while configuring or signing a request.
///
/// Every error is raised synchronously at the call that violates the
/// contract; nothing is retried internally. Messages name the offending
/// field or operation so callers can report something precise.
#[derive(Debug, Error)]
pub enum OauthError {
    /// Missing or inconsistent configuration (credentials, path, method).
    #[error("configuration error: {0}")]
    Config(String),

    /// Input rejected by a validation rule (e.g. a malformed HTTP action).
    #[error("validation error: {0}")]
    Validation(String),

    /// A value was used in a context where it cannot be encoded, such as
    /// percent-encoding a multi-valued parameter directly.
    #[error("encoding error: {0}")]
    Encoding(String),

    /// A query string could not be parsed into parameters.
    #[error("parse error: {0}")]
    Parse(String),
}

/// A specialized Result type for signing operations.
pub type Result<T> = std::result::Result<T, OauthError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        let err = OauthError::Config("missing required shared_secret".to_string());
        assert_eq!(
            err.to_string(),
            "configuration error: missing required shared_secret"
        );
    }

    #[test]
    fn validation_error_display() {
        let err = OauthError::Validation("invalid action 'GET/POST'".to_string());
        assert_eq!(
            err.to_string(),
            "validation error: invalid action 'GET/POST'"
        );
    }

    #[test]
    fn encoding_error_display() {
        let err = OauthError::Encoding("cannot encode multi-valued parameter 'boo'".to_string());
        assert!(err.to_string().contains("multi-valued parameter 'boo'"));
    }

    #[test]
    fn parse_error_display() {
        let err = OauthError::Parse("segment 'foo' has no '='".to_string());
        assert_eq!(err.to_string(), "parse error: segment 'foo' has no '='");
    }
}
