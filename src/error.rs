//! Crate-level error types.
//!
//! [`OrdertabError`] unifies every error source (configuration, HTTP,
//! order service rejections, JSON, terminal I/O) behind a single enum so
//! callers can match on the variant they care about while still using the
//! `?` operator for easy propagation.

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, OrdertabError>;

/// Top-level error type returned by all public APIs.
#[derive(Debug, thiserror::Error)]
pub enum OrdertabError {
    /// An environment variable or config file was missing or malformed.
    #[error("configuration error: {0}")]
    Config(String),

    /// The HTTP request could not be sent or its body could not be read.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The order service answered with a non-success status.
    #[error("order service returned {status}: {message}")]
    Api { status: u16, message: String },

    /// The order service rejected the submitted fields (HTTP 422).
    #[error("validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    /// A response parsed as JSON but lacked an expected field.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// JSON serialization or deserialization failed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The TLS root store could not be built.
    #[error("tls error: {0}")]
    Tls(String),

    /// Terminal or file I/O failed.
    #[error("io error: {0}")]
    Io(String),

    /// An endpoint that needs a customer session was called without one.
    #[error("not logged in")]
    NotLoggedIn,
}

impl OrdertabError {
    /// Returns the per-field messages of a validation failure, if any.
    pub fn validation_messages(&self) -> &[String] {
        match self {
            Self::Validation(messages) => messages,
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_display_joins_messages() {
        let err = OrdertabError::Validation(vec![
            "address: must not be empty".to_string(),
            "products: at least one product".to_string(),
        ]);
        assert_eq!(
            err.to_string(),
            "validation failed: address: must not be empty; products: at least one product"
        );
        assert_eq!(err.validation_messages().len(), 2);
    }

    #[test]
    fn api_error_includes_status_and_body() {
        let err = OrdertabError::Api {
            status: 404,
            message: "Order not found".to_string(),
        };
        assert_eq!(err.to_string(), "order service returned 404: Order not found");
        assert!(err.validation_messages().is_empty());
    }
}
