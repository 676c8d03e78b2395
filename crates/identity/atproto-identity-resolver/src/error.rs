//! Error types for identity resolution.

use reqwest::StatusCode;

/// Error type for resolver failures.
///
/// `target` is always the DID or handle that was being resolved, so every
/// message reads `Failed to resolve <target>: ...`.
#[derive(Debug, thiserror::Error)]
pub enum ResolverError {
    /// The HTTP request could not be completed.
    #[error("Failed to resolve {target}: {source}")]
    Request {
        target: String,
        #[source]
        source: reqwest::Error,
    },

    /// The service answered with a non-success status.
    #[error("Failed to resolve {target}: HTTP {status} {body}")]
    Status {
        target: String,
        status: StatusCode,
        body: String,
    },

    /// The response body was not the JSON object we expected.
    #[error("Failed to resolve {target}: {reason}")]
    InvalidResponse { target: String, reason: String },

    /// The response parsed, but the field we need is absent or empty.
    #[error("Failed to resolve {target}: missing `{field}` in {body}")]
    MissingField {
        target: String,
        field: &'static str,
        body: String,
    },

    /// The resolver was configured with an unusable endpoint.
    #[error("Config error: {0}")]
    ConfigError(String),
}

impl ResolverError {
    pub(crate) fn request(target: &str, source: reqwest::Error) -> Self {
        Self::Request {
            target: target.to_string(),
            source,
        }
    }
}
