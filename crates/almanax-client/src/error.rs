use thiserror::Error;

use crate::validate::ValidationError;

/// Errors that can end an aggregation run.
///
/// Secondary-provider problems never appear here: image enrichment degrades
/// to a fallback image instead of failing.
#[derive(Debug, Error)]
pub enum AlmanaxError {
    /// The HTTP client itself could not be built.
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// Network or TLS failure while talking to the primary provider.
    #[error("request to {url} failed: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// The response body was not JSON at all.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The body was JSON but did not match the almanax schema.
    #[error("schema validation failed at {path}: {reason}")]
    Validation { path: String, reason: String },

    #[error("invalid base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}

impl AlmanaxError {
    /// Transport, status, or non-JSON body from the primary provider.
    #[must_use]
    pub fn is_fetch_failure(&self) -> bool {
        matches!(
            self,
            Self::Fetch { .. } | Self::UnexpectedStatus { .. } | Self::Deserialize { .. }
        )
    }

    #[must_use]
    pub fn is_validation_failure(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}

impl From<ValidationError> for AlmanaxError {
    fn from(err: ValidationError) -> Self {
        Self::Validation {
            path: err.path,
            reason: err.reason,
        }
    }
}
