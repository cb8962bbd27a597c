//! Error type for aggregator API calls.

use crate::retry::Retryable;
use jupag_core::ModelError;
use reqwest::StatusCode;
use thiserror::Error;

/// Errors returned by [`crate::JupiterClient`] and [`crate::SwapAggregator`].
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport failure (connect, timeout, body read).
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("unexpected status code: {status} - {body}")]
    Status { status: StatusCode, body: String },

    /// The response body did not match the expected schema.
    #[error("failed to decode {context} response: {source}")]
    Decode {
        context: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("no quotes returned")]
    NoQuotes,

    #[error("swap response contained no transaction")]
    EmptyTransaction,

    #[error("no price returned for {0}")]
    MissingPrice(String),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("invalid client configuration: {0}")]
    Config(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// HTTP status, if the server answered.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Http(e) => e.status(),
            _ => None,
        }
    }
}

impl Retryable for ApiError {
    /// Timeouts, connection failures, 5xx and 429 are transient.
    fn is_retryable(&self) -> bool {
        match self {
            Self::Http(e) => e.is_timeout() || e.is_connect(),
            Self::Status { status, .. } => {
                status.is_server_error() || *status == StatusCode::TOO_MANY_REQUESTS
            }
            _ => false,
        }
    }
}
