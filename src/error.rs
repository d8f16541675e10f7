//! Unified error types.

use thiserror::Error;

/// Top-level error for every fetch and format operation.
#[derive(Error, Debug)]
pub enum SpotError {
    /// Network failure, timeout or non-2xx status from the pricing API.
    #[error("Pricing API unavailable: {0}")]
    UpstreamUnavailable(#[from] HttpError),

    /// 2xx response whose body does not carry a usable price.
    #[error("Pricing API returned invalid data: {0}")]
    UpstreamDataInvalid(String),

    /// A NaN or infinite price reached a formatter.
    #[error("Invalid price value: {0}")]
    InvalidPriceValue(f64),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl SpotError {
    pub(crate) fn data(msg: impl Into<String>) -> Self {
        SpotError::UpstreamDataInvalid(msg.into())
    }
}

/// HTTP-layer errors.
#[derive(Error, Debug)]
pub enum HttpError {
    #[error("Request failed: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Rate limited (retry after {retry_after_ms:?}ms)")]
    RateLimited { retry_after_ms: Option<u64> },

    #[error("Unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Timeout")]
    Timeout,
}
