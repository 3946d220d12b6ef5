use shared::error::ApiError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AccountServiceError {
    #[error("invalid account service url '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("account service request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("account service returned status {status}: {error}")]
    Status { status: u16, error: ApiError },
    #[error("failed to decode account service response: {0}")]
    Decode(#[source] serde_json::Error),
}
