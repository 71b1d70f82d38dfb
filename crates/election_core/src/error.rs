use thiserror::Error;

/// Failure delivering a request to the host. Never surfaced to the user.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("invalid host endpoint: {0}")]
    InvalidEndpoint(#[from] url::ParseError),
    #[error("failed to encode request body: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("host request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("host responded with status {0}")]
    Status(reqwest::StatusCode),
}
