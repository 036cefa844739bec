use thiserror::Error;

/// Errors raised while decoding or validating dashboard payloads.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unexpected payload shape: {0}")]
    UnexpectedShape(&'static str),

    #[error("cannot encode query: {0}")]
    Query(#[from] serde_urlencoded::ser::Error),

    #[error("invalid order: {0}")]
    InvalidOrder(&'static str),

    #[error("failed to read replay input: {0}")]
    Io(#[from] std::io::Error),
}
