use thiserror::Error;

/// Reasons an inbound host payload could not be turned into a message at all.
///
/// Field-level shape problems are not errors; those fields are dropped and reported
/// through [`crate::protocol::DecodedMessage::rejected_fields`].
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("inbound payload is not valid json: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("inbound payload is not a json object")]
    NotAnObject,
    #[error("inbound payload has no string `type` field")]
    MissingType,
}
