/// Error type returned by this crate.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum PostgrestError {
    /// Missing or empty URL/key when building a client.
    #[error("configuration error: {0}")]
    Config(String),
    /// Network or request execution failure reported by the transport.
    #[error("transport error: {0}")]
    Transport(String),
    /// Status code outside `200..300` with the parsed (or raw) response body.
    #[error("http error {status}: {body}")]
    Http {
        status: u16,
        body: serde_json::Value,
    },
    /// Row payload could not be serialized to JSON.
    #[error("encode error: {0}")]
    Encode(String),
    /// Response data does not match the requested type.
    #[error("decode error: {0}")]
    Decode(String),
}

impl PostgrestError {
    /// HTTP status for [`PostgrestError::Http`], `None` otherwise.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}
