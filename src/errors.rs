//! Error types for the API client.

/// Errors that can occur when making API requests.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// An HTTP request failed (network error, timeout, or an unusable URL).
    #[error("request failed")]
    RequestFailed,

    /// The API returned a non-success status with a body snippet.
    #[error("request failed with status {status}")]
    HttpStatus { status: u16, body: String },

    /// The response envelope or primary object did not match the expected
    /// shape.
    #[error("failed to decode response")]
    Decode(#[source] serde_json::Error),

    /// An expansion payload was present for a relation but its nested
    /// content failed to decode. Fatal for the whole call.
    #[error("failed to decode expansion '{relation}'")]
    Expansion {
        relation: String,
        #[source]
        source: serde_json::Error,
    },
}
