use thiserror::Error;

/// Errors raised while decoding boundary payloads.
#[derive(Debug, Error)]
pub enum FeedError {
    /// The payload was not the expected JSON shape.
    #[error("failed to decode feed payload: {source}")]
    Json {
        /// Decoder error from `serde_json`.
        #[from]
        source: serde_json::Error,
    },
    /// The routing source reported a non-`Ok` status code.
    #[error("routing source returned {code}{}", .message.as_deref().map(|m| format!(": {m}")).unwrap_or_default())]
    RoutingFailed {
        /// Status code from the routing source.
        code: String,
        /// Optional human-readable message accompanying the code.
        message: Option<String>,
    },
}
