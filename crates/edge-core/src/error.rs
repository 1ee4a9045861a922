//! Error type for stream primitive operations.

/// Where the bootstrap requirement for streaming is explained.
pub const STREAMING_DOCS_URL: &str = "https://vite-plugin-ssr.com/html-streaming";

/// Errors raised by the stream primitive registry and the streams it creates.
#[derive(Debug, thiserror::Error)]
pub enum StreamError {
    /// Streams were requested before the hosting runtime registered its primitives.
    #[error(
        "You are trying to use Node Streams. Make sure to register the stream primitives \
         at startup by calling `edge_streaming::bootstrap()` or `set_stream_primitives()`. \
         (In case you are curious why: {url} .)",
        url = STREAMING_DOCS_URL
    )]
    PrimitivesNotRegistered,

    #[error("Stream already closed")]
    Closed,

    #[error("Write error: {0}")]
    Write(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl StreamError {
    /// Whether this error is a missing-bootstrap usage error.
    pub fn is_usage_error(&self) -> bool {
        matches!(self, Self::PrimitivesNotRegistered)
    }
}
