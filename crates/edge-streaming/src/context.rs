//! Stream primitives passed down explicitly instead of read from the registry.

use edge_core::{StreamConfig, StreamError};

use crate::channel::channel_primitives;
use crate::primitives::{
    ReadableController, ReadableStream, StreamPrimitives, WritableStream, WriteFn,
};
use crate::registry::get_stream_primitives;

/// Stream primitives handed to rendering code at startup.
///
/// # Example
///
/// ```rust,ignore
/// let ctx = StreamContext::channel(&StreamConfig::default());
/// let (mut controller, body) = ctx.readable();
/// ```
#[derive(Debug, Clone)]
pub struct StreamContext {
    primitives: StreamPrimitives,
}

impl StreamContext {
    /// Create a context around the given primitives.
    pub fn new(primitives: StreamPrimitives) -> Self {
        Self { primitives }
    }

    /// Create a context using the channel-backed runtime built from `config`.
    pub fn channel(config: &StreamConfig) -> Self {
        Self::new(channel_primitives(config))
    }

    /// Create a context from whatever the runtime registered process-wide.
    pub fn from_registry() -> Result<Self, StreamError> {
        get_stream_primitives().map(Self::new)
    }

    /// The primitives this context creates streams with.
    pub fn primitives(&self) -> &StreamPrimitives {
        &self.primitives
    }

    /// Create a readable stream.
    pub fn readable(&self) -> (ReadableController, ReadableStream) {
        self.primitives.create_readable()
    }

    /// Create a writable stream forwarding to `write`.
    pub fn writable(&self, write: WriteFn) -> WritableStream {
        self.primitives.create_writable(write)
    }
}
