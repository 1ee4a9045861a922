//! Default stream runtime built on `futures` channels.

use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use edge_core::{StreamConfig, StreamError, MAX_CHANNEL_CAPACITY};
use futures::channel::mpsc;
use futures::{Sink, SinkExt, StreamExt};
use tracing::info;

use crate::primitives::{
    ReadableController, ReadableFactory, ReadableStream, StreamPrimitives, WritableFactory,
    WritableStream, WriteFn,
};
use crate::registry::set_primitives;

/// Readable streams backed by a bounded `mpsc` channel.
#[derive(Debug, Clone)]
pub struct ChannelReadable {
    capacity: usize,
}

impl ChannelReadable {
    /// Create a factory whose streams buffer up to `capacity` chunks.
    ///
    /// Capacities above [`MAX_CHANNEL_CAPACITY`] are clamped to it.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.min(MAX_CHANNEL_CAPACITY),
        }
    }

    /// Chunks buffered before `push` waits for the reader.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl ReadableFactory for ChannelReadable {
    fn name(&self) -> &'static str {
        "channel"
    }

    fn create(&self) -> (ReadableController, ReadableStream) {
        let (tx, rx) = mpsc::channel(self.capacity);
        let controller = ReadableController::new(tx.sink_map_err(|_| StreamError::Closed));
        (controller, rx.boxed())
    }
}

/// Writable streams that call the write callback for every chunk.
#[derive(Debug, Clone, Copy, Default)]
pub struct CallbackWritable;

impl WritableFactory for CallbackWritable {
    fn name(&self) -> &'static str {
        "callback"
    }

    fn create(&self, write: WriteFn) -> WritableStream {
        Box::pin(CallbackSink {
            write,
            closed: false,
        })
    }
}

struct CallbackSink {
    write: WriteFn,
    closed: bool,
}

impl Sink<Vec<u8>> for CallbackSink {
    type Error = StreamError;

    fn poll_ready(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        if self.closed {
            Poll::Ready(Err(StreamError::Closed))
        } else {
            Poll::Ready(Ok(()))
        }
    }

    fn start_send(mut self: Pin<&mut Self>, chunk: Vec<u8>) -> Result<(), Self::Error> {
        if self.closed {
            return Err(StreamError::Closed);
        }
        (self.write)(chunk)
    }

    fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn poll_close(mut self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.closed = true;
        Poll::Ready(Ok(()))
    }
}

/// Channel-backed primitives configured by `config`.
pub fn channel_primitives(config: &StreamConfig) -> StreamPrimitives {
    StreamPrimitives::new(
        Arc::new(ChannelReadable::new(config.channel_capacity)),
        Arc::new(CallbackWritable),
    )
}

/// Register the channel-backed primitives with the default configuration.
///
/// Call once at startup before rendering any streamed response.
pub fn bootstrap() {
    bootstrap_with(&StreamConfig::default());
}

/// Register the channel-backed primitives with an explicit configuration.
pub fn bootstrap_with(config: &StreamConfig) {
    info!(
        channel_capacity = config.channel_capacity,
        "bootstrapping channel stream primitives"
    );
    set_primitives(channel_primitives(config));
}
