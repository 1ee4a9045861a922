//! Stream constructors supplied by the hosting runtime.

use std::fmt;
use std::pin::Pin;
use std::sync::Arc;

use edge_core::StreamError;
use futures::stream::BoxStream;
use futures::{Sink, SinkExt};

/// Readable side handed to a response body.
pub type ReadableStream = BoxStream<'static, Result<Vec<u8>, StreamError>>;

/// Writable side that accepts rendered chunks.
pub type WritableStream = Pin<Box<dyn Sink<Vec<u8>, Error = StreamError> + Send>>;

/// Callback a writable stream forwards each chunk to.
pub type WriteFn = Box<dyn FnMut(Vec<u8>) -> Result<(), StreamError> + Send>;

type ChunkSink = Pin<Box<dyn Sink<Result<Vec<u8>, StreamError>, Error = StreamError> + Send>>;

/// Constructs readable streams.
pub trait ReadableFactory: Send + Sync {
    /// Implementation name, used in logs.
    fn name(&self) -> &'static str;

    /// Create a readable stream and the controller that feeds it.
    fn create(&self) -> (ReadableController, ReadableStream);
}

/// Constructs writable streams.
pub trait WritableFactory: Send + Sync {
    /// Implementation name, used in logs.
    fn name(&self) -> &'static str;

    /// Create a writable stream that hands every chunk to `write`.
    fn create(&self, write: WriteFn) -> WritableStream;
}

/// Push side of a readable stream.
///
/// Dropping the controller ends the stream, same as `close`.
pub struct ReadableController {
    inner: ChunkSink,
    closed: bool,
}

impl ReadableController {
    /// Wrap the sink a runtime uses to feed its readable stream.
    pub fn new<S>(sink: S) -> Self
    where
        S: Sink<Result<Vec<u8>, StreamError>, Error = StreamError> + Send + 'static,
    {
        Self {
            inner: Box::pin(sink),
            closed: false,
        }
    }

    /// Push a chunk to the reader.
    pub async fn push(&mut self, chunk: impl Into<Vec<u8>>) -> Result<(), StreamError> {
        if self.closed {
            return Err(StreamError::Closed);
        }
        self.inner.send(Ok(chunk.into())).await
    }

    /// Deliver an error to the reader, then end the stream.
    pub async fn fail(&mut self, error: StreamError) -> Result<(), StreamError> {
        if self.closed {
            return Err(StreamError::Closed);
        }
        self.inner.send(Err(error)).await?;
        self.close().await
    }

    /// End the stream. Closing twice is a no-op.
    pub async fn close(&mut self) -> Result<(), StreamError> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        self.inner.close().await
    }

    /// Whether `close` or `fail` has ended the stream.
    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl fmt::Debug for ReadableController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReadableController")
            .field("closed", &self.closed)
            .finish_non_exhaustive()
    }
}

/// The readable and writable factories a runtime registers together.
///
/// Clones share the same factories.
#[derive(Clone)]
pub struct StreamPrimitives {
    readable: Arc<dyn ReadableFactory>,
    writable: Arc<dyn WritableFactory>,
}

impl StreamPrimitives {
    /// Pair a readable and a writable factory.
    pub fn new(readable: Arc<dyn ReadableFactory>, writable: Arc<dyn WritableFactory>) -> Self {
        Self { readable, writable }
    }

    /// The readable stream factory.
    pub fn readable(&self) -> &Arc<dyn ReadableFactory> {
        &self.readable
    }

    /// The writable stream factory.
    pub fn writable(&self) -> &Arc<dyn WritableFactory> {
        &self.writable
    }

    /// Create a readable stream with the registered factory.
    pub fn create_readable(&self) -> (ReadableController, ReadableStream) {
        self.readable.create()
    }

    /// Create a writable stream with the registered factory.
    pub fn create_writable(&self, write: WriteFn) -> WritableStream {
        self.writable.create(write)
    }

    /// Whether both factories are the very same instances as in `other`.
    pub fn same_as(&self, other: &StreamPrimitives) -> bool {
        Arc::ptr_eq(&self.readable, &other.readable)
            && Arc::ptr_eq(&self.writable, &other.writable)
    }
}

impl fmt::Debug for StreamPrimitives {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreamPrimitives")
            .field("readable", &self.readable.name())
            .field("writable", &self.writable.name())
            .finish()
    }
}
