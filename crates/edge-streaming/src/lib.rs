//! Runtime-provided stream primitives for environment-agnostic SSR.
//!
//! Rendering code never names a concrete stream implementation. The hosting
//! runtime registers one at startup and rendering code asks for it:
//! - `ReadableFactory` / `WritableFactory` - Stream constructors a runtime provides
//! - `StreamPrimitives` - The registered pair
//! - `set_stream_primitives` / `get_stream_primitives` - Process-wide registry
//! - `StreamContext` - The same pair passed down explicitly
//! - `bootstrap` - Registers the default channel-backed runtime
//!
//! ```rust,ignore
//! edge_streaming::bootstrap();
//!
//! let primitives = edge_streaming::get_stream_primitives()?;
//! let (mut controller, body) = primitives.create_readable();
//! ```

mod channel;
mod context;
mod primitives;
mod registry;

pub use channel::*;
pub use context::*;
pub use primitives::*;
pub use registry::*;

pub use edge_core::{StreamConfig, StreamError};
