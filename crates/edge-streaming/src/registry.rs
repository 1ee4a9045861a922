//! Process-wide registry for the runtime's stream primitives.
//!
//! The hosting runtime registers its primitives once at startup; rendering
//! code reads them on demand. Registering again replaces the previous pair.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use edge_core::StreamError;
use tracing::{debug, warn};

use crate::primitives::{ReadableFactory, StreamPrimitives, WritableFactory};

static REGISTRY: RwLock<Option<StreamPrimitives>> = RwLock::new(None);

// The slot is only ever replaced whole, so a poisoned lock still holds a valid value.
fn read_slot() -> RwLockReadGuard<'static, Option<StreamPrimitives>> {
    REGISTRY.read().unwrap_or_else(PoisonError::into_inner)
}

fn write_slot() -> RwLockWriteGuard<'static, Option<StreamPrimitives>> {
    REGISTRY.write().unwrap_or_else(PoisonError::into_inner)
}

/// Register the runtime's readable and writable stream factories.
pub fn set_stream_primitives(
    readable: Arc<dyn ReadableFactory>,
    writable: Arc<dyn WritableFactory>,
) {
    set_primitives(StreamPrimitives::new(readable, writable));
}

/// Register an assembled pair of stream factories.
pub fn set_primitives(primitives: StreamPrimitives) {
    debug!(
        readable = primitives.readable().name(),
        writable = primitives.writable().name(),
        "registering stream primitives"
    );

    let previous = write_slot().replace(primitives);

    if let Some(previous) = previous {
        warn!(
            readable = previous.readable().name(),
            writable = previous.writable().name(),
            "replaced previously registered stream primitives"
        );
    }
}

/// Get the registered stream factories.
///
/// Fails with [`StreamError::PrimitivesNotRegistered`] until the runtime has
/// registered them.
pub fn get_stream_primitives() -> Result<StreamPrimitives, StreamError> {
    read_slot()
        .clone()
        .ok_or(StreamError::PrimitivesNotRegistered)
}

/// Whether stream primitives have been registered.
pub fn is_registered() -> bool {
    read_slot().is_some()
}

/// Return the registry to its unregistered state, handing back what was registered.
pub fn clear_stream_primitives() -> Option<StreamPrimitives> {
    let previous = write_slot().take();
    if previous.is_some() {
        debug!("cleared stream primitives");
    }
    previous
}

/// Serializes unit tests that touch the process-wide registry.
#[cfg(test)]
pub(crate) fn registry_test_guard() -> std::sync::MutexGuard<'static, ()> {
    static LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());
    LOCK.lock().unwrap_or_else(PoisonError::into_inner)
}
