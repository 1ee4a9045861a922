//! Core abstractions shared by the edge streaming crates.
//!
//! This crate provides:
//! - `StreamError` - Errors raised while registering or using stream primitives
//! - `StreamConfig` - Configuration for the default stream runtime

mod config;
mod error;

pub use config::*;
pub use error::*;
