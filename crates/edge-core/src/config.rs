//! Stream runtime configuration.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::StreamError;

/// Largest readable stream buffer a configuration may request.
pub const MAX_CHANNEL_CAPACITY: usize = 65_536;

/// Configuration for the default stream runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamConfig {
    /// Chunks a readable stream buffers before `push` waits for the reader.
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,
}

fn default_channel_capacity() -> usize {
    16
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            channel_capacity: default_channel_capacity(),
        }
    }
}

impl StreamConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the readable stream buffer capacity.
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        self.channel_capacity = capacity;
        self
    }

    /// Check that the values are usable by the stream runtime.
    pub fn validate(&self) -> Result<(), StreamError> {
        if self.channel_capacity > MAX_CHANNEL_CAPACITY {
            return Err(StreamError::Config(format!(
                "channel_capacity {} exceeds maximum of {}",
                self.channel_capacity, MAX_CHANNEL_CAPACITY
            )));
        }
        Ok(())
    }

    /// Parse and validate a configuration from TOML.
    pub fn from_toml_str(content: &str) -> Result<Self, StreamError> {
        let config: Self =
            toml::from_str(content).map_err(|e| StreamError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a configuration from JSON.
    pub fn from_json_str(content: &str) -> Result<Self, StreamError> {
        let config: Self =
            serde_json::from_str(content).map_err(|e| StreamError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from a file. `.json` files are parsed as JSON, anything else as TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read stream config: {}", path.display()))?;

        let parsed = if path.extension().is_some_and(|ext| ext == "json") {
            Self::from_json_str(&content)
        } else {
            Self::from_toml_str(&content)
        };

        parsed.with_context(|| format!("Failed to parse stream config: {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // === Defaults ===

    #[test]
    fn test_stream_config_default() {
        let config = StreamConfig::default();
        assert_eq!(config.channel_capacity, 16);
        assert_eq!(config, StreamConfig::new());
    }

    #[test]
    fn test_stream_config_with_channel_capacity() {
        let config = StreamConfig::new().with_channel_capacity(64);
        assert_eq!(config.channel_capacity, 64);
    }

    // === Parsing ===

    #[test]
    fn test_from_toml_str() {
        let config = StreamConfig::from_toml_str("channel_capacity = 4").unwrap();
        assert_eq!(config.channel_capacity, 4);
    }

    #[test]
    fn test_from_toml_str_empty_uses_defaults() {
        let config = StreamConfig::from_toml_str("").unwrap();
        assert_eq!(config, StreamConfig::default());
    }

    #[test]
    fn test_from_toml_str_invalid() {
        let err = StreamConfig::from_toml_str("channel_capacity = \"many\"").unwrap_err();
        assert!(matches!(err, StreamError::Config(_)));
    }

    #[test]
    fn test_from_json_str() {
        let config = StreamConfig::from_json_str(r#"{"channel_capacity": 2}"#).unwrap();
        assert_eq!(config.channel_capacity, 2);
    }

    // === Validation ===

    #[test]
    fn test_capacity_at_maximum_is_accepted() {
        let content = format!("channel_capacity = {}", MAX_CHANNEL_CAPACITY);
        let config = StreamConfig::from_toml_str(&content).unwrap();
        assert_eq!(config.channel_capacity, MAX_CHANNEL_CAPACITY);
    }

    #[test]
    fn test_capacity_above_maximum_is_rejected() {
        let content = format!("channel_capacity = {}", MAX_CHANNEL_CAPACITY + 1);
        let err = StreamConfig::from_toml_str(&content).unwrap_err();
        assert!(matches!(err, StreamError::Config(ref msg) if msg.contains("exceeds maximum")));
    }

    #[test]
    fn test_huge_capacity_is_rejected() {
        let err = StreamConfig::from_toml_str("channel_capacity = 9223372036854775807").unwrap_err();
        assert!(matches!(err, StreamError::Config(_)));

        let err =
            StreamConfig::from_json_str(r#"{"channel_capacity": 9223372036854775807}"#).unwrap_err();
        assert!(matches!(err, StreamError::Config(_)));
    }

    #[test]
    fn test_validate_builder_value() {
        assert!(StreamConfig::new().with_channel_capacity(usize::MAX).validate().is_err());
        assert!(StreamConfig::new().with_channel_capacity(0).validate().is_ok());
    }

    // === Files ===

    #[test]
    fn test_load_toml_file() {
        let path = std::env::temp_dir().join(format!("edge-stream-{}.toml", std::process::id()));
        std::fs::write(&path, "channel_capacity = 8\n").unwrap();

        let config = StreamConfig::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.channel_capacity, 8);
    }

    #[test]
    fn test_load_json_file() {
        let path = std::env::temp_dir().join(format!("edge-stream-{}.json", std::process::id()));
        std::fs::write(&path, r#"{"channel_capacity": 32}"#).unwrap();

        let config = StreamConfig::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.channel_capacity, 32);
    }

    #[test]
    fn test_load_rejects_oversized_capacity() {
        let path = std::env::temp_dir().join(format!("edge-stream-big-{}.toml", std::process::id()));
        std::fs::write(&path, "channel_capacity = 1000000\n").unwrap();

        let result = StreamConfig::load(&path);
        std::fs::remove_file(&path).unwrap();

        let err = result.unwrap_err();
        assert!(err.to_string().contains("Failed to parse stream config"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = StreamConfig::load("/nonexistent/edge-stream.toml").unwrap_err();
        assert!(err.to_string().contains("Failed to read stream config"));
    }
}
