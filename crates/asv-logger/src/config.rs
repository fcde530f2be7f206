use serde::{Deserialize, Serialize};

use crate::error::{LogError, Result};
use crate::level::Level;
use crate::tracing_sink::TracingSink;

/// Configuration for the default tracing-backed sink.
///
/// Missing keys fall back to [`LogConfig::default`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Minimum level passed on to the sink.
    pub level: Level,
    /// Source name attached to every record.
    pub source: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Level::Info,
            source: "asv".to_string(),
        }
    }
}

impl LogConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| LogError::Config(e.to_string()))
    }

    /// Build the sink described by this configuration.
    pub fn build_sink(&self) -> TracingSink {
        TracingSink::new(self.source.clone(), self.level)
    }
}
