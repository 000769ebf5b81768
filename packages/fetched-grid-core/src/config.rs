//! Adapter configuration.

use serde::Deserialize;

/// Results adapter configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AdapterConfig {
    /// Name used to tag log lines of this adapter
    pub name: String,
    /// Report one empty group when the result set has none
    pub placeholder_group_when_empty: bool,
    /// Log malformed and out-of-cycle events at debug level when dropping them
    pub log_dropped_events: bool,
}

impl AdapterConfig {
    /// Parses a configuration from JSON, filling missing fields with defaults.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            name: "results".to_string(),
            placeholder_group_when_empty: true,
            log_dropped_events: true,
        }
    }
}
