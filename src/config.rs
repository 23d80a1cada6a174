use serde::Deserialize;
use std::path::Path;

/// Run configuration for the demonstration binary, loaded from an optional
/// TOML file and falling back to defaults when absent or unparsable.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Wall-clock budget for a `regenerate` call, in seconds. `None` means
    /// no deadline.
    pub regenerate_timeout_secs: Option<u64>,
    /// Calendar date the demo walkthrough treats as "today".
    pub demo_date: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            regenerate_timeout_secs: Some(5),
            demo_date: "2025-09-01".to_string(),
        }
    }
}

pub fn load_config_or_default(path: &Path) -> EngineConfig {
    if path.exists() {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).unwrap_or_default(),
            Err(_) => EngineConfig::default(),
        }
    } else {
        EngineConfig::default()
    }
}
