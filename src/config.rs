// Runtime configuration types for the chronica CLI.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChronicaConfig {
    /// Directory holding the embedded store and, by default, the JSONL
    /// audit file.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    #[serde(default)]
    pub sink: SinkSettings,
}

/// Persistence backend selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SinkSettings {
    /// "sled" or "jsonl".
    #[serde(default = "default_backend")]
    pub backend: String,
    /// Audit file path when `backend = "jsonl"`; defaults under `data_dir`.
    #[serde(default)]
    pub jsonl_path: Option<String>,
}

fn default_backend() -> String {
    "sled".to_string()
}

fn default_data_dir() -> String {
    dirs::data_local_dir()
        .map(|dir| dir.join("chronica").to_string_lossy().to_string())
        .unwrap_or_else(|| "./data/chronica".to_string())
}

impl Default for SinkSettings {
    fn default() -> Self {
        SinkSettings {
            backend: default_backend(),
            jsonl_path: None,
        }
    }
}

impl Default for ChronicaConfig {
    fn default() -> Self {
        ChronicaConfig {
            data_dir: default_data_dir(),
            sink: SinkSettings::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_select_the_sled_backend() {
        let config = ChronicaConfig::default();
        assert_eq!(config.sink.backend, "sled");
        assert!(config.sink.jsonl_path.is_none());
        assert!(!config.data_dir.is_empty());
    }
}
