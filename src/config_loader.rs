use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::config::ChronicaConfig;
use crate::errors::{ChronicaError, ChronicaResult};

/// Load configuration from defaults, `chronica.toml` and `CHRONICA_*`
/// environment variables, in increasing precedence.
pub fn load_config() -> ChronicaResult<ChronicaConfig> {
    let figment = Figment::from(Serialized::defaults(ChronicaConfig::default()))
        .merge(Toml::file("chronica.toml"))
        .merge(Env::prefixed("CHRONICA_"));

    let config: ChronicaConfig = figment.extract()?;
    validate_config(&config)?;
    Ok(config)
}

/// Structural checks applied after extraction.
pub fn validate_config(config: &ChronicaConfig) -> ChronicaResult<()> {
    if config.data_dir.trim().is_empty() {
        return Err(ChronicaError::config("data_dir cannot be empty"));
    }
    match config.sink.backend.as_str() {
        "sled" | "jsonl" => Ok(()),
        other => Err(ChronicaError::config(format!(
            "unknown sink backend '{other}', expected 'sled' or 'jsonl'"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SinkSettings;

    #[test]
    fn default_config_validates() {
        assert!(validate_config(&ChronicaConfig::default()).is_ok());
    }

    #[test]
    fn unknown_backends_are_rejected() {
        let config = ChronicaConfig {
            data_dir: "./data".to_string(),
            sink: SinkSettings {
                backend: "postgres".to_string(),
                jsonl_path: None,
            },
        };
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn empty_data_dir_is_rejected() {
        let config = ChronicaConfig {
            data_dir: "  ".to_string(),
            sink: SinkSettings::default(),
        };
        assert!(validate_config(&config).is_err());
    }
}
