//! Configuration loading from TOML and JSON files

mod anim;
mod constants;
mod special;

pub use anim::{AnimEntry, AnimationTable};
pub use constants::{DamageConstants, DurationConstants, EngineConstants, TimingConstants};
pub use special::{SpecialTags, TagValue};

use std::fs;
use std::path::Path;
use thiserror::Error;

/// Configuration loading error
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Configuration validation error: {0}")]
    Validation(String),
}

/// Load a TOML file and deserialize it
pub fn load_toml<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_toml(&content)
}

/// Deserialize a TOML string
pub fn parse_toml<T: serde::de::DeserializeOwned>(content: &str) -> Result<T, ConfigError> {
    let config: T = toml::from_str(content)?;
    Ok(config)
}

/// Load a JSON file (game data dumps, animation tables) and deserialize it
pub fn load_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_json(&content)
}

/// Deserialize a JSON string
pub fn parse_json<T: serde::de::DeserializeOwned>(content: &str) -> Result<T, ConfigError> {
    let data: T = serde_json::from_str(content)?;
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_parse_errors_are_typed() {
        let err = parse_toml::<HashMap<String, f64>>("not = [valid").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));

        let err = parse_json::<HashMap<String, f64>>("{").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = load_toml::<HashMap<String, f64>>(Path::new("/nonexistent/engine.toml"))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
