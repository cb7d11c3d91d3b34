//! Configuration file support for Lunara.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/lunara/config.toml`.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub cycle: CycleConfig,
}

/// Data storage configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// Cycle assumptions used before a profile exists
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CycleConfig {
    #[serde(default = "default_cycle_length")]
    pub default_cycle_length: u32,

    #[serde(default = "default_period_length")]
    pub default_period_length: u32,
}

impl Default for CycleConfig {
    fn default() -> Self {
        Self {
            default_cycle_length: default_cycle_length(),
            default_period_length: default_period_length(),
        }
    }
}

// Default value functions
fn default_data_dir() -> PathBuf {
    let base = dirs::data_local_dir().unwrap_or_else(|| {
        let home = std::env::var("HOME").expect("HOME environment variable not set");
        PathBuf::from(home).join(".local/share")
    });
    base.join("lunara")
}

fn default_cycle_length() -> u32 {
    crate::engine::DEFAULT_CYCLE_LENGTH
}

fn default_period_length() -> u32 {
    crate::engine::DEFAULT_PERIOD_LENGTH
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!("No config file found at {:?}, using defaults", config_path);
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir().unwrap_or_else(|| {
            let home = std::env::var("HOME").expect("HOME environment variable not set");
            PathBuf::from(home).join(".config")
        });
        base.join("lunara").join("config.toml")
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.cycle.default_cycle_length, 28);
        assert_eq!(config.cycle.default_period_length, 5);
    }

    #[test]
    fn test_config_roundtrip() {
        let config = Config::default();
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();

        assert_eq!(
            config.cycle.default_cycle_length,
            parsed.cycle.default_cycle_length
        );
        assert_eq!(config.data.data_dir, parsed.data.data_dir);
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r#"
[cycle]
default_cycle_length = 30
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.cycle.default_cycle_length, 30);
        assert_eq!(config.cycle.default_period_length, 5); // default
    }

    #[test]
    fn test_save_and_reload() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.toml");

        let mut config = Config::default();
        config.cycle.default_cycle_length = 30;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.cycle.default_cycle_length, 30);
    }
}
