//! User configuration loaded from `config.toml`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::calculator::AngleUnit;

const APP_DIR: &str = "champis-calc";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub calculator: CalculatorConfig,
    pub display: DisplayConfig,
    pub history: HistoryConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorConfig {
    pub angle_unit: AngleUnit,
    /// Shown in place of the result when an expression cannot be evaluated.
    pub error_message: String,
    /// Relative accuracy for decimal to fraction conversion, in (0, 1).
    pub fraction_accuracy: f64,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            angle_unit: AngleUnit::Degrees,
            error_message: "Syntax Error".to_string(),
            fraction_accuracy: 1e-6,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub operator_color: String,
    pub function_color: String,
    pub error_color: String,
    pub pi_symbol: String,
    pub sqrt_symbol: String,
    pub styled: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            operator_color: "#FF9933".to_string(),
            function_color: "#66B2FF".to_string(),
            error_color: "#FF5555".to_string(),
            pi_symbol: "π".to_string(),
            sqrt_symbol: "√".to_string(),
            styled: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Keep history between runs.
    pub persist: bool,
    /// Overrides the default history file location.
    pub path: Option<PathBuf>,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            persist: true,
            path: None,
        }
    }
}

impl Config {
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
            .join("config.toml")
    }

    /// Load the configuration, falling back to defaults when the file does
    /// not exist.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path.map(Path::to_path_buf).unwrap_or_else(Self::default_path);

        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config = Self::from_toml(&contents)
            .with_context(|| format!("invalid config {}", path.display()))?;

        info!(path = %path.display(), "config loaded");
        Ok(config)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        let accuracy = self.calculator.fraction_accuracy;
        if !(accuracy > 0.0 && accuracy < 1.0) {
            bail!("fraction_accuracy must be between 0 and 1 (exclusive), got {}", accuracy);
        }
        Ok(())
    }

    /// Where the history is stored, if it is persisted at all.
    pub fn history_path(&self) -> Option<PathBuf> {
        if !self.history.persist {
            return None;
        }

        self.history.path.clone().or_else(|| {
            dirs::data_dir().map(|dir| dir.join(APP_DIR).join("history.json"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.calculator.angle_unit, AngleUnit::Degrees);
    }

    #[test]
    fn test_partial_file() {
        let config = Config::from_toml(
            r#"
            [calculator]
            angle_unit = "radians"

            [display]
            styled = false
            "#,
        )
        .unwrap();
        assert_eq!(config.calculator.angle_unit, AngleUnit::Radians);
        assert_eq!(config.calculator.error_message, "Syntax Error");
        assert!(!config.display.styled);
        assert_eq!(config.display.pi_symbol, "π");
    }

    #[test]
    fn test_accuracy_is_validated() {
        let err = Config::from_toml("[calculator]\nfraction_accuracy = 1.5\n").unwrap_err();
        assert!(err.to_string().contains("fraction_accuracy"));
    }

    #[test]
    fn test_history_path() {
        let mut config = Config::default();
        config.history.path = Some(PathBuf::from("/tmp/history.json"));
        assert_eq!(config.history_path(), Some(PathBuf::from("/tmp/history.json")));

        config.history.persist = false;
        assert_eq!(config.history_path(), None);
    }

    #[test]
    fn test_round_trip_through_toml() {
        let config = Config::default();
        let text = toml::to_string(&config).unwrap();
        assert_eq!(Config::from_toml(&text).unwrap(), config);
    }

    #[test]
    fn test_load_missing_file() {
        let path = std::env::temp_dir().join("champis-calc-missing/config.toml");
        assert_eq!(Config::load(Some(&path)).unwrap(), Config::default());
    }
}
