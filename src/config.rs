//! # Configuration Management Module
//!
//! Questo modulo gestisce la configurazione dell'ottimizzatore.
//!
//! ## Responsabilità:
//! - Definisce la struct `Config` passata esplicitamente all'`Optimizer`
//! - Legge le variabili d'ambiente di deployment
//! - Supporta caricamento/salvataggio configurazione da/verso file JSON
//! - Fornisce valori di default sensati per tutti i parametri
//!
//! ## Parametri di configurazione:
//! - `tools`: Tool abilitati (default: tutti e sei)
//! - `debug`: Salva una copia `<file>.orig` prima di ottimizzare (default: false)
//! - `legacy_always_false`: `optimize` restituisce sempre `false`, anche in
//!   caso di successo (default: true, compatibilità con il comportamento storico)
//!
//! ## Variabili d'ambiente:
//! - `IMAGES_OPTIMIZE_TOOLS`: Lista separata da virgole, es. `jpegtran,optipng`
//! - `IMAGES_DEBUG`: `1`/`true`/`yes`/`on` per attivare la copia di debug
//! - `IMAGES_LEGACY_RESULT`: `0`/`false`/`no`/`off` per riportare i successi
//!
//! ## Esempio:
//! ```rust
//! use image_optimizer::{Config, ToolSet};
//!
//! let config = Config {
//!     tools: "jpegtran,optipng".parse::<ToolSet>().unwrap(),
//!     debug: true,
//!     ..Default::default()
//! };
//! assert!(config.legacy_always_false);
//! ```

use crate::error::OptimizeError;
use crate::tool::ToolSet;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const ENV_TOOLS: &str = "IMAGES_OPTIMIZE_TOOLS";
pub const ENV_DEBUG: &str = "IMAGES_DEBUG";
pub const ENV_LEGACY_RESULT: &str = "IMAGES_LEGACY_RESULT";

/// Configuration for image optimization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Tools enabled for this deployment
    pub tools: ToolSet,
    /// Keep a `<file>.orig` copy of every file before optimizing it
    pub debug: bool,
    /// Report `false` even when optimization succeeded.
    /// Historical callers rely on this; turn it off to get real results.
    pub legacy_always_false: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tools: ToolSet::default(),
            debug: false,
            legacy_always_false: true,
        }
    }
}

impl Config {
    /// Build a configuration from the process environment
    pub fn from_env() -> Result<Self, OptimizeError> {
        Self::default().merge_env(|key| std::env::var(key).ok())
    }

    /// Override fields with the values `lookup` returns for the env keys
    pub fn merge_env<F>(mut self, lookup: F) -> Result<Self, OptimizeError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(tools) = lookup(ENV_TOOLS) {
            self.tools = tools.parse()?;
        }
        if let Some(debug) = lookup(ENV_DEBUG) {
            self.debug = parse_flag(ENV_DEBUG, &debug)?;
        }
        if let Some(legacy) = lookup(ENV_LEGACY_RESULT) {
            self.legacy_always_false = parse_flag(ENV_LEGACY_RESULT, &legacy)?;
        }
        Ok(self)
    }

    /// Load configuration from file, falling back to defaults when it is missing
    pub async fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = tokio::fs::read_to_string(path).await?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to file
    pub async fn save_to_file(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        tokio::fs::write(path, content).await?;
        Ok(())
    }
}

/// Parse a boolean env value the way deployment scripts usually spell it
pub fn parse_flag(key: &str, value: &str) -> Result<bool, OptimizeError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "" | "0" | "false" | "no" | "off" => Ok(false),
        other => Err(OptimizeError::Config(format!(
            "{} must be a boolean, got '{}'",
            key, other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tool::ToolName;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.tools, ToolSet::default());
        assert!(!config.debug);
        assert!(config.legacy_always_false);
    }

    #[test]
    fn test_merge_env() {
        let config = Config::default()
            .merge_env(env(&[
                (ENV_TOOLS, "jpegoptim"),
                (ENV_DEBUG, "True"),
                (ENV_LEGACY_RESULT, "off"),
            ]))
            .unwrap();
        assert!(config.tools.contains(ToolName::Jpegoptim));
        assert!(!config.tools.contains(ToolName::Jpegtran));
        assert!(config.debug);
        assert!(!config.legacy_always_false);
    }

    #[test]
    fn test_merge_env_untouched_when_unset() {
        let config = Config::default().merge_env(env(&[])).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_merge_env_rejects_bad_values() {
        assert!(Config::default().merge_env(env(&[(ENV_TOOLS, "pngquant")])).is_err());
        assert!(Config::default().merge_env(env(&[(ENV_DEBUG, "maybe")])).is_err());
    }

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("X", " YES ").unwrap());
        assert!(parse_flag("X", "1").unwrap());
        assert!(!parse_flag("X", "0").unwrap());
        assert!(!parse_flag("X", "").unwrap());
    }

    #[tokio::test]
    async fn test_config_save_load() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.json");

        let original_config = Config {
            tools: "gifsicle,pngcrush".parse().unwrap(),
            debug: true,
            legacy_always_false: false,
        };

        original_config.save_to_file(&config_path).await.unwrap();
        let loaded_config = Config::from_file(&config_path).await.unwrap();

        assert_eq!(loaded_config, original_config);
    }

    #[tokio::test]
    async fn test_config_partial_and_missing_file() {
        let temp_dir = TempDir::new().unwrap();

        let missing = Config::from_file(&temp_dir.path().join("nope.json")).await.unwrap();
        assert_eq!(missing, Config::default());

        let partial_path = temp_dir.path().join("partial.json");
        std::fs::write(&partial_path, r#"{ "debug": true }"#).unwrap();
        let partial = Config::from_file(&partial_path).await.unwrap();
        assert!(partial.debug);
        assert_eq!(partial.tools, ToolSet::default());
    }

    #[tokio::test]
    async fn test_config_rejects_unknown_tool_in_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bad.json");
        std::fs::write(&path, r#"{ "tools": ["mozjpeg"] }"#).unwrap();
        assert!(Config::from_file(&path).await.is_err());
    }
}
