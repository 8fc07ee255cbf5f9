use crate::core::codec::DEFAULT_MAX_MESSAGE_BYTES;
use crate::error::{AnteError, Result};
use crate::utils::MAX_DECODE_BYTES;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;
use std::sync::RwLock;

pub static GLOBAL_CONFIG: Lazy<Config> = Lazy::new(Config::new);

pub const DEFAULT_REGISTRY_PATH: &str = "data/fee_registry";
pub const DEFAULT_BECH32_PREFIX: &str = "archway";
pub const DEFAULT_MAX_DELEGATION_DEPTH: usize = 5;

const REGISTRY_PATH_KEY: &str = "FEE_REGISTRY_PATH";
const BECH32_PREFIX_KEY: &str = "BECH32_PREFIX";
const MAX_DELEGATION_DEPTH_KEY: &str = "MAX_DELEGATION_DEPTH";
const ENFORCE_FLAT_FEES_KEY: &str = "ENFORCE_FLAT_FEES";

/// Settings for the fee check and its registry store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Directory of the Sled registry database
    pub registry_path: String,
    /// Human-readable part expected on contract addresses
    pub bech32_prefix: String,
    /// Nested delegated-execution levels decoded before giving up
    pub max_delegation_depth: usize,
    /// Add contract flat fees to the required minimum
    pub enforce_flat_fees: bool,
    /// Largest wrapped message the codec will decode
    pub max_message_bytes: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            registry_path: DEFAULT_REGISTRY_PATH.to_string(),
            bech32_prefix: DEFAULT_BECH32_PREFIX.to_string(),
            max_delegation_depth: DEFAULT_MAX_DELEGATION_DEPTH,
            enforce_flat_fees: false,
            max_message_bytes: DEFAULT_MAX_MESSAGE_BYTES,
        }
    }
}

impl Settings {
    pub fn from_toml_str(raw: &str) -> Result<Settings> {
        let settings: Settings = toml::from_str(raw)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Settings> {
        let raw = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            AnteError::Config(format!(
                "Failed to read {}: {e}",
                path.as_ref().display()
            ))
        })?;
        Self::from_toml_str(&raw)
    }

    /// Override fields from process environment variables
    pub fn apply_env(mut self) -> Result<Settings> {
        if let Ok(path) = env::var(REGISTRY_PATH_KEY) {
            self.registry_path = path;
        }
        if let Ok(prefix) = env::var(BECH32_PREFIX_KEY) {
            self.bech32_prefix = prefix;
        }
        if let Ok(depth) = env::var(MAX_DELEGATION_DEPTH_KEY) {
            self.max_delegation_depth = depth.parse().map_err(|e| {
                AnteError::Config(format!("Invalid {MAX_DELEGATION_DEPTH_KEY} {depth:?}: {e}"))
            })?;
        }
        if let Ok(flag) = env::var(ENFORCE_FLAT_FEES_KEY) {
            self.enforce_flat_fees = parse_flag(&flag)?;
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        if self.bech32_prefix.is_empty() {
            return Err(AnteError::Config(
                "Bech32 prefix cannot be empty".to_string(),
            ));
        }
        if self.max_message_bytes == 0 {
            return Err(AnteError::Config(
                "Maximum message size cannot be zero".to_string(),
            ));
        }
        // messages larger than this never get past the bincode decode limit
        if self.max_message_bytes > MAX_DECODE_BYTES {
            return Err(AnteError::Config(format!(
                "Maximum message size {} exceeds the {MAX_DECODE_BYTES} byte decode limit",
                self.max_message_bytes
            )));
        }
        Ok(())
    }
}

fn parse_flag(raw: &str) -> Result<bool> {
    match raw.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(AnteError::Config(format!(
            "Invalid {ENFORCE_FLAT_FEES_KEY} value: {raw}"
        ))),
    }
}

/// Process-wide settings, seeded from the environment
pub struct Config {
    inner: RwLock<Settings>,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub fn new() -> Config {
        let settings = Settings::default().apply_env().unwrap_or_else(|e| {
            log::warn!("Ignoring environment overrides: {e}");
            Settings::default()
        });
        Config {
            inner: RwLock::new(settings),
        }
    }

    pub fn settings(&self) -> Settings {
        match self.inner.read() {
            Ok(settings) => settings.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn replace(&self, settings: Settings) {
        match self.inner.write() {
            Ok(mut inner) => *inner = settings,
            Err(_) => log::error!("Failed to acquire write lock on config"),
        }
    }

    pub fn get_registry_path(&self) -> String {
        self.settings().registry_path
    }

    pub fn set_registry_path(&self, path: String) {
        if let Ok(mut inner) = self.inner.write() {
            inner.registry_path = path;
        }
    }

    pub fn get_bech32_prefix(&self) -> String {
        self.settings().bech32_prefix
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.bech32_prefix, "archway");
        assert_eq!(settings.max_delegation_depth, DEFAULT_MAX_DELEGATION_DEPTH);
        assert!(!settings.enforce_flat_fees);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let settings = Settings::from_toml_str(
            r#"
            enforce_flat_fees = true
            max_delegation_depth = 2
            "#,
        )
        .unwrap();
        assert!(settings.enforce_flat_fees);
        assert_eq!(settings.max_delegation_depth, 2);
        assert_eq!(settings.registry_path, DEFAULT_REGISTRY_PATH);
    }

    #[test]
    fn test_invalid_toml() {
        assert!(Settings::from_toml_str("bech32_prefix = \"\"").is_err());
        assert!(Settings::from_toml_str("max_delegation_depth = \"deep\"").is_err());
        assert!(Settings::from_toml_str("max_message_bytes = 0").is_err());
    }

    #[test]
    fn test_message_size_within_decode_limit() {
        let at_limit = format!("max_message_bytes = {MAX_DECODE_BYTES}");
        assert!(Settings::from_toml_str(&at_limit).is_ok());

        let above = format!("max_message_bytes = {}", MAX_DECODE_BYTES + 1);
        assert!(matches!(
            Settings::from_toml_str(&above),
            Err(AnteError::Config(_))
        ));
    }

    #[test]
    fn test_load_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("ante.toml");
        std::fs::write(&path, "bech32_prefix = \"cosmos\"\n").unwrap();
        assert_eq!(Settings::load_file(&path).unwrap().bech32_prefix, "cosmos");
        assert!(Settings::load_file(temp_dir.path().join("missing.toml")).is_err());
    }

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("TRUE").unwrap());
        assert!(!parse_flag("off").unwrap());
        assert!(parse_flag("maybe").is_err());
    }

    #[test]
    fn test_config_replace() {
        let config = Config {
            inner: RwLock::new(Settings::default()),
        };
        config.set_registry_path("/tmp/registry".to_string());
        assert_eq!(config.get_registry_path(), "/tmp/registry");

        let mut settings = Settings::default();
        settings.bech32_prefix = "cosmos".to_string();
        config.replace(settings);
        assert_eq!(config.get_bech32_prefix(), "cosmos");
    }
}
