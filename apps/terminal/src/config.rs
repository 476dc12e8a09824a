//! # Terminal Configuration
//!
//! Where state is stored, how receipts look, and what the inventory starts
//! with.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Command line flags (highest priority)                               │
//! │     --memory, --data-dir                                                │
//! │                                                                         │
//! │  2. Environment Variables                                               │
//! │     QUICKBILL_STORAGE=memory                                            │
//! │     QUICKBILL_DATA_DIR=/srv/quickbill                                   │
//! │     QUICKBILL_PRINT_DELAY_MS=0                                          │
//! │     QUICKBILL_CURRENCY=PKR                                              │
//! │                                                                         │
//! │  3. TOML Config File                                                    │
//! │     ~/.config/quickbill/quickbill.toml (Linux)                          │
//! │     ~/Library/Application Support/com.quickbill.quickbill/... (macOS)   │
//! │                                                                         │
//! │  4. Default Values (lowest priority)                                    │
//! │     file storage in the platform data dir, 300 ms print delay, "RS."   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # quickbill.toml
//! [storage]
//! backend = "file"   # file | memory
//! data_dir = "/srv/quickbill"
//!
//! [receipt]
//! print_delay_ms = 300
//! currency = "RS."
//!
//! [[inventory.seed]]
//! id = "tea"
//! name = "Tea"
//! rate = 12.0
//! category = "Beverage"
//! ```

use std::collections::HashSet;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use quickbill_core::validation::{validate_category, validate_item_name, validate_rate};
use quickbill_core::{Item, ReceiptOptions};

use crate::error::{AppError, AppResult};

const CONFIG_FILE_NAME: &str = "quickbill.toml";

/// Upper bound for the receipt delay; anything longer is a typo.
const MAX_PRINT_DELAY_MS: u64 = 60_000;

// =============================================================================
// Storage Backend
// =============================================================================

/// Which key/value backend holds persisted state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    /// One file per key in the data directory.
    #[default]
    File,

    /// Process memory only; everything is lost on exit.
    Memory,
}

impl std::fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageBackend::File => write!(f, "file"),
            StorageBackend::Memory => write!(f, "memory"),
        }
    }
}

impl std::str::FromStr for StorageBackend {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "file" | "files" | "disk" => Ok(StorageBackend::File),
            "memory" | "mem" => Ok(StorageBackend::Memory),
            other => Err(AppError::InvalidConfig(format!(
                "Unknown storage backend: '{}'. Valid options: file, memory",
                other
            ))),
        }
    }
}

// =============================================================================
// Sections
// =============================================================================

/// `[storage]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageSettings {
    #[serde(default)]
    pub backend: StorageBackend,

    /// Data directory for the file backend. Defaults to the platform data dir.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

/// `[receipt]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReceiptSettings {
    /// Pause between saving a transaction and printing its receipt.
    #[serde(default = "default_print_delay")]
    pub print_delay_ms: u64,

    /// Label printed before every amount.
    #[serde(default = "default_currency")]
    pub currency: String,

    #[serde(default = "default_title")]
    pub title: String,

    /// Receipt line width in characters.
    #[serde(default = "default_width")]
    pub width: usize,
}

fn default_print_delay() -> u64 {
    300
}

fn default_currency() -> String {
    "RS.".to_string()
}

fn default_title() -> String {
    "Business Receipt".to_string()
}

fn default_width() -> usize {
    40
}

impl Default for ReceiptSettings {
    fn default() -> Self {
        ReceiptSettings {
            print_delay_ms: default_print_delay(),
            currency: default_currency(),
            title: default_title(),
            width: default_width(),
        }
    }
}

/// `[inventory]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InventorySettings {
    /// Items used when the inventory key has never been written.
    #[serde(default)]
    pub seed: Vec<Item>,
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete terminal configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuickBillConfig {
    #[serde(default)]
    pub storage: StorageSettings,

    #[serde(default)]
    pub receipt: ReceiptSettings,

    #[serde(default)]
    pub inventory: InventorySettings,
}

impl QuickBillConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (quickbill.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> AppResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> AppResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| AppError::InvalidConfig("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;

        info!(?path, "Config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> AppResult<()> {
        if self.receipt.print_delay_ms > MAX_PRINT_DELAY_MS {
            return Err(AppError::InvalidConfig(format!(
                "receipt.print_delay_ms must be at most {}",
                MAX_PRINT_DELAY_MS
            )));
        }

        if self.receipt.currency.trim().is_empty() {
            return Err(AppError::InvalidConfig(
                "receipt.currency must not be empty".into(),
            ));
        }

        if !(24..=120).contains(&self.receipt.width) {
            return Err(AppError::InvalidConfig(
                "receipt.width must be between 24 and 120".into(),
            ));
        }

        if let Some(dir) = &self.storage.data_dir {
            if dir.as_os_str().is_empty() {
                return Err(AppError::InvalidConfig(
                    "storage.data_dir must not be empty".into(),
                ));
            }
        }

        let mut seen = HashSet::new();
        for item in &self.inventory.seed {
            if item.id.trim().is_empty() {
                return Err(AppError::InvalidConfig(
                    "inventory.seed entries need an id".into(),
                ));
            }
            if !seen.insert(item.id.as_str()) {
                return Err(AppError::InvalidConfig(format!(
                    "inventory.seed has duplicate id '{}'",
                    item.id
                )));
            }
            validate_item_name(&item.name)?;
            validate_category(&item.category)?;
            validate_rate(item.rate)?;
        }

        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from `lookup`, which maps a variable name to its
    /// value. Unparseable values are logged and skipped.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(backend) = lookup("QUICKBILL_STORAGE") {
            match backend.parse() {
                Ok(parsed) => {
                    debug!(backend = %backend, "Overriding storage backend from environment");
                    self.storage.backend = parsed;
                }
                Err(_) => warn!(backend = %backend, "Unknown storage backend in environment"),
            }
        }

        if let Some(dir) = lookup("QUICKBILL_DATA_DIR") {
            debug!(dir = %dir, "Overriding data dir from environment");
            self.storage.data_dir = Some(PathBuf::from(dir));
        }

        if let Some(delay) = lookup("QUICKBILL_PRINT_DELAY_MS") {
            match delay.parse::<u64>() {
                Ok(ms) => self.receipt.print_delay_ms = ms,
                Err(_) => warn!(delay = %delay, "Invalid print delay in environment"),
            }
        }

        if let Some(currency) = lookup("QUICKBILL_CURRENCY") {
            self.receipt.currency = currency;
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// Directory for the file backend: configured, else the platform data dir.
    pub fn data_dir(&self) -> AppResult<PathBuf> {
        if let Some(dir) = &self.storage.data_dir {
            return Ok(dir.clone());
        }
        project_dirs()
            .map(|dirs| dirs.data_dir().to_path_buf())
            .ok_or_else(|| AppError::InvalidConfig("Could not determine app data directory".into()))
    }

    pub fn print_delay(&self) -> Duration {
        Duration::from_millis(self.receipt.print_delay_ms)
    }

    pub fn receipt_options(&self) -> ReceiptOptions {
        ReceiptOptions {
            title: self.receipt.title.clone(),
            currency: self.receipt.currency.clone(),
            width: self.receipt.width,
        }
    }
}

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("com", "quickbill", "quickbill")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = QuickBillConfig::default();
        assert_eq!(config.storage.backend, StorageBackend::File);
        assert_eq!(config.receipt.print_delay_ms, 300);
        assert_eq!(config.receipt.currency, "RS.");
        assert!(config.inventory.seed.is_empty());
        assert!(config.validate().is_ok());
        assert_eq!(config.receipt_options(), ReceiptOptions::default());
    }

    #[test]
    fn test_backend_parsing() {
        assert_eq!("file".parse::<StorageBackend>().unwrap(), StorageBackend::File);
        assert_eq!("MEMORY".parse::<StorageBackend>().unwrap(), StorageBackend::Memory);
        assert!("redis".parse::<StorageBackend>().is_err());
    }

    #[test]
    fn test_parse_toml_with_seed() {
        let config: QuickBillConfig = toml::from_str(
            r#"
            [storage]
            backend = "memory"

            [receipt]
            print_delay_ms = 0
            currency = "PKR"

            [[inventory.seed]]
            id = "tea"
            name = "Tea"
            rate = 12.0
            category = "Beverage"
            "#,
        )
        .unwrap();

        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.receipt.print_delay_ms, 0);
        assert_eq!(config.receipt.currency, "PKR");
        assert_eq!(config.receipt.width, 40);
        assert_eq!(config.inventory.seed.len(), 1);
        assert_eq!(config.inventory.seed[0].rate, 12.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_overrides() {
        let mut config = QuickBillConfig::default();
        config.apply_overrides(env(&[
            ("QUICKBILL_STORAGE", "memory"),
            ("QUICKBILL_DATA_DIR", "/tmp/qb"),
            ("QUICKBILL_PRINT_DELAY_MS", "5"),
            ("QUICKBILL_CURRENCY", "USD"),
        ]));

        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.storage.data_dir, Some(PathBuf::from("/tmp/qb")));
        assert_eq!(config.print_delay(), Duration::from_millis(5));
        assert_eq!(config.receipt.currency, "USD");
    }

    #[test]
    fn test_bad_env_values_are_skipped() {
        let mut config = QuickBillConfig::default();
        config.apply_overrides(env(&[
            ("QUICKBILL_STORAGE", "cloud"),
            ("QUICKBILL_PRINT_DELAY_MS", "soon"),
        ]));

        assert_eq!(config.storage.backend, StorageBackend::File);
        assert_eq!(config.receipt.print_delay_ms, 300);
    }

    #[test]
    fn test_config_validation() {
        let mut config = QuickBillConfig::default();
        config.receipt.print_delay_ms = 120_000;
        assert!(config.validate().is_err());

        let mut config = QuickBillConfig::default();
        config.receipt.currency = " ".to_string();
        assert!(config.validate().is_err());

        let item = Item {
            id: "tea".to_string(),
            name: "Tea".to_string(),
            rate: 12.0,
            category: "Beverage".to_string(),
        };
        let mut config = QuickBillConfig::default();
        config.inventory.seed = vec![item.clone(), item.clone()];
        assert!(config.validate().is_err());

        config.inventory.seed = vec![Item { rate: -1.0, ..item }];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_save_and_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE_NAME);

        let mut config = QuickBillConfig::default();
        config.storage.data_dir = Some(dir.path().join("data"));
        config.receipt.print_delay_ms = 10;
        config.save(Some(path.clone())).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("[storage]"));
        assert!(contents.contains("[receipt]"));

        let loaded: QuickBillConfig = toml::from_str(&contents).unwrap();
        assert_eq!(loaded.receipt.print_delay_ms, 10);
        assert_eq!(loaded.data_dir().unwrap(), dir.path().join("data"));
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[receipt]\nprint_delay_ms = \"slow\"\n").unwrap();

        assert!(matches!(
            QuickBillConfig::load(Some(path)),
            Err(AppError::ConfigParse(_))
        ));
    }
}
