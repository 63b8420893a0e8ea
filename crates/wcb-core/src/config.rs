//! Configuration management for wcb-privacy

use crate::error::{PrivacyError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Export settings
    pub export: ExportConfig,
    /// Storage settings
    pub storage: StorageConfig,
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// A relative `storage.snapshot` is resolved against the directory
    /// holding the config file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(PrivacyError::FileNotFound(path.to_path_buf()));
        }
        let content = fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&content)
            .map_err(|e| PrivacyError::from(e).with_context(format!("Failed to parse {}", path.display())))?;
        config.validate()?;

        if let (Some(snapshot), Some(base)) = (config.storage.snapshot.as_mut(), path.parent()) {
            if snapshot.is_relative() {
                *snapshot = base.join(&*snapshot);
            }
        }
        Ok(config)
    }

    /// Load configuration, falling back to defaults when the file is missing
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!("No config at {:?}, using defaults", path);
            Ok(Self::default())
        }
    }

    /// Write configuration as TOML
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    /// Serialize to a TOML string
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<()> {
        if self.export.max_pages == 0 {
            return Err(PrivacyError::Config(
                "export.max_pages must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Export-related configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Pretty-print JSON output
    pub pretty: bool,
    /// Upper bound on pages requested from a single exporter
    pub max_pages: u32,
    /// Registry keys of exporters to run (empty runs all)
    pub exporters: Vec<String>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            pretty: true,
            max_pages: 1000,
            exporters: Vec::new(),
        }
    }
}

/// Storage-related configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// JSON snapshot holding users, records and metadata
    ///
    /// Unset means the platform data directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snapshot: Option<PathBuf>,
}
