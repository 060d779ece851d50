use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use glance_core::api::DEFAULT_MODEL;

#[derive(Debug, Serialize, Deserialize)]
pub struct GlanceConfig {
    pub store: StoreSection,
    pub security: SecuritySection,
    pub keyfile: KeyfileSection,
    #[serde(default)]
    pub api: ApiSection,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StoreSection {
    pub path: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SecuritySection {
    pub tier: SecurityTier,
}

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct KeyfileSection {
    pub path: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiSection {
    #[serde(default = "default_model")]
    pub model: String,
}

impl Default for ApiSection {
    fn default() -> Self {
        Self {
            model: default_model(),
        }
    }
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[serde(rename_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum SecurityTier {
    /// Passphrase from GLANCE_PASSPHRASE or a prompt
    Passphrase,
    /// Random key stored unencrypted on this device
    DeviceKeyfile,
}

impl GlanceConfig {
    pub fn new(
        store_path: PathBuf,
        tier: SecurityTier,
        keyfile_path: Option<PathBuf>,
        model: Option<String>,
    ) -> Self {
        Self {
            store: StoreSection {
                path: store_path.to_string_lossy().to_string(),
            },
            security: SecuritySection { tier },
            keyfile: KeyfileSection {
                path: keyfile_path.map(|path| path.to_string_lossy().to_string()),
            },
            api: ApiSection {
                model: model.unwrap_or_else(default_model),
            },
        }
    }
}

pub fn default_config_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_config_dir()?.join("config.toml"))
}

pub fn default_store_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_data_dir()?.join("secrets.json"))
}

pub fn default_keyfile_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_config_dir()?.join("device.key"))
}

pub fn read_config(path: &Path) -> anyhow::Result<GlanceConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read config {}: {}", path.display(), e))?;
    toml::from_str(&contents)
        .map_err(|e| anyhow::anyhow!("Failed to parse config {}: {}", path.display(), e))
}

pub fn write_config(path: &Path, config: &GlanceConfig) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            anyhow::anyhow!(
                "Failed to create config directory {}: {}",
                parent.display(),
                e
            )
        })?;
    }
    let contents =
        toml::to_string_pretty(config).map_err(|e| anyhow::anyhow!("TOML error: {}", e))?;
    std::fs::write(path, contents)
        .map_err(|e| anyhow::anyhow!("Failed to write config {}: {}", path.display(), e))?;
    Ok(())
}

pub fn xdg_config_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_CONFIG_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("glance"));
        }
    }
    Ok(home_dir()?.join(".config").join("glance"))
}

pub fn xdg_data_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_DATA_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("glance"));
        }
    }
    Ok(home_dir()?.join(".local").join("share").join("glance"))
}

fn home_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .map_err(|_| anyhow::anyhow!("HOME is not set; cannot resolve default paths"))?;
    Ok(PathBuf::from(home))
}
