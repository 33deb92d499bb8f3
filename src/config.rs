use anyhow::{Context, Result};
use secretdoors_core::BlockCatalog;
use secretdoors_openable::DispatchConfig;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::warn;

pub const DEFAULT_CONFIG_PATH: &str = "secretdoors.toml";

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SecretDoorsConfig {
    #[serde(flatten)]
    pub dispatch: DispatchConfig,
    /// JSON file of extra block catalog rows, relative to the config file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blocks: Option<PathBuf>,
}

impl SecretDoorsConfig {
    /// Load configuration from an explicit path, falling back to defaults on errors.
    pub fn load_from_path(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<SecretDoorsConfig>(&contents) {
                Ok(cfg) => cfg,
                Err(err) => {
                    warn!("Failed to parse {}: {err}. Using defaults", path.display());
                    SecretDoorsConfig::default()
                }
            },
            Err(err) => {
                if path != Path::new(DEFAULT_CONFIG_PATH)
                    || err.kind() != std::io::ErrorKind::NotFound
                {
                    warn!("Failed to read {}: {err}. Using defaults", path.display());
                }
                SecretDoorsConfig::default()
            }
        }
    }

    /// Save configuration to an explicit path.
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        let toml = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        Ok(())
    }

    /// The built-in block catalog plus any rows from `blocks`, resolved
    /// against `base_dir`.
    pub fn load_catalog(&self, base_dir: &Path) -> Result<BlockCatalog> {
        let Some(blocks) = &self.blocks else {
            return Ok(BlockCatalog::builtin());
        };
        let path = base_dir.join(blocks);
        BlockCatalog::load_from_path(&path)
            .with_context(|| format!("Failed to load block catalog {}", path.display()))
    }
}
