use crate::error::Result;
use crate::history::DEFAULT_MAX_ENTRIES;
use crate::paths;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// HistoryConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,
}

fn default_enabled() -> bool {
    true
}

fn default_max_entries() -> usize {
    DEFAULT_MAX_ENTRIES
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            max_entries: default_max_entries(),
        }
    }
}

// ---------------------------------------------------------------------------
// Config (top-level)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default = "default_specs_dir")]
    pub specs_dir: String,
    #[serde(default)]
    pub history: HistoryConfig,
}

fn default_version() -> u32 {
    1
}

fn default_specs_dir() -> String {
    paths::SPECS_DIR.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: default_version(),
            specs_dir: default_specs_dir(),
            history: HistoryConfig::default(),
        }
    }
}

impl Config {
    /// Load `.specflow/config.yaml`; a missing file yields the defaults.
    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::config_path(root);
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = std::fs::read_to_string(&path)?;
        let config: Config = serde_yaml::from_str(&data)?;
        Ok(config)
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let path = paths::config_path(root);
        let data = serde_yaml::to_string(self)?;
        crate::io::atomic_write(&path, data.as_bytes())
    }

    pub fn specs_root(&self, root: &Path) -> PathBuf {
        root.join(&self.specs_dir)
    }
}
