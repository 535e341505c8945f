use crate::artifact::ArtifactStyle;
use crate::checksum::HashAlgorithm;
use crate::resolve::DetectOptions;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

fn default_contact() -> String {
    DetectOptions::default().contact
}

/// Global configuration loaded from `~/.config/binver/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BinverConfig {
    /// Hash algorithm used when neither the CLI nor the catalog names one.
    #[serde(default)]
    pub algorithm: HashAlgorithm,
    /// Who to contact with an unknown-version artifact.
    #[serde(default = "default_contact")]
    pub contact: String,
    /// Directory for unknown-version artifacts (None = current directory).
    #[serde(default)]
    pub artifact_dir: Option<PathBuf>,
    /// Default catalog file for `binver detect`.
    #[serde(default)]
    pub catalog: Option<PathBuf>,
}

impl Default for BinverConfig {
    fn default() -> Self {
        Self {
            algorithm: HashAlgorithm::default(),
            contact: default_contact(),
            artifact_dir: None,
            catalog: None,
        }
    }
}

impl BinverConfig {
    /// Resolver options from this config.
    pub fn detect_options(&self) -> DetectOptions {
        DetectOptions {
            contact: self.contact.clone(),
            artifact_dir: self
                .artifact_dir
                .clone()
                .unwrap_or_else(|| PathBuf::from(".")),
            style: ArtifactStyle::VersionHash,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("binver")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<BinverConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = BinverConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: BinverConfig = toml::from_str(&data)?;
    Ok(cfg)
}
