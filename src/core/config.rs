//! # Configuration
//!
//! Centralizes settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.atlas/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;

use crate::remote::rest_countries::DEFAULT_BASE_URL;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct AtlasConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub api: ApiConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Directory holding favorites.json. Defaults to ~/.atlas
    pub data_dir: Option<String>,
    /// Region applied to `list` when no --region flag is given.
    pub default_region: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ApiConfig {
    pub base_url: Option<String>,
}

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub base_url: String,
    pub data_dir: PathBuf,
    pub default_region: Option<String>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.atlas/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".atlas").join("config.toml"))
}

fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(".atlas"))
        .unwrap_or_else(|| PathBuf::from(".atlas"))
}

/// Load config from `~/.atlas/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `AtlasConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<AtlasConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(AtlasConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(AtlasConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config: AtlasConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &PathBuf) {
    let default_content = r#"# Atlas Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# data_dir = "/home/me/.atlas"       # Where favorites.json lives
# default_region = "Europe"          # Region applied to `list` by default

# [api]
# base_url = "https://restcountries.com/v3.1"   # Or set ATLAS_API_BASE_URL
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env.
pub fn resolve(config: &AtlasConfig) -> ResolvedConfig {
    // Base URL: env → config → default
    let base_url = std::env::var("ATLAS_API_BASE_URL")
        .ok()
        .or_else(|| config.api.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    // Data dir: env → config → ~/.atlas
    let data_dir = std::env::var("ATLAS_DATA_DIR")
        .ok()
        .map(PathBuf::from)
        .or_else(|| config.general.data_dir.clone().map(PathBuf::from))
        .unwrap_or_else(default_data_dir);

    ResolvedConfig {
        base_url,
        data_dir,
        default_region: config.general.default_region.clone(),
    }
}
