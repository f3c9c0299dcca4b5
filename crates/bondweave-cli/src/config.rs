//! CLI configuration

use std::path::{Path, PathBuf};

use anyhow::Context;
use bondweave_core::EngineConfig;

/// Get default config file path
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("bondweave")
        .join("config.toml")
}

/// Load the engine config
///
/// An explicit path must exist; the default path falls back to built-in
/// defaults when absent.
pub fn load_engine_config(explicit: Option<&Path>) -> anyhow::Result<EngineConfig> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let path = default_config_path();
            if !path.exists() {
                tracing::debug!("No config at {:?}, using defaults", path);
                return Ok(EngineConfig::default());
            }
            path
        }
    };

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let config: EngineConfig = toml::from_str(&content)
        .with_context(|| format!("invalid config {}", path.display()))?;
    config.validate()?;

    tracing::debug!("Loaded config from {:?}: {:?}", path, config);
    Ok(config)
}
