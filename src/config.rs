use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{ReleaseError, Result};

/// Represents the complete configuration for op-release.
///
/// Covers the manifest location, the build script invocation, and the
/// artifact pattern committed after a build. Every field has a default so an
/// empty (or absent) config file is valid.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    #[serde(default = "default_manifest")]
    pub manifest: String,

    #[serde(default)]
    pub build: BuildConfig,

    #[serde(default)]
    pub artifacts: ArtifactsConfig,
}

fn default_manifest() -> String {
    "info.toml".to_string()
}

/// Configuration for the external build invocation.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct BuildConfig {
    #[serde(default = "default_build_script")]
    pub script: String,

    #[serde(default = "default_build_mode")]
    pub mode: String,
}

fn default_build_script() -> String {
    "./build.sh".to_string()
}

fn default_build_mode() -> String {
    "release".to_string()
}

impl Default for BuildConfig {
    fn default() -> Self {
        BuildConfig {
            script: default_build_script(),
            mode: default_build_mode(),
        }
    }
}

/// Configuration for build-artifact staging.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ArtifactsConfig {
    /// Git pathspec matching the files the build produces.
    #[serde(default = "default_artifact_glob")]
    pub glob: String,
}

fn default_artifact_glob() -> String {
    "*.op".to_string()
}

impl Default for ArtifactsConfig {
    fn default() -> Self {
        ArtifactsConfig {
            glob: default_artifact_glob(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            manifest: default_manifest(),
            build: BuildConfig::default(),
            artifacts: ArtifactsConfig::default(),
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. `oprelease.toml` in the given working directory
/// 2. `oprelease.toml` in the user config directory
/// 3. Default configuration if no file found
///
/// A file that exists but cannot be read or parsed is an error, not a
/// silent fallback.
pub fn load_config(workdir: &Path) -> Result<Config> {
    let local = workdir.join("oprelease.toml");
    let config_str = if local.exists() {
        fs::read_to_string(&local)?
    } else if let Some(config_dir) = dirs::config_dir() {
        let user = config_dir.join("oprelease.toml");
        if user.exists() {
            fs::read_to_string(user)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    let config: Config =
        toml::from_str(&config_str).map_err(|e| ReleaseError::config(e.to_string()))?;
    Ok(config)
}
