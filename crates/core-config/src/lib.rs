//! Configuration loading and parsing.
//!
//! Parses `etch.toml` (or an override path supplied by the host) extracting
//! the `[source_mode]` table. One knob exists today:
//! `locally_owned_surface = <bool>` (default `true`), declaring whether the
//! editing surface is created and owned by this process. Embedding hosts
//! that inject their own surface set it to `false`, which makes the mode
//! controller flip the flag and notify observers without touching document
//! or command state.
//!
//! Unknown fields are ignored (TOML deserialization tolerance) to allow
//! forward evolution without immediate warnings; a missing or unparseable
//! file falls back to defaults.

use anyhow::Result;
use serde::Deserialize;
use std::{fs, path::PathBuf};
use tracing::info;

/// `[source_mode]` table of `etch.toml`.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct SourceModeConfig {
    /// Whether the editing surface is created and owned by this process.
    /// Hosts that supply an externally managed surface set this to `false`
    /// and react to mode-change notifications themselves.
    #[serde(default = "SourceModeConfig::default_locally_owned")]
    pub locally_owned_surface: bool,
}

impl Default for SourceModeConfig {
    fn default() -> Self {
        Self {
            locally_owned_surface: Self::default_locally_owned(),
        }
    }
}

impl SourceModeConfig {
    const fn default_locally_owned() -> bool {
        true
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ConfigFile {
    #[serde(default)]
    pub source_mode: SourceModeConfig,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub raw: Option<String>, // original file string (optional)
    pub file: ConfigFile,    // parsed (or default) data
}

/// Best-effort config path following platform conventions (XDG / AppData Roaming).
pub fn discover() -> PathBuf {
    // Prefer a local working directory `etch.toml` before falling back to
    // the platform config dir.
    let local = PathBuf::from("etch.toml");
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("etch").join("etch.toml");
    }
    // Final fallback relative filename.
    PathBuf::from("etch.toml")
}

pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(discover);
    if let Ok(content) = fs::read_to_string(&path) {
        match toml::from_str::<ConfigFile>(&content) {
            Ok(file) => {
                info!(
                    target: "config",
                    path = %path.display(),
                    locally_owned_surface = file.source_mode.locally_owned_surface,
                    "config_loaded"
                );
                Ok(Config {
                    raw: Some(content),
                    file,
                })
            }
            Err(_e) => {
                // On parse error fall back to defaults rather than refusing
                // to start the host.
                Ok(Config::default())
            }
        }
    } else {
        Ok(Config::default())
    }
}
