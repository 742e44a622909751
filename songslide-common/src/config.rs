//! Configuration loading and endpoint resolution
//!
//! Settings resolve with the priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file (`~/.config/songslide/config.toml`)
//! 4. Compiled default (fallback)
//!
//! A missing config file never prevents startup; individual tools decide
//! which settings are required.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Default relay listen port
pub const DEFAULT_PORT: u16 = 4000;

/// TOML config file schema
///
/// All fields optional; absent fields fall through to the next resolution
/// tier.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct TomlConfig {
    /// Upstream Apps Script endpoint the relay forwards to (kept secret
    /// server-side, never sent to browsers)
    pub script_url: Option<String>,
    /// Songs source URL used for draft preload
    pub songs_url: Option<String>,
    /// Slide-update service base URL
    pub slides_url: Option<String>,
    /// Relay listen port
    pub port: Option<u16>,
}

/// Default configuration file path for the platform
pub fn config_file_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("songslide").join("config.toml"))
}

/// Load the TOML config from an explicit path or the default location
///
/// A missing file yields defaults; only an unreadable or unparseable file
/// is an error.
pub fn load_toml_config(path: Option<&Path>) -> Result<TomlConfig> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => match config_file_path() {
            Some(p) => p,
            None => return Ok(TomlConfig::default()),
        },
    };

    if !path.exists() {
        return Ok(TomlConfig::default());
    }

    let content = std::fs::read_to_string(&path)
        .map_err(|e| Error::Config(format!("Read {} failed: {}", path.display(), e)))?;
    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Parse {} failed: {}", path.display(), e)))
}

/// Resolve one string setting with CLI → ENV → TOML priority
///
/// Warns when more than one source supplies a value (potential
/// misconfiguration), then uses the highest-priority one.
pub fn resolve_setting(
    name: &str,
    cli: Option<String>,
    env_var: &str,
    toml_value: Option<&str>,
) -> Option<String> {
    let env_value = std::env::var(env_var).ok().filter(|v| !v.trim().is_empty());

    let mut sources = Vec::new();
    if cli.is_some() {
        sources.push("command line");
    }
    if env_value.is_some() {
        sources.push("environment");
    }
    if toml_value.is_some() {
        sources.push("TOML");
    }
    if sources.len() > 1 {
        warn!(
            "{} found in multiple sources: {}. Using {} (highest priority).",
            name,
            sources.join(", "),
            sources[0]
        );
    }

    cli.or(env_value).or_else(|| toml_value.map(str::to_string))
}

/// Resolve the relay listen port
///
/// Priority: CLI flag → `SONGSLIDE_PORT` → `PORT` → TOML → 4000. Unparseable
/// environment values are ignored with a warning rather than refusing to
/// start.
pub fn resolve_port(cli: Option<u16>, toml_value: Option<u16>) -> u16 {
    if let Some(port) = cli {
        return port;
    }
    for env_var in ["SONGSLIDE_PORT", "PORT"] {
        if let Ok(raw) = std::env::var(env_var) {
            match raw.trim().parse::<u16>() {
                Ok(port) => return port,
                Err(_) => warn!("Ignoring unparseable {}={:?}", env_var, raw),
            }
        }
    }
    toml_value.unwrap_or(DEFAULT_PORT)
}
