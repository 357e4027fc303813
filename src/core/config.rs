//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.seed-nav/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::history::DEFAULT_HISTORY_CAPACITY;
use crate::core::route::RoutingMode;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct NavConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub routing: RoutingConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub log_level: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct RoutingConfig {
    pub mode: Option<RoutingMode>,
    pub history_capacity: Option<usize>,
    pub document_title: Option<String>,
    pub origin: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_DOCUMENT_TITLE: &str = "Radicle Interface";
pub const DEFAULT_ORIGIN: &str = "http://localhost:3000";
pub const DEFAULT_LOG_LEVEL: &str = "info";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub mode: RoutingMode,
    pub history_capacity: usize,
    pub document_title: String,
    pub origin: String,
    pub log_level: String,
}

/// Built-in defaults only; the environment is not consulted.
impl Default for ResolvedConfig {
    fn default() -> Self {
        resolve_with(&NavConfig::default(), None, |_| None)
    }
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

/// Returns the path to `~/.seed-nav/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".seed-nav").join("config.toml"))
}

/// Load config from `~/.seed-nav/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `NavConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<NavConfig, ConfigError> {
    match config_path() {
        Some(path) => load_config_from(&path),
        None => {
            warn!("Could not determine home directory, using default config");
            Ok(NavConfig::default())
        }
    }
}

/// Same as [`load_config`], for an explicit path.
pub fn load_config_from(path: &Path) -> Result<NavConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(NavConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: NavConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# seed-nav Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# log_level = "info"                 # "error", "warn", "info", "debug", "trace"

# [routing]
# mode = "path"                      # "path" or "hash"; or set SEED_NAV_ROUTING
# history_capacity = 10
# document_title = "Radicle Interface"   # Or set SEED_NAV_TITLE
# origin = "http://localhost:3000"
"#;

    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Parses a routing mode name as accepted by env vars and CLI flags.
pub fn parse_mode(value: &str) -> Option<RoutingMode> {
    match value.trim().to_ascii_lowercase().as_str() {
        "path" => Some(RoutingMode::Path),
        "hash" => Some(RoutingMode::Hash),
        _ => None,
    }
}

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
///
/// `cli_mode` comes from the `--hash` flag (None = not specified).
pub fn resolve(config: &NavConfig, cli_mode: Option<RoutingMode>) -> ResolvedConfig {
    resolve_with(config, cli_mode, |key| std::env::var(key).ok())
}

/// [`resolve`] with environment lookups going through `env`.
pub fn resolve_with<F>(config: &NavConfig, cli_mode: Option<RoutingMode>, env: F) -> ResolvedConfig
where
    F: Fn(&str) -> Option<String>,
{
    // Routing mode: CLI → env → config → default
    let mode = cli_mode
        .or_else(|| {
            env("SEED_NAV_ROUTING").and_then(|v| {
                let mode = parse_mode(&v);
                if mode.is_none() {
                    warn!("Ignoring unknown SEED_NAV_ROUTING value {:?}", v);
                }
                mode
            })
        })
        .or(config.routing.mode)
        .unwrap_or_default();

    // Title: env → config → default
    let document_title = env("SEED_NAV_TITLE")
        .or_else(|| config.routing.document_title.clone())
        .unwrap_or_else(|| DEFAULT_DOCUMENT_TITLE.to_string());

    ResolvedConfig {
        mode,
        history_capacity: config
            .routing
            .history_capacity
            .unwrap_or(DEFAULT_HISTORY_CAPACITY)
            .max(1),
        document_title,
        origin: config
            .routing
            .origin
            .clone()
            .unwrap_or_else(|| DEFAULT_ORIGIN.to_string()),
        log_level: config
            .general
            .log_level
            .clone()
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
    }
}
