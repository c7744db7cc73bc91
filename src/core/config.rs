//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.palaver/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::notice::NOTICE_DURATION;
use crate::endpoint::http::normalize_base_url;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct PalaverConfig {
    #[serde(default)]
    pub endpoint: EndpointConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct EndpointConfig {
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct UiConfig {
    pub assistant_name: Option<String>,
    pub notice_duration_ms: Option<u64>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_ASSISTANT_NAME: &str = "Palaver";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub base_url: String,
    /// Transport-level deadline. `None` = no deadline.
    pub request_timeout: Option<Duration>,
    pub notice_duration: Duration,
    pub assistant_name: String,
}

/// Values from CLI flags (None = not specified).
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
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

/// Returns the path to `~/.palaver/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".palaver").join("config.toml"))
}

/// Load config from `~/.palaver/config.toml`, generating a default on first run.
pub fn load_config() -> Result<PalaverConfig, ConfigError> {
    match config_path() {
        Some(path) => load_config_from(&path),
        None => {
            warn!("Could not determine home directory, using default config");
            Ok(PalaverConfig::default())
        }
    }
}

/// Load config from an explicit path.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `PalaverConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config_from(path: &Path) -> Result<PalaverConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(PalaverConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: PalaverConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

fn generate_default_config(path: &Path) {
    let default_content = r#"# Palaver Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [endpoint]
# base_url = "http://localhost:8000"   # Or set PALAVER_BASE_URL
# timeout_secs = 60                    # Or set PALAVER_TIMEOUT_SECS; unset = no deadline

# [ui]
# assistant_name = "Palaver"
# notice_duration_ms = 5000
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

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &PalaverConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with_env(config, cli, |key| std::env::var(key).ok())
}

fn resolve_with_env(
    config: &PalaverConfig,
    cli: &CliOverrides,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    // Base URL: CLI → env → config → default
    let base_url = cli
        .base_url
        .clone()
        .or_else(|| env("PALAVER_BASE_URL"))
        .or_else(|| config.endpoint.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    // Timeout: CLI → env → config → none
    let timeout_secs = cli.timeout_secs.or_else(|| {
        env("PALAVER_TIMEOUT_SECS")
            .and_then(|raw| match raw.trim().parse::<u64>() {
                Ok(secs) => Some(secs),
                Err(e) => {
                    warn!("Ignoring PALAVER_TIMEOUT_SECS={:?}: {}", raw, e);
                    None
                }
            })
            .or(config.endpoint.timeout_secs)
    });

    ResolvedConfig {
        base_url: normalize_base_url(&base_url),
        request_timeout: timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs),
        notice_duration: config
            .ui
            .notice_duration_ms
            .map(Duration::from_millis)
            .unwrap_or(NOTICE_DURATION),
        assistant_name: config
            .ui
            .assistant_name
            .clone()
            .unwrap_or_else(|| DEFAULT_ASSISTANT_NAME.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let resolved = resolve_with_env(&PalaverConfig::default(), &CliOverrides::default(), no_env);
        assert_eq!(resolved.base_url, DEFAULT_BASE_URL);
        assert_eq!(resolved.request_timeout, None);
        assert_eq!(resolved.notice_duration, NOTICE_DURATION);
        assert_eq!(resolved.assistant_name, DEFAULT_ASSISTANT_NAME);
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = PalaverConfig {
            endpoint: EndpointConfig {
                base_url: Some("http://chat.internal:9000/".to_string()),
                timeout_secs: Some(30),
            },
            ui: UiConfig {
                assistant_name: Some("Helper".to_string()),
                notice_duration_ms: Some(2500),
            },
        };
        let resolved = resolve_with_env(&config, &CliOverrides::default(), no_env);
        assert_eq!(resolved.base_url, "http://chat.internal:9000");
        assert_eq!(resolved.request_timeout, Some(Duration::from_secs(30)));
        assert_eq!(resolved.notice_duration, Duration::from_millis(2500));
        assert_eq!(resolved.assistant_name, "Helper");
    }

    #[test]
    fn test_env_beats_config_and_cli_beats_env() {
        let config = PalaverConfig {
            endpoint: EndpointConfig {
                base_url: Some("http://from-config".to_string()),
                timeout_secs: Some(10),
            },
            ..Default::default()
        };
        let env = |key: &str| match key {
            "PALAVER_BASE_URL" => Some("http://from-env".to_string()),
            "PALAVER_TIMEOUT_SECS" => Some("20".to_string()),
            _ => None,
        };

        let resolved = resolve_with_env(&config, &CliOverrides::default(), env);
        assert_eq!(resolved.base_url, "http://from-env");
        assert_eq!(resolved.request_timeout, Some(Duration::from_secs(20)));

        let cli = CliOverrides {
            base_url: Some("http://from-cli/".to_string()),
            timeout_secs: Some(5),
        };
        let resolved = resolve_with_env(&config, &cli, env);
        assert_eq!(resolved.base_url, "http://from-cli");
        assert_eq!(resolved.request_timeout, Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_bad_env_timeout_falls_back_to_config() {
        let config = PalaverConfig {
            endpoint: EndpointConfig {
                timeout_secs: Some(15),
                ..Default::default()
            },
            ..Default::default()
        };
        let env = |key: &str| (key == "PALAVER_TIMEOUT_SECS").then(|| "soon".to_string());
        let resolved = resolve_with_env(&config, &CliOverrides::default(), env);
        assert_eq!(resolved.request_timeout, Some(Duration::from_secs(15)));
    }

    #[test]
    fn test_zero_timeout_means_no_deadline() {
        let cli = CliOverrides {
            timeout_secs: Some(0),
            ..Default::default()
        };
        let resolved = resolve_with_env(&PalaverConfig::default(), &cli, no_env);
        assert_eq!(resolved.request_timeout, None);
    }

    #[test]
    fn test_sparse_toml_parses() {
        let toml_str = r#"
[endpoint]
base_url = "http://localhost:8123"
"#;
        let config: PalaverConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.endpoint.base_url.as_deref(), Some("http://localhost:8123"));
        assert!(config.endpoint.timeout_secs.is_none());
        assert!(config.ui.assistant_name.is_none());
    }

    #[test]
    fn test_load_generates_default_then_parses_it() {
        let dir = std::env::temp_dir().join(format!("palaver-config-test-{}", std::process::id()));
        let path = dir.join("config.toml");
        let _ = fs::remove_dir_all(&dir);

        let first = load_config_from(&path).unwrap();
        assert!(first.endpoint.base_url.is_none());
        assert!(path.exists());

        // The generated file is all comments, so it parses to defaults
        let second = load_config_from(&path).unwrap();
        assert!(second.endpoint.base_url.is_none());

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let dir = std::env::temp_dir().join(format!("palaver-config-bad-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        fs::write(&path, "[endpoint\nbase_url = 3").unwrap();

        assert!(matches!(load_config_from(&path), Err(ConfigError::Parse(_))));

        let _ = fs::remove_dir_all(&dir);
    }
}
