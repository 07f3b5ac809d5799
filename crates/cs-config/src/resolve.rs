//! Configuration resolution and path discovery.
//!
//! Resolution order: CLI arguments → environment variables → XDG paths → defaults.

use std::path::{Path, PathBuf};

/// Discovered configuration file path.
#[derive(Debug, Clone, Default)]
pub struct ConfigPaths {
    /// Path to config.json (or None if not found).
    pub config: Option<PathBuf>,

    /// Where it was found (for diagnostics).
    pub source: ConfigSource,
}

/// Where a configuration file was found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ConfigSource {
    /// Explicitly provided via CLI argument.
    CliArgument,

    /// Set via environment variable.
    Environment,

    /// Found in XDG config directory.
    XdgConfig,

    /// Found in /etc/cisp-stats/.
    SystemConfig,

    /// Using built-in defaults.
    #[default]
    BuiltinDefault,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::CliArgument => write!(f, "CLI argument"),
            ConfigSource::Environment => write!(f, "environment variable"),
            ConfigSource::XdgConfig => write!(f, "XDG config"),
            ConfigSource::SystemConfig => write!(f, "system config"),
            ConfigSource::BuiltinDefault => write!(f, "builtin default"),
        }
    }
}

/// Environment variable names.
pub const ENV_CONFIG_PATH: &str = "CISP_STATS_CONFIG";
pub const ENV_CONFIG_DIR: &str = "CISP_STATS_CONFIG_DIR";

/// Standard config file name.
const CONFIG_FILENAME: &str = "config.json";

/// Application name for XDG directories.
const APP_NAME: &str = "cisp-stats";

/// Resolve the config file path.
///
/// 1. Explicit CLI path (if it exists)
/// 2. `CISP_STATS_CONFIG`
/// 3. `CISP_STATS_CONFIG_DIR` + config.json
/// 4. XDG config directory (~/.config/cisp-stats/)
/// 5. System config (/etc/cisp-stats/)
/// 6. Built-in defaults (None)
pub fn resolve_config(cli_path: Option<&Path>) -> ConfigPaths {
    let candidates = candidate_paths(cli_path);
    for (path, source) in candidates {
        if path.exists() {
            return ConfigPaths {
                config: Some(path),
                source,
            };
        }
    }
    ConfigPaths::default()
}

fn candidate_paths(cli_path: Option<&Path>) -> Vec<(PathBuf, ConfigSource)> {
    let mut candidates = Vec::new();

    if let Some(path) = cli_path {
        candidates.push((path.to_path_buf(), ConfigSource::CliArgument));
    }
    if let Ok(env_path) = std::env::var(ENV_CONFIG_PATH) {
        if !env_path.is_empty() {
            candidates.push((PathBuf::from(env_path), ConfigSource::Environment));
        }
    }
    if let Ok(config_dir) = std::env::var(ENV_CONFIG_DIR) {
        if !config_dir.is_empty() {
            candidates.push((
                PathBuf::from(config_dir).join(CONFIG_FILENAME),
                ConfigSource::Environment,
            ));
        }
    }
    if let Some(dir) = xdg_config_dir() {
        candidates.push((dir.join(CONFIG_FILENAME), ConfigSource::XdgConfig));
    }
    candidates.push((
        system_config_dir().join(CONFIG_FILENAME),
        ConfigSource::SystemConfig,
    ));

    candidates
}

/// Get the XDG config directory for cisp-stats.
pub fn xdg_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_NAME))
}

/// Get the system config directory.
pub fn system_config_dir() -> PathBuf {
    PathBuf::from("/etc").join(APP_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_source_display() {
        assert_eq!(format!("{}", ConfigSource::CliArgument), "CLI argument");
        assert_eq!(
            format!("{}", ConfigSource::Environment),
            "environment variable"
        );
        assert_eq!(format!("{}", ConfigSource::XdgConfig), "XDG config");
        assert_eq!(
            format!("{}", ConfigSource::BuiltinDefault),
            "builtin default"
        );
    }

    #[test]
    fn test_cli_path_comes_first() {
        let cli = Path::new("/tmp/explicit.json");
        let candidates = candidate_paths(Some(cli));
        assert_eq!(candidates[0], (cli.to_path_buf(), ConfigSource::CliArgument));
        assert_eq!(
            candidates.last().map(|c| c.1.clone()),
            Some(ConfigSource::SystemConfig)
        );
    }

    #[test]
    fn test_xdg_config_dir() {
        if let Some(path) = xdg_config_dir() {
            assert!(path.ends_with(APP_NAME));
        }
    }

    #[test]
    fn test_system_config_dir() {
        assert_eq!(system_config_dir(), PathBuf::from("/etc/cisp-stats"));
    }
}
