use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::identity::{DEFAULT_PROFILE, DEFAULT_PROFILES_DIR, DEFAULT_STANDARD_PATH};

/// Main MirrorDNA configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub paths: PathsConfig,
    /// Profile loaded when none is named
    pub default_profile: String,
    pub log_level: LogLevel,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Master Standard document
    pub standard: PathBuf,
    /// Directory of profile YAML files
    pub profiles: PathBuf,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
    Off,
}

impl LogLevel {
    pub fn as_filter(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
            LogLevel::Off => "off",
        }
    }

    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Trace => log::LevelFilter::Trace,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Off => log::LevelFilter::Off,
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = eyre::Report;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            "off" => Ok(LogLevel::Off),
            _ => eyre::bail!("Invalid log level: {} (use trace, debug, info, warn, error, off)", s),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            paths: PathsConfig::default(),
            default_profile: DEFAULT_PROFILE.to_string(),
            log_level: LogLevel::default(),
        }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            standard: PathBuf::from(DEFAULT_STANDARD_PATH),
            profiles: PathBuf::from(DEFAULT_PROFILES_DIR),
        }
    }
}

impl Config {
    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        if let Ok(env_path) = std::env::var("MIRRORDNA_CONFIG") {
            let path = PathBuf::from(env_path);
            if path.exists() {
                match Self::load_from_file(&path) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        log::warn!("Failed to load config from MIRRORDNA_CONFIG: {}", e);
                    }
                }
            }
        }

        if let Ok(dir) = std::env::var("MIRRORDNA_DIR") {
            let path = PathBuf::from(dir).join("mirrordna.yaml");
            if path.exists() {
                match Self::load_from_file(&path) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        log::warn!("Failed to load config from MIRRORDNA_DIR: {}", e);
                    }
                }
            }
        }

        // ~/.config/mirrordna/mirrordna.yaml
        if let Some(config_dir) = dirs::config_dir() {
            let path = config_dir.join("mirrordna").join("mirrordna.yaml");
            if path.exists() {
                match Self::load_from_file(&path) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        log::warn!("Failed to load config from {}: {}", path.display(), e);
                    }
                }
            }
        }

        // ./mirrordna.yaml (repository checkout)
        let local_config = PathBuf::from("mirrordna.yaml");
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    log::warn!("Failed to load local config: {}", e);
                }
            }
        }

        log::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        log::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }

    /// Directory `config set` writes `mirrordna.yaml` into
    pub fn config_dir() -> PathBuf {
        std::env::var("MIRRORDNA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| dirs::config_dir().unwrap_or_else(|| PathBuf::from(".")).join("mirrordna"))
    }

    /// Expand a path that may contain ~ or env vars
    pub fn expand_path(path: &Path) -> PathBuf {
        let path_str = path.to_string_lossy();
        let expanded = shellexpand::full(&path_str).unwrap_or_else(|_| path_str.clone());
        PathBuf::from(expanded.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.default_profile, DEFAULT_PROFILE);
        assert_eq!(config.paths.standard, PathBuf::from(DEFAULT_STANDARD_PATH));
        assert_eq!(config.paths.profiles, PathBuf::from(DEFAULT_PROFILES_DIR));
        assert_eq!(config.log_level, LogLevel::Info);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: Config = serde_yaml::from_str("default_profile: ana.yaml\n").unwrap();
        assert_eq!(config.default_profile, "ana.yaml");
        assert_eq!(config.paths.standard, PathBuf::from(DEFAULT_STANDARD_PATH));

        let config: Config = serde_yaml::from_str("paths:\n  profiles: /srv/profiles\nlog_level: debug\n").unwrap();
        assert_eq!(config.paths.profiles, PathBuf::from("/srv/profiles"));
        assert_eq!(config.paths.standard, PathBuf::from(DEFAULT_STANDARD_PATH));
        assert_eq!(config.log_level, LogLevel::Debug);
    }

    #[test]
    fn test_load_explicit_path() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("mirrordna.yaml");
        fs::write(&path, "default_profile: other.yaml\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.default_profile, "other.yaml");
    }

    #[test]
    fn test_load_explicit_path_missing_is_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("absent.yaml");
        assert!(Config::load(Some(&path)).is_err());
    }

    #[test]
    fn test_load_explicit_path_invalid_is_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("mirrordna.yaml");
        fs::write(&path, "log_level: loud\n").unwrap();
        assert!(Config::load(Some(&path)).is_err());
    }

    #[test]
    fn test_log_level_from_str() {
        assert_eq!("WARNING".parse::<LogLevel>().unwrap(), LogLevel::Warn);
        assert_eq!("off".parse::<LogLevel>().unwrap(), LogLevel::Off);
        assert!("loud".parse::<LogLevel>().is_err());
        assert_eq!(LogLevel::Trace.to_level_filter(), log::LevelFilter::Trace);
    }

    #[test]
    fn test_expand_path_no_expansion() {
        let path = PathBuf::from("/usr/local/share/mirror");
        assert_eq!(Config::expand_path(&path), path);
    }

    #[test]
    fn test_expand_path_with_tilde() {
        let expanded = Config::expand_path(&PathBuf::from("~/vault"));
        assert!(!expanded.to_string_lossy().contains('~'));
        assert!(expanded.to_string_lossy().ends_with("vault"));
    }

    #[test]
    fn test_expand_path_with_env_var() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::set_var("MIRRORDNA_TEST_ROOT", "/custom/mirror");
        }
        let expanded = Config::expand_path(&PathBuf::from("$MIRRORDNA_TEST_ROOT/profiles"));
        assert_eq!(expanded, PathBuf::from("/custom/mirror/profiles"));
        unsafe {
            std::env::remove_var("MIRRORDNA_TEST_ROOT");
        }
    }

    #[test]
    fn test_config_serialization_roundtrip() {
        let config = Config::default();
        let yaml_str = serde_yaml::to_string(&config).unwrap();
        let parsed: Config = serde_yaml::from_str(&yaml_str).unwrap();
        assert_eq!(parsed.default_profile, config.default_profile);
        assert_eq!(parsed.paths.standard, config.paths.standard);
        assert_eq!(parsed.log_level, config.log_level);
    }
}
