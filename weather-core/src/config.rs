use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};
use thiserror::Error;

/// Environment variable that overrides the configured API origin.
pub const BASE_URL_ENV: &str = "WEATHER_API_URL";

/// Origin used when nothing is configured (local dashboard backend).
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Request ceiling when nothing is configured.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not determine platform config directory")]
    NoConfigDir,

    #[error("Failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write config file {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to serialize configuration to TOML: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// API section of the config file.
///
/// Example TOML:
/// [api]
/// base_url = "https://dashboard.example"
/// timeout_secs = 10
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
}

/// Effective client settings after env, file and defaults are merged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl Config {
    /// Resolve settings using the process environment.
    pub fn resolve(&self) -> ClientSettings {
        self.resolve_with(std::env::var(BASE_URL_ENV).ok().as_deref())
    }

    /// Resolve settings with an explicit value for [`BASE_URL_ENV`].
    /// Precedence: env, then config file, then [`DEFAULT_BASE_URL`].
    pub fn resolve_with(&self, env_base_url: Option<&str>) -> ClientSettings {
        let base_url = env_base_url
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .or(self.api.base_url.as_deref())
            .unwrap_or(DEFAULT_BASE_URL)
            .trim_end_matches('/')
            .to_string();

        // A zero timeout would fail every request; treat it as unset.
        let timeout_secs = self
            .api
            .timeout_secs
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        let timeout = Duration::from_secs(timeout_secs);

        ClientSettings { base_url, timeout }
    }

    /// Store the API origin; an empty string clears it.
    pub fn set_base_url(&mut self, base_url: &str) {
        let trimmed = base_url.trim();
        self.api.base_url = (!trimmed.is_empty()).then(|| trimmed.to_string());
    }

    /// Store the request timeout; 0 clears it.
    pub fn set_timeout_secs(&mut self, secs: u64) {
        self.api.timeout_secs = (secs > 0).then_some(secs);
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;

        toml::from_str(&contents)
            .map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<PathBuf, ConfigError> {
        let path = Self::config_file_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|source| ConfigError::Write { path: parent.to_path_buf(), source })?;
        }

        let toml = toml::to_string_pretty(self)?;

        fs::write(path, toml)
            .map_err(|source| ConfigError::Write { path: path.to_path_buf(), source })
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf, ConfigError> {
        let dirs = ProjectDirs::from("dev", "weather-dashboard", "weather-cli")
            .ok_or(ConfigError::NoConfigDir)?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_nothing_configured() {
        let settings = Config::default().resolve_with(None);

        assert_eq!(settings.base_url, "http://localhost:8000");
        assert_eq!(settings.timeout, Duration::from_secs(10));
        assert_eq!(settings, ClientSettings::default());
    }

    #[test]
    fn config_file_beats_default() {
        let mut cfg = Config::default();
        cfg.set_base_url("https://dashboard.example/");
        cfg.set_timeout_secs(3);

        let settings = cfg.resolve_with(None);
        assert_eq!(settings.base_url, "https://dashboard.example");
        assert_eq!(settings.timeout, Duration::from_secs(3));
    }

    #[test]
    fn zero_timeout_falls_back_to_default() {
        let mut cfg = Config::default();
        cfg.set_timeout_secs(0);
        assert_eq!(cfg.api.timeout_secs, None);
        assert_eq!(cfg.resolve_with(None).timeout, Duration::from_secs(10));
    }

    #[test]
    fn zero_timeout_in_file_falls_back_to_default() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        fs::write(&path, "[api]\ntimeout_secs = 0\n").expect("write");

        let cfg = Config::load_from(&path).expect("load");
        assert_eq!(cfg.api.timeout_secs, Some(0));
        assert_eq!(cfg.resolve_with(None).timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn env_beats_config_file() {
        let mut cfg = Config::default();
        cfg.set_base_url("https://dashboard.example");

        let settings = cfg.resolve_with(Some("http://10.0.0.5:8000"));
        assert_eq!(settings.base_url, "http://10.0.0.5:8000");
    }

    #[test]
    fn blank_env_is_ignored() {
        let mut cfg = Config::default();
        cfg.set_base_url("https://dashboard.example");

        assert_eq!(cfg.resolve_with(Some("  ")).base_url, "https://dashboard.example");
    }

    #[test]
    fn empty_base_url_clears_setting() {
        let mut cfg = Config::default();
        cfg.set_base_url("https://dashboard.example");
        cfg.set_base_url("");

        assert_eq!(cfg.api.base_url, None);
    }

    #[test]
    fn missing_file_loads_default() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cfg = Config::load_from(&dir.path().join("absent.toml")).expect("load");

        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("config.toml");

        let mut cfg = Config::default();
        cfg.set_base_url("https://dashboard.example");
        cfg.set_timeout_secs(15);
        cfg.save_to(&path).expect("save");

        let loaded = Config::load_from(&path).expect("load");
        assert_eq!(loaded, cfg);
    }

    #[test]
    fn parse_error_names_the_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        fs::write(&path, "api = [not toml").expect("write");

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("config.toml"));
    }
}
