//! Configuration loading from YAML/TOML files with environment overrides.

use crate::schema::Config;
use cgraph_common::{CgraphError, Result};
use std::env;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, info};

/// Environment variable naming an explicit configuration file.
pub const CONFIG_PATH_ENV: &str = "CGRAPH_CONFIG";

/// Token variables, in priority order. Deployments have used both names.
pub const TOKEN_ENV_VARS: [&str; 2] = ["GITHUB_TOKEN", "GH_TOKEN"];

/// Files probed in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILES: [&str; 3] = ["cgraph.yaml", "cgraph.yml", "cgraph.toml"];

/// Supported configuration file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// YAML via serde_yaml.
    Yaml,
    /// TOML via toml.
    Toml,
}

impl ConfigFormat {
    /// Picks the format from a file extension; anything but `.toml` is YAML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Self::Toml,
            _ => Self::Yaml,
        }
    }
}

/// Configuration loader for the application.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from the process environment and the first config
    /// file found, then validate it.
    pub fn load() -> Result<Config> {
        let mut config = match Self::locate() {
            Some(path) => {
                info!("Loading configuration from {}", path.display());
                Self::parse_file(&path)?
            }
            None => {
                debug!("No configuration file found, using defaults");
                Config::default()
            }
        };

        Self::apply_overrides(&mut config, |key| env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file with environment overrides.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Config> {
        let mut config = Self::parse_file(path.as_ref())?;
        Self::apply_overrides(&mut config, |key| env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a file without overrides or validation.
    pub fn parse_file(path: &Path) -> Result<Config> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            CgraphError::config_with_source(
                format!("Failed to read configuration file {}", path.display()),
                e,
            )
        })?;
        Self::parse_str(&content, ConfigFormat::from_path(path))
    }

    /// Parse configuration text in the given format.
    pub fn parse_str(content: &str, format: ConfigFormat) -> Result<Config> {
        let config = match format {
            ConfigFormat::Yaml => serde_yaml::from_str(content)?,
            ConfigFormat::Toml => toml::from_str(content)?,
        };
        Ok(config)
    }

    /// Apply environment overrides read through `lookup`. Empty values are ignored.
    pub fn apply_overrides<F>(config: &mut Config, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let present = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(token) = TOKEN_ENV_VARS.iter().find_map(|key| present(*key)) {
            config.github.token = token;
        }

        if let Some(organization) = present("CGRAPH_ORGANIZATION") {
            config.github.organization = organization;
        }

        if let Some(api_url) = present("CGRAPH_API_URL") {
            config.github.api_url = api_url;
        }

        if let Some(path) = present("CGRAPH_OUTPUT") {
            config.output.path = PathBuf::from(path);
        }

        if let Some(level) = present("CGRAPH_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Some(days) = present("CGRAPH_WINDOW_DAYS") {
            config.window.window_days = parse_env("CGRAPH_WINDOW_DAYS", &days)?;
        }

        if let Some(size) = present("CGRAPH_PAGE_SIZE") {
            config.window.page_size = parse_env("CGRAPH_PAGE_SIZE", &size)?;
        }

        Ok(())
    }

    /// The explicit config path, or the first default file that exists.
    fn locate() -> Option<PathBuf> {
        if let Ok(path) = env::var(CONFIG_PATH_ENV) {
            return Some(PathBuf::from(path));
        }

        DEFAULT_CONFIG_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }
}

fn parse_env<T>(var: &str, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value.trim().parse().map_err(|e| {
        CgraphError::config_with_source(format!("Failed to parse environment variable '{var}'"), e)
    })
}
