/// Settings resolution: command-line flags and environment, then config file, then defaults.
///
/// Environment variables are read by clap into the same fields as the flags,
/// so at this layer both count as overrides.
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::api::ClientSettings;
use crate::cli::{Cli, OutputFormat};

/// Default API host.
pub const DEFAULT_HOST: &str = "https://network.pivotal.io";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Contents of `config.toml`. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub format: Option<String>,
    pub host: Option<String>,
    pub api_token: Option<String>,
    pub timeout_secs: Option<u64>,
}

/// Values supplied on the command line or through the environment.
#[derive(Debug, Default)]
pub struct Overrides {
    pub format: Option<OutputFormat>,
    pub host: Option<String>,
    pub api_token: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl From<&Cli> for Overrides {
    fn from(cli: &Cli) -> Self {
        Self {
            format: cli.format,
            host: cli.host.clone(),
            api_token: cli.api_token.clone(),
            timeout_secs: cli.timeout,
        }
    }
}

/// Fully resolved settings for one invocation.
#[derive(Debug)]
pub struct Settings {
    pub format: OutputFormat,
    pub client: ClientSettings,
}

/// Resolve settings for this invocation.
///
/// # Errors
///
/// Fails if an explicitly given config file is missing, if any config file is
/// unreadable or malformed, or if it names an unknown output format.
pub fn load(cli: &Cli) -> Result<Settings> {
    let file = match &cli.config {
        Some(path) => read_file(path)?,
        None => match default_path() {
            Some(path) if path.exists() => read_file(&path)?,
            _ => FileConfig::default(),
        },
    };
    merge(Overrides::from(cli), file)
}

/// `<config dir>/pivnet/config.toml`, if the platform has a config dir.
#[must_use]
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("pivnet").join("config.toml"))
}

/// Read and parse a TOML config file.
///
/// # Errors
///
/// Fails if the file cannot be read or is not valid config TOML.
pub fn read_file(path: &Path) -> Result<FileConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    let config = toml::from_str(&content)
        .with_context(|| format!("failed to parse config file {}", path.display()))?;
    tracing::debug!(path = %path.display(), "loaded config file");
    Ok(config)
}

/// Combine overrides with file values, falling back to defaults.
///
/// # Errors
///
/// Fails if the file's `format` is not a known output format.
pub fn merge(overrides: Overrides, file: FileConfig) -> Result<Settings> {
    let format = match overrides.format {
        Some(f) => f,
        None => match file.format.as_deref() {
            Some(name) => name.parse().context("invalid `format` in config file")?,
            None => OutputFormat::default(),
        },
    };

    let host = overrides
        .host
        .or(file.host)
        .unwrap_or_else(|| DEFAULT_HOST.to_owned());
    let api_token = overrides
        .api_token
        .or(file.api_token)
        .filter(|t| !t.is_empty());
    let timeout_secs = overrides
        .timeout_secs
        .or(file.timeout_secs)
        .unwrap_or(DEFAULT_TIMEOUT_SECS);

    Ok(Settings {
        format,
        client: ClientSettings {
            host,
            api_token,
            timeout: Duration::from_secs(timeout_secs),
        },
    })
}
