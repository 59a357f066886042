//! Symbol list, field mapping, and credentials.
//!
//! Resolution mirrors the classic dotfile-first flow: `~/.stocktop.toml`
//! supplies symbols when it lists any, otherwise the command line does; the
//! API token comes from the command line, the file, or the `STOCKTOP_TOKEN`
//! environment variable, in that order.

use std::env;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

/// Environment variable consulted for the quote API token.
pub const TOKEN_ENV: &str = "STOCKTOP_TOKEN";

/// Seconds between polls when neither the CLI nor the file says otherwise.
pub const DEFAULT_INTERVAL_SECS: u64 = 5;

const CONFIG_FILE: &str = ".stocktop.toml";

/// Maps one quote API field to its display label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub field: String,
    pub label: String,
}

impl FieldSpec {
    pub fn new(field: &str, label: &str) -> Self {
        Self {
            field: field.to_string(),
            label: label.to_string(),
        }
    }

    /// Field displayed under its own name.
    pub fn plain(field: &str) -> Self {
        Self::new(field, field)
    }
}

/// The tracked quote fields, in display order. The first entry is the
/// row-label column.
pub fn default_fields() -> Vec<FieldSpec> {
    vec![
        FieldSpec::plain("symbol"),
        FieldSpec::new("latestPrice", "current"),
        FieldSpec::plain("open"),
        FieldSpec::plain("close"),
        FieldSpec::new("marketCap", "mktCap"),
        FieldSpec::new("peRatio", "p/e"),
    ]
}

/// On-disk shape of `~/.stocktop.toml`.
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    symbols: Vec<String>,
    token: Option<String>,
    interval: Option<u64>,
}

/// Everything the feed and the poller need, resolved before the core starts.
#[derive(Debug, Clone)]
pub struct Config {
    pub symbols: Vec<String>,
    pub fields: Vec<FieldSpec>,
    pub token: Option<String>,
    pub interval: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Io(String),
    Parse(String),
    /// Neither the config file nor the command line supplied any symbols.
    NoSymbols,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(msg) => write!(f, "config I/O error: {msg}"),
            ConfigError::Parse(msg) => write!(f, "config parse error: {msg}"),
            ConfigError::NoSymbols => write!(f, "no symbols configured"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    /// Resolves configuration from the home-directory file, the command
    /// line, and the environment.
    pub fn resolve(
        cli_symbols: &[String],
        cli_token: Option<String>,
        cli_interval: Option<u64>,
    ) -> Result<Self, ConfigError> {
        let file = match default_config_path() {
            Some(path) if path.is_file() => load_file(&path)?,
            _ => ConfigFile::default(),
        };
        Self::from_parts(
            file,
            cli_symbols,
            cli_token,
            cli_interval,
            env::var(TOKEN_ENV).ok(),
        )
    }

    fn from_parts(
        file: ConfigFile,
        cli_symbols: &[String],
        cli_token: Option<String>,
        cli_interval: Option<u64>,
        env_token: Option<String>,
    ) -> Result<Self, ConfigError> {
        let symbols = if file.symbols.is_empty() {
            cli_symbols.to_vec()
        } else {
            file.symbols
        };
        if symbols.is_empty() {
            return Err(ConfigError::NoSymbols);
        }
        Ok(Self {
            symbols,
            fields: default_fields(),
            token: cli_token.or(file.token).or(env_token),
            interval: Duration::from_secs(
                cli_interval
                    .or(file.interval)
                    .unwrap_or(DEFAULT_INTERVAL_SECS),
            ),
        })
    }
}

fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(CONFIG_FILE))
}

fn load_file(path: &Path) -> Result<ConfigFile, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
    toml::from_str(&text).map_err(|e| ConfigError::Parse(e.to_string()))
}
