//! Client configuration: API endpoint, storage location, and UI timing.
//!
//! Each value comes from the first source that sets it:
//! 1. CLI flags, or their `TASKDESK_*` environment variables
//! 2. `~/.config/taskdesk/config.toml` (or the file given with `--config`)
//! 3. Built-in defaults
//!
//! The default file may be absent. A file named with `--config` must exist.

use std::path::PathBuf;
use std::time::Duration;

use crate::api::ApiSettings;
use crate::app::DEFAULT_DATE_FORMAT;
use crate::routes::Route;

/// Why the configuration could not be loaded.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to parse the TOML configuration.
    #[error("failed to parse config file: {0}")]
    ParseToml(#[from] toml::de::Error),
}

// ---------------------------------------------------------------------------
// File layout (every key optional)
// ---------------------------------------------------------------------------

/// `config.toml` as written by the user.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct ConfigFile {
    api: ApiFileConfig,
    storage: StorageFileConfig,
    ui: UiFileConfig,
}

/// `[api]` section of the config file.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct ApiFileConfig {
    base_url: Option<String>,
    request_timeout_secs: Option<u64>,
    connect_timeout_secs: Option<u64>,
}

/// `[storage]` section of the config file.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct StorageFileConfig {
    path: Option<PathBuf>,
}

/// `[ui]` section of the config file.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct UiFileConfig {
    start_route: Option<String>,
    poll_timeout_ms: Option<u64>,
    toast_ttl_secs: Option<u64>,
    date_format: Option<String>,
}

// ---------------------------------------------------------------------------
// Resolved values
// ---------------------------------------------------------------------------

/// Client configuration after merging every source.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    // -- API --
    /// Base URL of the task API.
    pub base_url: String,
    /// Total time allowed for one request.
    pub request_timeout: Duration,
    /// Time allowed to establish a connection.
    pub connect_timeout: Duration,

    // -- Storage --
    /// Credential/preference file. `None` keeps everything in memory.
    pub storage_path: Option<PathBuf>,

    // -- UI --
    /// Screen requested at startup, before guards apply.
    pub start_route: Route,
    /// How long the UI loop waits for a key before redrawing.
    pub poll_timeout: Duration,
    /// How long a toast stays on screen.
    pub toast_ttl: Duration,
    /// Creation date display format (chrono).
    pub date_format: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        let api = ApiSettings::default();
        Self {
            base_url: api.base_url,
            request_timeout: api.request_timeout,
            connect_timeout: api.connect_timeout,
            storage_path: crate::storage::FileStore::default_path(),
            start_route: Route::Home,
            poll_timeout: Duration::from_millis(50),
            toast_ttl: Duration::from_secs(4),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }
}

impl ClientConfig {
    /// Reads the config file and merges it under the CLI flags.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the config file cannot be read or parsed.
    pub fn load(cli: &CliArgs) -> Result<Self, ConfigError> {
        let file = load_config_file(cli.config.as_deref())?;
        Ok(Self::resolve(cli, &file))
    }

    /// Merges flags over file values over defaults. Timeouts and the toast
    /// duration are file-only settings.
    fn resolve(cli: &CliArgs, file: &ConfigFile) -> Self {
        let defaults = Self::default();

        Self {
            base_url: cli
                .api_url
                .clone()
                .or_else(|| file.api.base_url.clone())
                .unwrap_or(defaults.base_url),
            request_timeout: file
                .api
                .request_timeout_secs
                .map_or(defaults.request_timeout, Duration::from_secs),
            connect_timeout: file
                .api
                .connect_timeout_secs
                .map_or(defaults.connect_timeout, Duration::from_secs),
            storage_path: cli
                .storage
                .clone()
                .or_else(|| file.storage.path.clone())
                .or(defaults.storage_path),
            start_route: cli
                .start_route
                .as_deref()
                .or(file.ui.start_route.as_deref())
                .map_or(defaults.start_route, Route::parse),
            poll_timeout: file
                .ui
                .poll_timeout_ms
                .map_or(defaults.poll_timeout, Duration::from_millis),
            toast_ttl: file
                .ui
                .toast_ttl_secs
                .map_or(defaults.toast_ttl, Duration::from_secs),
            date_format: cli
                .date_format
                .clone()
                .or_else(|| file.ui.date_format.clone())
                .unwrap_or(defaults.date_format),
        }
    }

    /// Connection settings for the API client.
    #[must_use]
    pub fn api_settings(&self) -> ApiSettings {
        ApiSettings {
            base_url: self.base_url.clone(),
            request_timeout: self.request_timeout,
            connect_timeout: self.connect_timeout,
        }
    }
}

/// Command-line flags of the `taskdesk` binary.
#[derive(clap::Parser, Debug, Default)]
#[command(version, about = "Terminal client for a task-management API")]
pub struct CliArgs {
    /// Base URL of the task API (e.g. `http://localhost:4000/api`).
    #[arg(long, env = "TASKDESK_API_URL")]
    pub api_url: Option<String>,

    /// Path to config file (default: `~/.config/taskdesk/config.toml`).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Path to the credential/preference file.
    #[arg(long, env = "TASKDESK_STORAGE")]
    pub storage: Option<PathBuf>,

    /// Screen to open on, as a path (`/home`, `/login`, `/register`,
    /// `/recover`). Unknown paths open the login screen.
    #[arg(long, env = "TASKDESK_START_ROUTE")]
    pub start_route: Option<String>,

    /// Creation date display format (chrono format string).
    #[arg(long)]
    pub date_format: Option<String>,

    /// Log level filter (trace, debug, info, warn, error).
    #[arg(long, default_value = "info", env = "TASKDESK_LOG")]
    pub log_level: String,

    /// Path to log file (default: `$TMPDIR/taskdesk.log`).
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

/// Parses `explicit_path`, or the default file when it exists.
fn load_config_file(explicit_path: Option<&std::path::Path>) -> Result<ConfigFile, ConfigError> {
    let path = if let Some(p) = explicit_path {
        let contents = std::fs::read_to_string(p).map_err(|e| ConfigError::ReadFile {
            path: p.to_path_buf(),
            source: e,
        })?;
        return Ok(toml::from_str(&contents)?);
    } else {
        let Some(config_dir) = dirs::config_dir() else {
            return Ok(ConfigFile::default());
        };
        config_dir.join("taskdesk").join("config.toml")
    };

    match std::fs::read_to_string(&path) {
        Ok(contents) => Ok(toml::from_str(&contents)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(ConfigFile::default()),
        Err(e) => Err(ConfigError::ReadFile { path, source: e }),
    }
}
