//! Mock API settings: flags (or `MOCK_API_*` variables) override
//! `~/.config/taskdesk-mock-api/config.toml`, which overrides defaults.

use std::path::PathBuf;

/// Why the mock API configuration could not be loaded.
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

#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct MockConfigFile {
    server: ServerFileConfig,
}

/// `[server]` section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct ServerFileConfig {
    bind_addr: Option<String>,
    stale_status_echo: Option<bool>,
}

/// CLI arguments for the mock API server.
#[derive(clap::Parser, Debug, Default)]
#[command(version, about = "In-memory TaskDesk API server")]
pub struct MockCliArgs {
    /// Address to bind the server to.
    #[arg(short, long, env = "MOCK_API_ADDR")]
    pub bind: Option<String>,

    /// Path to config file (default: `~/.config/taskdesk-mock-api/config.toml`).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Answer status updates with the pre-update task.
    #[arg(long)]
    pub stale_status_echo: bool,

    /// `tracing` filter directive, e.g. `debug` or `taskdesk_mock_api=trace`.
    #[arg(long, default_value = "info", env = "MOCK_API_LOG")]
    pub log_level: String,
}

/// Fully resolved mock API configuration.
#[derive(Debug, Clone)]
pub struct MockConfig {
    /// Address to bind the server to (e.g., `127.0.0.1:4000`).
    pub bind_addr: String,
    /// See [`crate::store::MockState::with_stale_status_echo`].
    pub stale_status_echo: bool,
    /// Log level filter string.
    pub log_level: String,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:4000".to_string(),
            stale_status_echo: false,
            log_level: "info".to_string(),
        }
    }
}

impl MockConfig {
    /// Reads the config file and merges it under the CLI flags.
    ///
    /// An explicit `--config` path must exist; the default path may be absent.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the config file cannot be read or parsed.
    pub fn load(cli: &MockCliArgs) -> Result<Self, ConfigError> {
        let file = load_config_file(cli.config.as_deref())?;
        Ok(Self::resolve(cli, &file))
    }

    fn resolve(cli: &MockCliArgs, file: &MockConfigFile) -> Self {
        let defaults = Self::default();

        Self {
            bind_addr: cli
                .bind
                .clone()
                .or_else(|| file.server.bind_addr.clone())
                .unwrap_or(defaults.bind_addr),
            stale_status_echo: cli.stale_status_echo
                || file
                    .server
                    .stale_status_echo
                    .unwrap_or(defaults.stale_status_echo),
            log_level: cli.log_level.clone(),
        }
    }
}

fn load_config_file(explicit_path: Option<&std::path::Path>) -> Result<MockConfigFile, ConfigError> {
    if let Some(p) = explicit_path {
        let contents = std::fs::read_to_string(p).map_err(|e| ConfigError::ReadFile {
            path: p.to_path_buf(),
            source: e,
        })?;
        return Ok(toml::from_str(&contents)?);
    }
    let Some(config_dir) = dirs::config_dir() else {
        return Ok(MockConfigFile::default());
    };
    let path = config_dir.join("taskdesk-mock-api").join("config.toml");

    match std::fs::read_to_string(&path) {
        Ok(contents) => Ok(toml::from_str(&contents)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(MockConfigFile::default()),
        Err(e) => Err(ConfigError::ReadFile { path, source: e }),
    }
}
