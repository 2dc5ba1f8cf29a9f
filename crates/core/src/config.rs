use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Prefix of environment variables overriding application settings,
/// e.g. `SANDBOX_CONNECT__LOGGING__JSON=true`.
pub const ENV_PREFIX: &str = "SANDBOX_CONNECT";

/// Settings file read when no explicit file is given.
pub const DEFAULT_CONFIG_FILE: &str = "config/sandbox-connect";

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub connection: ConnectionSettings,
    pub workspace: WorkspaceSettings,
    pub logging: LoggingSettings,
}

/// How connection attempts are carried out.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ConnectionSettings {
    /// Program that performs the connection handshake.
    pub command: String,
    /// Extra arguments passed to `command`.
    pub args: Vec<String>,
}

impl Default for ConnectionSettings {
    fn default() -> Self {
        Self {
            command: "ibmi-connect".into(),
            args: Vec::new(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct WorkspaceSettings {
    /// JSON file holding per-connection settings.
    pub settings_path: PathBuf,
    /// Repositories inspected for a branch name, first one wins.
    pub repositories: Vec<PathBuf>,
}

impl Default for WorkspaceSettings {
    fn default() -> Self {
        Self {
            settings_path: PathBuf::from(".sandbox-connect/connections.json"),
            repositories: vec![PathBuf::from(".")],
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingSettings {
    /// Filter used when `RUST_LOG` is unset.
    pub filter: String,
    pub json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            filter: "info".into(),
            json: false,
        }
    }
}

impl AppConfig {
    /// Load settings from `file` (or the default file if present), then
    /// apply `SANDBOX_CONNECT__*` environment overrides.
    pub fn load(file: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_from(file, Self::environment())
    }

    /// Load settings with an explicit environment source.
    pub fn load_from(file: Option<&Path>, environment: Environment) -> Result<Self, ConfigError> {
        let file_source = match file {
            Some(path) => File::from(path).required(true),
            None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let s = Config::builder()
            .add_source(file_source)
            // Map SANDBOX_CONNECT__CONNECTION__COMMAND=x to connection.command
            .add_source(environment)
            .build()?;

        s.try_deserialize()
    }

    /// Environment source for `SANDBOX_CONNECT__*` variables.
    pub fn environment() -> Environment {
        Environment::with_prefix(ENV_PREFIX)
            .separator("__")
            .try_parsing(true)
            .list_separator(",")
            .with_list_parse_key("connection.args")
            .with_list_parse_key("workspace.repositories")
    }
}
