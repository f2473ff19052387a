//! Configuration loader and validator for the DataFlow dashboard shell.
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(&'static str),
}

/// Root configuration struct mirroring the YAML schema exactly.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub app: App,
    #[serde(default)]
    pub session: Session,
    #[serde(default)]
    pub auth: Auth,
}

/// Where the session entries live.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// SQLite file under `app.data_dir` (or `app.database_url`).
    #[default]
    Sqlite,
    /// Process-local map; nothing survives a restart.
    Memory,
}

/// App-level settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct App {
    pub data_dir: String,
    #[serde(default)]
    pub storage: StorageBackend,
    /// Overrides the SQLite file derived from `data_dir`.
    #[serde(default)]
    pub database_url: Option<String>,
}

impl Default for App {
    fn default() -> Self {
        Self {
            data_dir: "./data".into(),
            storage: StorageBackend::Sqlite,
            database_url: None,
        }
    }
}

/// Local storage keys and the opaque token written on login.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Session {
    pub token_key: String,
    pub user_key: String,
    pub token_value: String,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            token_key: "dataflow_token".into(),
            user_key: "dataflow_user".into(),
            token_value: "mock-jwt-token".into(),
        }
    }
}

/// Mock authentication backend settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Auth {
    pub latency_ms: u64,
    pub demo_profile: DemoProfile,
}

impl Default for Auth {
    fn default() -> Self {
        Self {
            latency_ms: 1000,
            demo_profile: DemoProfile::default(),
        }
    }
}

/// Profile fields synthesized for every login; the email comes from the form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DemoProfile {
    pub id: String,
    pub name: String,
    pub company: String,
    pub role: String,
}

impl Default for DemoProfile {
    fn default() -> Self {
        Self {
            id: "1".into(),
            name: "John Doe".into(),
            company: "DataFlow Corp".into(),
            role: "Admin".into(),
        }
    }
}

impl Config {
    /// Ensure required directories exist (creates `app.data_dir` if missing).
    pub fn ensure_dirs(&self) -> Result<(), std::io::Error> {
        if self.app.storage == StorageBackend::Memory || self.app.data_dir.trim().is_empty() {
            return Ok(());
        }
        fs::create_dir_all(&self.app.data_dir)
    }

    /// SQLite URL for the session entries.
    pub fn database_url(&self) -> String {
        match &self.app.database_url {
            Some(url) if !url.trim().is_empty() => url.clone(),
            _ => format!("sqlite://{}/dataflow.db", self.app.data_dir.trim_end_matches('/')),
        }
    }

    pub fn login_latency(&self) -> Duration {
        Duration::from_millis(self.auth.latency_ms)
    }
}

/// Load configuration from a YAML file and validate it.
/// - If `path` is None, uses `config.yaml` in the current working directory.
pub fn load(path: Option<&Path>) -> Result<Config, ConfigError> {
    let path = path.unwrap_or_else(|| Path::new("config.yaml"));
    let content = fs::read_to_string(path)?;
    let cfg: Config = serde_yaml::from_str(&content)?;
    validate(&cfg)?;
    Ok(cfg)
}

/// Validate a configuration instance.
pub fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if cfg.app.storage == StorageBackend::Sqlite
        && cfg.app.data_dir.trim().is_empty()
        && cfg.app.database_url.is_none()
    {
        return Err(ConfigError::Invalid(
            "app.data_dir must be non-empty when app.storage is sqlite",
        ));
    }

    let s = &cfg.session;
    if s.token_key.trim().is_empty() {
        return Err(ConfigError::Invalid("session.token_key must be non-empty"));
    }
    if s.user_key.trim().is_empty() {
        return Err(ConfigError::Invalid("session.user_key must be non-empty"));
    }
    if s.token_key == s.user_key {
        return Err(ConfigError::Invalid(
            "session.token_key and session.user_key must differ",
        ));
    }
    // restore() treats an empty entry as absent
    if s.token_value.is_empty() {
        return Err(ConfigError::Invalid("session.token_value must be non-empty"));
    }

    let p = &cfg.auth.demo_profile;
    if p.id.trim().is_empty() {
        return Err(ConfigError::Invalid("auth.demo_profile.id must be non-empty"));
    }
    if p.name.trim().is_empty() {
        return Err(ConfigError::Invalid("auth.demo_profile.name must be non-empty"));
    }

    Ok(())
}

/// Returns the example YAML shipped with the binary.
pub fn example() -> &'static str {
    r#"app:
  data_dir: "./data"
  storage: sqlite

session:
  token_key: "dataflow_token"
  user_key: "dataflow_user"
  token_value: "mock-jwt-token"

auth:
  latency_ms: 1000
  demo_profile:
    id: "1"
    name: "John Doe"
    company: "DataFlow Corp"
    role: "Admin"
"#
}
