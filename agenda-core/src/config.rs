//! Server configuration.

use std::path::{Path, PathBuf};

use config::{Config, File};
use serde::Deserialize;

use crate::error::{AgendaError, AgendaResult};

static DEFAULT_DATABASE_PATH: &str = "data_base.json";
static DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 5000;

/// Looked up in the working directory before the user config directory.
static LOCAL_CONFIG_FILE: &str = "agenda.toml";

fn default_database_path() -> PathBuf {
    PathBuf::from(DEFAULT_DATABASE_PATH)
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

/// Configuration read from `./agenda.toml` or `~/.config/agenda/config.toml`.
///
/// Every key is optional; a missing file means all defaults.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AgendaConfig {
    /// JSON document holding the `eventos` and `ubicaciones` tables.
    #[serde(default = "default_database_path")]
    pub database: PathBuf,

    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for AgendaConfig {
    fn default() -> Self {
        AgendaConfig {
            database: default_database_path(),
            host: default_host(),
            port: default_port(),
        }
    }
}

impl AgendaConfig {
    pub fn load() -> AgendaResult<Self> {
        Self::load_from(Self::config_path().as_deref())
    }

    /// Load from an explicit file. `None`, or a path that does not exist,
    /// yields the defaults.
    pub fn load_from(path: Option<&Path>) -> AgendaResult<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(false));
        }

        builder
            .build()
            .map_err(|e| AgendaError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| AgendaError::Config(e.to_string()))
    }

    pub fn config_path() -> Option<PathBuf> {
        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.exists() {
            return Some(local);
        }

        dirs::config_dir().map(|dir| dir.join("agenda").join("config.toml"))
    }

    /// Database path with a leading `~` expanded.
    pub fn database_path(&self) -> PathBuf {
        let expanded = shellexpand::tilde(&self.database.to_string_lossy()).into_owned();
        PathBuf::from(expanded)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AgendaConfig::load_from(Some(&dir.path().join("nope.toml"))).unwrap();
        assert_eq!(config, AgendaConfig::default());
        assert_eq!(config.bind_address(), "127.0.0.1:5000");
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("agenda.toml");
        std::fs::write(&path, "port = 8080\ndatabase = \"/srv/agenda/db.json\"\n").unwrap();

        let config = AgendaConfig::load_from(Some(&path)).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.database_path(), PathBuf::from("/srv/agenda/db.json"));
    }

    #[test]
    fn test_bad_value_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("agenda.toml");
        std::fs::write(&path, "port = \"not a port\"\n").unwrap();

        let err = AgendaConfig::load_from(Some(&path)).unwrap_err();
        assert!(matches!(err, AgendaError::Config(_)));
    }
}
