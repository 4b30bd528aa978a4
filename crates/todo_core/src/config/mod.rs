use crate::error::AppError;
use crate::storage::json_store;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_ENV_VAR: &str = "TODOAPP_CONFIG_PATH";
pub const STORE_ENV_VAR: &str = "TODOAPP_STORE_PATH";
pub const INDEX_ENV_VAR: &str = "TODOAPP_INDEX_PATH";
pub const HOST_ENV_VAR: &str = "HOST";
pub const PORT_ENV_VAR: &str = "PORT";

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;
pub const INDEX_FILE_NAME: &str = "index.html";

/// Settings as they appear in the optional JSON config file.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default)]
    pub port: Option<u16>,
    #[serde(default)]
    pub store_path: Option<PathBuf>,
    #[serde(default)]
    pub index_path: Option<PathBuf>,
}

/// Values layered over the file config: environment first, then CLI flags.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub store_path: Option<PathBuf>,
    pub index_path: Option<PathBuf>,
}

/// Fully resolved settings for one server run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub store_path: PathBuf,
    pub index_path: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            store_path: json_store::default_store_path(),
            index_path: PathBuf::from(INDEX_FILE_NAME),
        }
    }
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

pub fn config_path() -> Option<PathBuf> {
    non_blank_env(CONFIG_ENV_VAR).map(PathBuf::from)
}

/// Loads the config file at `path`; a missing file means "all defaults".
pub fn load_config_from_path(path: &Path) -> Result<Config, AppError> {
    if !path.exists() {
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path)
        .map_err(|err| AppError::invalid_config(format!("{}: {}", path.display(), err)))?;
    serde_json::from_str(&content).map_err(|err| {
        AppError::invalid_config(format!("invalid JSON in {}: {}", path.display(), err))
    })
}

pub fn overrides_from_env() -> Result<ConfigOverrides, AppError> {
    let port = match non_blank_env(PORT_ENV_VAR) {
        Some(raw) => Some(parse_port(&raw)?),
        None => None,
    };

    Ok(ConfigOverrides {
        host: non_blank_env(HOST_ENV_VAR),
        port,
        store_path: non_blank_env(STORE_ENV_VAR).map(PathBuf::from),
        index_path: non_blank_env(INDEX_ENV_VAR).map(PathBuf::from),
    })
}

pub fn parse_port(raw: &str) -> Result<u16, AppError> {
    raw.trim()
        .parse::<u16>()
        .map_err(|err| AppError::invalid_config(format!("invalid port '{raw}': {err}")))
}

pub fn merge_overrides(base: &Config, overrides: &ConfigOverrides) -> Config {
    let mut merged = base.clone();
    if let Some(host) = overrides.host.as_ref() {
        merged.host = Some(host.clone());
    }
    if let Some(port) = overrides.port {
        merged.port = Some(port);
    }
    if let Some(store_path) = overrides.store_path.as_ref() {
        merged.store_path = Some(store_path.clone());
    }
    if let Some(index_path) = overrides.index_path.as_ref() {
        merged.index_path = Some(index_path.clone());
    }
    merged
}

pub fn resolve(config: Config) -> ServerConfig {
    let defaults = ServerConfig::default();
    ServerConfig {
        host: config.host.unwrap_or(defaults.host),
        port: config.port.unwrap_or(defaults.port),
        store_path: config.store_path.unwrap_or(defaults.store_path),
        index_path: config.index_path.unwrap_or(defaults.index_path),
    }
}

fn non_blank_env(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .filter(|value| !value.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::{
        Config, ConfigOverrides, ServerConfig, load_config_from_path, merge_overrides, parse_port,
        resolve,
    };
    use std::fs;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_path(file_name: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir().join(format!("todoapp-{nanos}-{file_name}"))
    }

    #[test]
    fn load_config_missing_returns_defaults() {
        let path = temp_path("missing-config.json");
        let loaded = load_config_from_path(&path).unwrap();

        assert_eq!(loaded, Config::default());
    }

    #[test]
    fn load_config_invalid_returns_error() {
        let path = temp_path("invalid-config.json");
        fs::write(&path, "{ invalid json ").unwrap();

        let err = load_config_from_path(&path).unwrap_err();
        fs::remove_file(&path).ok();

        assert_eq!(err.code(), "invalid_config");
    }

    #[test]
    fn load_config_rejects_unknown_keys() {
        let path = temp_path("unknown-config.json");
        fs::write(&path, "{\"theme\": \"noir\"}").unwrap();

        let err = load_config_from_path(&path).unwrap_err();
        fs::remove_file(&path).ok();

        assert_eq!(err.code(), "invalid_config");
    }

    #[test]
    fn load_config_reads_valid_file() {
        let path = temp_path("valid-config.json");
        let content = serde_json::json!({
            "port": 8080,
            "store_path": "/var/lib/todo/tasks.json"
        });
        fs::write(&path, serde_json::to_string(&content).unwrap()).unwrap();

        let loaded = load_config_from_path(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(loaded.port, Some(8080));
        assert_eq!(
            loaded.store_path,
            Some(PathBuf::from("/var/lib/todo/tasks.json"))
        );
        assert_eq!(loaded.host, None);
    }

    #[test]
    fn resolve_fills_defaults() {
        let resolved = resolve(Config::default());

        assert_eq!(resolved, ServerConfig::default());
        assert_eq!(resolved.address(), "0.0.0.0:3000");
        assert_eq!(resolved.store_path, PathBuf::from("tasks.json"));
        assert_eq!(resolved.index_path, PathBuf::from("index.html"));
    }

    #[test]
    fn merge_overrides_wins_over_file_values() {
        let base = Config {
            host: Some("127.0.0.1".into()),
            port: Some(8080),
            store_path: None,
            index_path: Some("page.html".into()),
        };
        let overrides = ConfigOverrides {
            port: Some(9000),
            store_path: Some("other.json".into()),
            ..ConfigOverrides::default()
        };

        let merged = merge_overrides(&base, &overrides);

        assert_eq!(merged.host.as_deref(), Some("127.0.0.1"));
        assert_eq!(merged.port, Some(9000));
        assert_eq!(merged.store_path, Some(PathBuf::from("other.json")));
        assert_eq!(merged.index_path, Some(PathBuf::from("page.html")));
        assert_eq!(base.port, Some(8080));
    }

    #[test]
    fn merge_overrides_with_empty_overrides_returns_clone() {
        let base = Config {
            host: Some("localhost".into()),
            ..Config::default()
        };

        let merged = merge_overrides(&base, &ConfigOverrides::default());

        assert_eq!(merged, base);
    }

    #[test]
    fn parse_port_rejects_garbage() {
        assert_eq!(parse_port(" 3001 ").unwrap(), 3001);
        assert_eq!(parse_port("http").unwrap_err().code(), "invalid_config");
        assert_eq!(parse_port("70000").unwrap_err().code(), "invalid_config");
    }
}
