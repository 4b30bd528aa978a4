use clap::Parser;
use std::path::PathBuf;
use todo_core::config::{self, ConfigOverrides, ServerConfig};
use todo_core::error::AppError;

#[derive(Parser, Debug, Default)]
#[command(author, version, about = "HTTP service for a JSON-backed task list", long_about = None)]
pub struct Cli {
    /// Path to a JSON config file (also read from TODOAPP_CONFIG_PATH)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Address to bind
    ///
    /// Example: todo_server --host 127.0.0.1
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(long, short = 'p')]
    pub port: Option<u16>,

    /// Task document location
    ///
    /// Example: todo_server --store ./data/tasks.json
    #[arg(long = "store", value_name = "FILE")]
    pub store_path: Option<PathBuf>,

    /// HTML page served at `/`
    #[arg(long = "index", value_name = "FILE")]
    pub index_path: Option<PathBuf>,
}

impl Cli {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            host: self.host.clone(),
            port: self.port,
            store_path: self.store_path.clone(),
            index_path: self.index_path.clone(),
        }
    }

    /// Layers defaults, config file, environment and flags, in that order.
    pub fn resolve_config(&self) -> Result<ServerConfig, AppError> {
        let file_config = match self.config.clone().or_else(config::config_path) {
            Some(path) => config::load_config_from_path(&path)?,
            None => config::Config::default(),
        };
        let with_env = config::merge_overrides(&file_config, &config::overrides_from_env()?);
        let merged = config::merge_overrides(&with_env, &self.overrides());
        Ok(config::resolve(merged))
    }
}
