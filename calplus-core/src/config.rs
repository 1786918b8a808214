//! calplus configuration.
//!
//! Read from `~/.config/calplus/config.toml` (created with commented-out
//! defaults on first run), then overridden by `CALPLUS_*` environment
//! variables, e.g. `CALPLUS_PORT=4000`.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::{PlannerError, PlannerResult};

static DEFAULT_PORT: u16 = 3000;
static DEFAULT_SERVER_URL: &str = "http://127.0.0.1:3000";

fn default_data_file() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("calplus").join("events.json"))
        .unwrap_or_else(|| PathBuf::from("~/.calplus/events.json"))
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_server_url() -> String {
    DEFAULT_SERVER_URL.to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct PlannerConfig {
    /// JSON file holding the event collection (server side)
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,

    /// Port the server listens on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Where the CLI reaches the server
    #[serde(default = "default_server_url")]
    pub server_url: String,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        PlannerConfig {
            data_file: default_data_file(),
            port: default_port(),
            server_url: default_server_url(),
        }
    }
}

impl PlannerConfig {
    pub fn config_path() -> PlannerResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| PlannerError::Config("Could not determine config directory".into()))?
            .join("calplus");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the user's config file (creating it if missing) plus environment overrides.
    pub fn load() -> PlannerResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(Some(&config_path))
    }

    /// Load from an explicit file (optional) plus environment overrides.
    pub fn load_from(path: Option<&Path>) -> PlannerResult<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(false));
        }

        builder
            .add_source(Environment::with_prefix("CALPLUS").try_parsing(true))
            .build()
            .map_err(|e| PlannerError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| PlannerError::Config(e.to_string()))
    }

    /// The data file with `~` expanded.
    pub fn data_path(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.data_file.to_string_lossy()).into_owned())
    }

    /// Lock file guarding against a second server on the same data file.
    pub fn lock_path(&self) -> PathBuf {
        self.data_path().with_extension("lock")
    }

    /// Create a config file with all options commented out.
    pub fn create_default_config(path: &Path) -> PlannerResult<()> {
        let contents = format!(
            "\
# calplus configuration

# Where the server keeps your events:
# data_file = \"{}\"

# Port the server listens on:
# port = {}

# Where the calplus CLI finds the server:
# server_url = \"{}\"
",
            default_data_file().display(),
            DEFAULT_PORT,
            DEFAULT_SERVER_URL
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                PlannerError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| PlannerError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}
