//! Service configuration
//!
//! Resolution priority: environment variable, then TOML config file, then
//! compiled default. The TOML file location itself comes from
//! `TRAINSMART_CONFIG` (default `trainsmart.toml` in the working
//! directory); a missing file is not an error.

use serde::Deserialize;
use std::path::PathBuf;
use tracing::{debug, warn};

use crate::error::{Error, Result};

const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:5780";
const DEFAULT_DATABASE_PATH: &str = "trainsmart.db";
const DEFAULT_SUPPORT_CONTACT: &str = "support@trainsmart.de";

/// Resolved service configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP boundary listens on
    pub bind_address: String,
    /// SQLite database file
    pub database_path: PathBuf,
    /// Support contact handed out by purchase recovery
    pub support_contact: String,
}

/// Raw TOML shape; every field optional
#[derive(Debug, Default, Deserialize)]
struct TomlConfig {
    bind_address: Option<String>,
    database_path: Option<String>,
    support_contact: Option<String>,
}

impl Config {
    /// Load configuration with Env → TOML → default priority
    pub fn load() -> Result<Self> {
        let toml_config = load_toml_config()?;

        let bind_address = resolve(
            "TRAINSMART_BIND_ADDRESS",
            toml_config.bind_address.as_deref(),
            DEFAULT_BIND_ADDRESS,
        );
        let database_path = resolve(
            "TRAINSMART_DATABASE_PATH",
            toml_config.database_path.as_deref(),
            DEFAULT_DATABASE_PATH,
        );
        let support_contact = resolve(
            "TRAINSMART_SUPPORT_CONTACT",
            toml_config.support_contact.as_deref(),
            DEFAULT_SUPPORT_CONTACT,
        );

        Ok(Config {
            bind_address,
            database_path: PathBuf::from(database_path),
            support_contact,
        })
    }
}

fn resolve(env_var: &str, toml_value: Option<&str>, default: &str) -> String {
    if let Ok(value) = std::env::var(env_var) {
        if !value.trim().is_empty() {
            debug!("{} resolved from environment", env_var);
            return value;
        }
    }

    if let Some(value) = toml_value {
        if !value.trim().is_empty() {
            return value.to_string();
        }
    }

    default.to_string()
}

fn load_toml_config() -> Result<TomlConfig> {
    let path = std::env::var("TRAINSMART_CONFIG").unwrap_or_else(|_| "trainsmart.toml".to_string());
    let path = PathBuf::from(path);

    if !path.exists() {
        debug!("No config file at {}, using defaults", path.display());
        return Ok(TomlConfig::default());
    }

    let content = std::fs::read_to_string(&path)?;
    match toml::from_str(&content) {
        Ok(config) => Ok(config),
        Err(err) => {
            warn!("Failed to parse {}: {}", path.display(), err);
            Err(Error::Config(format!(
                "Invalid config file {}: {}",
                path.display(),
                err
            )))
        }
    }
}
