use crate::tools::env_args::{retrieve_expected_setting, retrieve_setting};
use derive_getters::Getters;
use log::warn;
use thiserror::Error;

const DATABASE_URL_ARG: &str = "--database-url";
const DATABASE_URL_ENV_VAR: &str = "DATABASE_URL";
const PORT_ARGS: [&str; 2] = ["-p", "--port"];
const PORT_ENV_VAR: &str = "PORT";
const ALLOWED_ORIGINS_ARG: &str = "--allowed-origins";
const ALLOWED_ORIGINS_ENV_VAR: &str = "ALLOWED_ORIGINS";

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:5173";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("No database URL: pass `--database-url=` or set `DATABASE_URL`.")]
    MissingDatabaseUrl,
}

/// Settings read once at startup.
/// Each one comes from the command line first, then from the environment.
#[derive(Debug, Getters, PartialEq, Clone)]
pub struct AppConfig {
    database_url: String,
    port: u16,
    allowed_origins: Vec<String>,
}

impl AppConfig {
    pub fn new(database_url: String, port: u16, allowed_origins: Vec<String>) -> Self {
        Self {
            database_url,
            port,
            allowed_origins,
        }
    }

    pub fn load() -> Result<Self, ConfigError> {
        let database_url = retrieve_expected_setting(
            DATABASE_URL_ARG,
            DATABASE_URL_ENV_VAR,
            ConfigError::MissingDatabaseUrl,
        )?;

        Ok(Self::new(database_url, load_port(), load_allowed_origins()))
    }
}

fn load_port() -> u16 {
    match retrieve_setting(PORT_ARGS.to_vec(), PORT_ENV_VAR) {
        None => DEFAULT_PORT,
        Some(port) => port.trim().parse().unwrap_or_else(|_| {
            warn!("Invalid port, using default one [port: {port}, default: {DEFAULT_PORT}]");
            DEFAULT_PORT
        }),
    }
}

/// Comma-separated list. Blank entries are ignored.
fn load_allowed_origins() -> Vec<String> {
    let origins = retrieve_setting(ALLOWED_ORIGINS_ARG, ALLOWED_ORIGINS_ENV_VAR)
        .map(|origins| {
            origins
                .split(',')
                .map(|origin| origin.trim().trim_end_matches('/').to_owned())
                .filter(|origin| !origin.is_empty())
                .collect::<Vec<_>>()
        })
        .unwrap_or_default();

    if origins.is_empty() {
        vec![DEFAULT_ALLOWED_ORIGIN.to_owned()]
    } else {
        origins
    }
}
