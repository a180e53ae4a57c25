//! Application settings loaded from environment variables.

use std::env;
use std::path::Path;

use super::constants::{DEFAULT_DATABASE_URL, DEFAULT_ENV_FILE};

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .finish()
    }
}

impl Config {
    /// Load variables from `env_file`, or from `.env` when none is given.
    ///
    /// A missing default file is not an error. Variables already present in
    /// the process environment are left untouched.
    pub fn load_env_file(env_file: Option<&str>) -> Result<(), dotenvy::Error> {
        match env_file {
            Some(path) => dotenvy::from_path(Path::new(path)),
            None => {
                dotenvy::from_filename(DEFAULT_ENV_FILE).ok();
                Ok(())
            }
        }
    }

    /// Load configuration from the process environment
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
        }
    }

    /// Configuration pointing at an explicit database URL.
    pub fn with_database_url(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
        }
    }
}
