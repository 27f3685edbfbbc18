//! Runtime configuration loaded from environment variables.
//!
//! Credentials may be supplied inline or as file paths (`*_FILE` variants);
//! the file variant takes precedence and its content is trimmed. Loading is
//! fatal on any missing or invalid value — the process never starts with a
//! partial configuration.

use std::env;
use std::fs;

use secrecy::SecretString;

/// Everything the process needs besides the fixed check constants.
#[derive(Debug)]
pub struct RuntimeConfig {
    /// GitHub App identifier.
    pub app_id: u64,
    /// RSA private key of the App (PEM).
    pub private_key: SecretString,
    /// Secret GitHub signs webhook deliveries with.
    pub webhook_secret: SecretString,
    /// Port the webhook server listens on.
    pub port: u16,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(&'static str),
    #[error("invalid value for environment variable: {0}")]
    InvalidValue(&'static str),
    #[error("failed to read {variable} ({path}): {source}")]
    UnreadableFile {
        variable: &'static str,
        path: String,
        source: std::io::Error,
    },
}

impl RuntimeConfig {
    /// Loads the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let app_id = env::var("APP_ID")
            .map_err(|_| ConfigError::MissingEnvVar("APP_ID"))?
            .parse()
            .map_err(|_| ConfigError::InvalidValue("APP_ID"))?;

        let private_key = secret_from_env("PRIVATE_KEY", "PRIVATE_KEY_FILE")?;
        let webhook_secret = secret_from_env("WEBHOOK_SECRET", "WEBHOOK_SECRET_FILE")?;

        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("PORT"))?;

        Ok(Self {
            app_id,
            private_key,
            webhook_secret,
            port,
        })
    }
}

/// Reads a secret from `file_variable` (a path, preferred) or `variable`.
fn secret_from_env(
    variable: &'static str,
    file_variable: &'static str,
) -> Result<SecretString, ConfigError> {
    if let Ok(path) = env::var(file_variable) {
        let content = fs::read_to_string(&path).map_err(|source| ConfigError::UnreadableFile {
            variable: file_variable,
            path,
            source,
        })?;
        return Ok(SecretString::from(content.trim().to_string()));
    }

    env::var(variable)
        .map(SecretString::from)
        .map_err(|_| ConfigError::MissingEnvVar(variable))
}
