//! Runtime configuration.
//!
//! Everything comes from environment variables. A `.env` file is read for
//! local development, except in tests.

use std::path::PathBuf;
use tracing::Level;

use crate::auth::{normalize_mfa_code, DEMO_MFA_CODE, MFA_CODE_LEN};
use crate::models::Language;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// SQLite file for the session store; `None` keeps it in memory
    pub store_path: Option<PathBuf>,
    /// Code the demo MFA step accepts
    pub mfa_code: String,
    /// Language before the user picks one
    pub default_language: Language,
    pub log_level: Level,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_path: None,
            mfa_code: DEMO_MFA_CODE.to_string(),
            default_language: Language::Es,
            log_level: Level::INFO,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let store_path = lookup("DIAGNOVET_STORE_PATH")
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        let mfa_code = lookup("DIAGNOVET_MFA_CODE").unwrap_or_else(|| DEMO_MFA_CODE.to_string());
        let digits = normalize_mfa_code(&mfa_code);
        if digits.len() != MFA_CODE_LEN || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(ConfigError::InvalidValue(
                "DIAGNOVET_MFA_CODE".to_string(),
                format!("'{}' is not a 6-digit code", mfa_code),
            ));
        }

        let language_str = lookup("DIAGNOVET_LANGUAGE").unwrap_or_else(|| "es".to_string());
        let default_language = language_str
            .parse::<Language>()
            .map_err(|e| ConfigError::InvalidValue("DIAGNOVET_LANGUAGE".to_string(), e))?;

        let log_level_str = lookup("RUST_LOG").unwrap_or_else(|| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        Ok(Self {
            store_path,
            mfa_code,
            default_language,
            log_level,
        })
    }
}
