//! Configuration management for Astro AI.
//!
//! Configuration can be set via environment variables:
//! - `OPENAI_API_KEY` - Required. Your OpenAI API key.
//! - `ASTRO_MODEL` - Optional. The chat model to use. Defaults to `gpt-4o-2024-11-20`.
//! - `GOOGLE_APPLICATION_CREDENTIALS` - Required. Path to a service-account key JSON file.
//! - `DRIVE_FOLDER_ID` - Required. Drive folder that receives the palm images.
//! - `ALLOWED_ORIGINS` - Optional. Comma-separated CORS allow-list. Defaults to allowing any origin.
//! - `HOST` - Optional. Server host. Defaults to `127.0.0.1`.
//! - `PORT` - Optional. Server port. Defaults to `3000`.
//! - `ASTRO_MAX_ROUNDS` - Optional. Maximum agent loop rounds. Defaults to `8`.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

/// Service configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// OpenAI API key
    pub api_key: String,

    /// Chat model identifier
    pub model: String,

    /// Path to the Google service-account key JSON
    pub credentials_path: PathBuf,

    /// Drive folder that receives uploaded palm images
    pub drive_folder_id: String,

    /// CORS allow-list; empty means any origin
    pub allowed_origins: Vec<String>,

    /// Server host
    pub host: String,

    /// Server port
    pub port: u16,

    /// Maximum rounds for the agent loop
    pub max_rounds: usize,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEnvVar` if `OPENAI_API_KEY`,
    /// `GOOGLE_APPLICATION_CREDENTIALS`, or `DRIVE_FOLDER_ID` is not set.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| ConfigError::MissingEnvVar("OPENAI_API_KEY".to_string()))?;

        let model = std::env::var("ASTRO_MODEL")
            .unwrap_or_else(|_| "gpt-4o-2024-11-20".to_string());

        let credentials_path = std::env::var("GOOGLE_APPLICATION_CREDENTIALS")
            .map(PathBuf::from)
            .map_err(|_| {
                ConfigError::MissingEnvVar("GOOGLE_APPLICATION_CREDENTIALS".to_string())
            })?;

        let drive_folder_id = std::env::var("DRIVE_FOLDER_ID")
            .map_err(|_| ConfigError::MissingEnvVar("DRIVE_FOLDER_ID".to_string()))?;

        let allowed_origins = std::env::var("ALLOWED_ORIGINS")
            .map(|v| parse_origins(&v))
            .unwrap_or_default();

        let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .map_err(|e| ConfigError::InvalidValue("PORT".to_string(), format!("{}", e)))?;

        let max_rounds = std::env::var("ASTRO_MAX_ROUNDS")
            .unwrap_or_else(|_| "8".to_string())
            .parse()
            .map_err(|e| {
                ConfigError::InvalidValue("ASTRO_MAX_ROUNDS".to_string(), format!("{}", e))
            })?;

        Ok(Self {
            api_key,
            model,
            credentials_path,
            drive_folder_id,
            allowed_origins,
            host,
            port,
            max_rounds,
        })
    }

    /// Create a config with custom values (useful for testing).
    pub fn new(api_key: String, model: String, drive_folder_id: String) -> Self {
        Self {
            api_key,
            model,
            credentials_path: PathBuf::from("credentials.json"),
            drive_folder_id,
            allowed_origins: Vec::new(),
            host: "127.0.0.1".to_string(),
            port: 3000,
            max_rounds: 8,
        }
    }
}

/// Split a comma-separated origin list, dropping empty entries.
fn parse_origins(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_origins_splits_and_trims() {
        let origins = parse_origins("http://localhost:3000, https://astro-ai-fe.vercel.app ,");
        assert_eq!(
            origins,
            vec![
                "http://localhost:3000".to_string(),
                "https://astro-ai-fe.vercel.app".to_string()
            ]
        );
    }

    #[test]
    fn parse_origins_empty_input() {
        assert!(parse_origins("").is_empty());
    }
}
