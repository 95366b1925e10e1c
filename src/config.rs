//! Configuration management for the Apollo MCP Server.
//!
//! This module handles loading and validating configuration from environment
//! variables. It avoids polluting stdout (which MCP uses for communication)
//! by loading the .env file via `dotenvy`, which never prints.

use crate::error::{ConfigError, ConfigResult};
use std::env;

/// Default base URL for the Apollo API.
pub const DEFAULT_API_BASE_URL: &str = "https://api.apollo.io/api/v1";

/// Configuration for the Apollo MCP Server.
#[derive(Debug, Clone)]
pub struct Config {
    /// Apollo API base URL
    pub apollo_api_url: String,

    /// Apollo API key for authentication
    pub apollo_api_key: String,

    /// HTTP request timeout in seconds (default: 30)
    pub request_timeout: u64,

    /// Server-level default webhook URL for asynchronous (waterfall)
    /// enrichment, used when the caller does not supply one
    pub default_webhook_url: Option<String>,

    /// Maximum in-flight enrichment calls in search_and_enrich (default: 5)
    pub enrich_concurrency: usize,

    /// Log level (default: "error")
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Required environment variables:
    /// - `APOLLO_API_KEY`: API key for authentication
    ///
    /// Optional environment variables:
    /// - `APOLLO_API_BASE_URL`: Base URL for the Apollo API
    /// - `REQUEST_TIMEOUT`: HTTP timeout in seconds (default: 30)
    /// - `APOLLO_DEFAULT_WEBHOOK_URL`: Default waterfall callback URL
    /// - `ENRICH_CONCURRENCY`: Max parallel enrichments (1-20, default: 5)
    /// - `LOG_LEVEL`: Logging level (default: "error")
    pub fn from_env() -> ConfigResult<Self> {
        // Try to load .env file if it exists (but don't fail if it doesn't)
        let _ = dotenvy::dotenv();

        let apollo_api_key = env::var("APOLLO_API_KEY")
            .map_err(|_| ConfigError::MissingVar("APOLLO_API_KEY".to_string()))?;

        // Validate API key is not empty
        if apollo_api_key.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                var: "APOLLO_API_KEY".to_string(),
                reason: "Cannot be empty".to_string(),
            });
        }

        let apollo_api_url =
            env::var("APOLLO_API_BASE_URL").unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string());

        // Validate API URL format
        if !apollo_api_url.starts_with("http://") && !apollo_api_url.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                var: "APOLLO_API_BASE_URL".to_string(),
                reason: "Must start with http:// or https://".to_string(),
            });
        }

        let default_webhook_url = match env::var("APOLLO_DEFAULT_WEBHOOK_URL") {
            Ok(url) if !url.trim().is_empty() => {
                if !url.starts_with("http://") && !url.starts_with("https://") {
                    return Err(ConfigError::InvalidValue {
                        var: "APOLLO_DEFAULT_WEBHOOK_URL".to_string(),
                        reason: "Must start with http:// or https://".to_string(),
                    });
                }
                Some(url)
            }
            _ => None,
        };

        let request_timeout = Self::parse_env_u64("REQUEST_TIMEOUT", 30)?;
        let enrich_concurrency = Self::parse_env_usize("ENRICH_CONCURRENCY", 5)?;

        if enrich_concurrency == 0 || enrich_concurrency > 20 {
            return Err(ConfigError::InvalidValue {
                var: "ENRICH_CONCURRENCY".to_string(),
                reason: "Must be between 1 and 20".to_string(),
            });
        }

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "error".to_string());

        Ok(Config {
            apollo_api_url,
            apollo_api_key,
            request_timeout,
            default_webhook_url,
            enrich_concurrency,
            log_level,
        })
    }

    /// Parse an environment variable as u64 with a default value.
    fn parse_env_u64(var_name: &str, default: u64) -> ConfigResult<u64> {
        match env::var(var_name) {
            Ok(val) => val.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }

    /// Parse an environment variable as usize with a default value.
    fn parse_env_usize(var_name: &str, default: usize) -> ConfigResult<usize> {
        match env::var(var_name) {
            Ok(val) => val.parse::<usize>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            apollo_api_url: DEFAULT_API_BASE_URL.to_string(),
            apollo_api_key: String::new(),
            request_timeout: 30,
            default_webhook_url: None,
            enrich_concurrency: 5,
            log_level: "error".to_string(),
        }
    }
}
