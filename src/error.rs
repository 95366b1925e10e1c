//! Error types for the Apollo MCP Server.
//!
//! This module defines custom error types using `thiserror` for precise error handling.

use thiserror::Error;

/// Errors that can occur when interacting with the Apollo API.
///
/// Error messages never contain the API key or the request body that was
/// sent upstream.
#[derive(Error, Debug)]
pub enum ApolloApiError {
    /// HTTP transport failed before a response was received
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// API returned a non-2xx status code
    #[error("API error (status {status}): {status_text}")]
    ApiError { status: u16, status_text: String },

    /// Failed to parse JSON response
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Network timeout
    #[error("Request timeout")]
    Timeout,

    /// Authentication failed
    #[error("Authentication failed")]
    Unauthorized,

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required environment variable is missing
    #[error("Missing required environment variable: {0}")]
    MissingVar(String),

    /// Environment variable has invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },
}

/// Errors produced by input validation before any provider call is made.
///
/// Cross-field rule violations are collected and reported together rather
/// than failing on the first one.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// A single field failed a bound or format check
    #[error("Invalid value for '{field}': {reason}")]
    InvalidField { field: String, reason: String },

    /// One or more cross-field rules were violated
    #[error("Validation failed: {}", .0.join("; "))]
    RulesViolated(Vec<String>),
}

/// Errors surfaced by the tool executors: either the input failed
/// validation or the provider call failed.
#[derive(Error, Debug)]
pub enum ToolError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Api(#[from] ApolloApiError),
}

/// Convenience type alias for Results with ToolError
pub type ToolResult<T> = Result<T, ToolError>;

/// Convenience type alias for Results with ApolloApiError
pub type ApolloApiResult<T> = Result<T, ApolloApiError>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Convenience type alias for Results with ValidationError
pub type ValidationResult<T> = Result<T, ValidationError>;
