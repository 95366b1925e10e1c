//! Apollo MCP Server - a Model Context Protocol server for Apollo.io people
//! search and enrichment.
//!
//! This library exposes Apollo's people-search and person-enrichment HTTP
//! endpoints as three MCP tools (`search_people`, `enrich_person`,
//! `search_and_enrich`) with validated inputs and a normalized, canonical
//! person shape in every response.
//!
//! # Architecture
//!
//! - **config**: Configuration management from environment variables
//! - **error**: Custom error types for precise error handling
//! - **validation**: Input validation and cross-field rules per tool
//! - **models**: Canonical person, query, and outcome shapes
//! - **client**: HTTP client for the Apollo API
//! - **normalize**: Mapping of both provider person shapes to the canonical one
//! - **tools**: Tool executors (validate, call, normalize, assemble)
//! - **server**: MCP protocol server

pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod normalize;
pub mod server;
pub mod tools;
pub mod validation;

pub use client::{ApolloClient, AsyncApolloClient, AsyncApolloClientImpl};
pub use config::Config;
pub use error::{ApolloApiError, ConfigError, ToolError, ValidationError};
pub use models::{
    CanonicalPerson, CompanyInfo, EnrichmentOutcome, EnrichmentQuery, EnrichmentSummary,
    PaginationInfo, PersonLocation, SearchAndEnrichOutcome, SearchQuery, SocialLinks,
};
pub use server::ApolloMcpServer;
pub use tools::{
    PeopleSearchTools, PersonEnrichmentTools, SearchAndEnrichParams, SearchAndEnrichTools,
    SearchPeopleResponse,
};
pub use validation::{EnrichPersonParams, SearchPeopleParams};
