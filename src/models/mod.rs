//! Data structures for the Apollo MCP Server.
//!
//! - **person**: the canonical person record and its sub-records
//! - **query**: validated search and enrichment queries
//! - **outcome**: per-tool result shapes returned to MCP callers

pub mod outcome;
pub mod person;
pub mod query;

pub use outcome::{EnrichmentOutcome, EnrichmentSummary, SearchAndEnrichOutcome};
pub use person::{CanonicalPerson, CompanyInfo, PaginationInfo, PersonLocation, SocialLinks};
pub use query::{EnrichmentQuery, SearchQuery};
