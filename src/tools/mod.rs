//! Tool executors for the Apollo MCP Server.
//!
//! Each executor orchestrates validation, the provider client, and the
//! normalizer for one exposed capability:
//! - **search**: people search by title/location/keywords
//! - **enrichment**: single-person contact enrichment
//! - **composite**: search a page, then enrich every result

pub mod composite;
pub mod enrichment;
pub mod search;

pub use composite::{SearchAndEnrichParams, SearchAndEnrichTools};
pub use enrichment::PersonEnrichmentTools;
pub use search::{PeopleSearchTools, SearchPeopleResponse};
