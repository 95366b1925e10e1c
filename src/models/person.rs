//! Canonical person record.
//!
//! Apollo's search and enrichment endpoints return structurally different
//! person records. Both are mapped into the single [`CanonicalPerson`] shape
//! defined here, so MCP callers always see the same fields regardless of
//! which endpoint produced the data.

use serde::{Deserialize, Serialize};

/// A person record, unified across the search and enrichment endpoints.
///
/// Instances are produced fresh for each response and never mutated after
/// construction. Contact fields (email, personal_emails, phone_numbers) are
/// only ever populated from enrichment results; the search endpoint cannot
/// return contact data.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct CanonicalPerson {
    /// Apollo person ID
    pub id: Option<String>,

    /// First name
    pub first_name: Option<String>,

    /// Last name
    pub last_name: Option<String>,

    /// Full name
    pub name: Option<String>,

    /// Current job title
    pub title: Option<String>,

    /// Profile headline
    pub headline: Option<String>,

    /// LinkedIn profile URL
    pub linkedin_url: Option<String>,

    /// Work email address (enrichment only, null from search)
    pub email: Option<String>,

    /// Verification status of the work email (e.g. "verified")
    pub email_status: Option<String>,

    /// Personal email addresses (enrichment only, empty from search)
    #[serde(default)]
    pub personal_emails: Vec<String>,

    /// Phone numbers, deduplicated by sanitized value
    /// (enrichment only, empty from search)
    #[serde(default)]
    pub phone_numbers: Vec<String>,

    /// Geographic location
    #[serde(default)]
    pub location: PersonLocation,

    /// Current employer (all fields null when Apollo omits the organization)
    #[serde(default)]
    pub company: CompanyInfo,

    /// Social profile links
    #[serde(default)]
    pub social: SocialLinks,
}

/// Geographic location of a person.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct PersonLocation {
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
}

/// Employer sub-record, projected from Apollo's nested organization object.
///
/// The sub-record is always present on a [`CanonicalPerson`]; a missing
/// organization yields all-null fields rather than an absent record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct CompanyInfo {
    pub id: Option<String>,
    pub name: Option<String>,
    pub domain: Option<String>,
    pub website_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub industry: Option<String>,
    pub employee_count: Option<u64>,
}

/// Social profile links.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct SocialLinks {
    pub twitter_url: Option<String>,
    pub facebook_url: Option<String>,
    pub github_url: Option<String>,
}

/// Pagination metadata for a search response.
///
/// Echoes the provider's values when present, otherwise defaults derived
/// from the request itself.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct PaginationInfo {
    /// Current page number
    pub page: u32,

    /// Number of results per page
    pub per_page: u32,

    /// Total matching entries across all pages
    pub total_entries: u64,

    /// Total number of pages
    pub total_pages: u64,
}
