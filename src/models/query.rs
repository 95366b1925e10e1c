//! Validated query types.
//!
//! These are the outputs of the validation layer and the inputs to the
//! Apollo client. Constructing them through [`crate::validation`] guarantees
//! the bounds and cross-field rules have already been checked.

/// A validated people-search query.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    /// Job titles to match (1-50 entries, each non-empty)
    pub person_titles: Vec<String>,

    /// Locations to match (0-50 entries)
    pub person_locations: Vec<String>,

    /// Free-text keywords (max 500 chars)
    pub q_keywords: Option<String>,

    /// Page number (1-100)
    pub page: u32,

    /// Results per page (1-100)
    pub per_page: u32,
}

/// A validated person-enrichment query.
///
/// At least one identifier combination is guaranteed present: email,
/// linkedin_url, first+last name with an organization name or domain, or
/// full name with an organization name or domain. When either waterfall
/// flag is set, `webhook_url` is guaranteed resolved.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EnrichmentQuery {
    pub email: Option<String>,
    pub linkedin_url: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub name: Option<String>,
    pub organization_name: Option<String>,
    pub domain: Option<String>,

    /// Reveal personal email addresses (consumes credits)
    pub reveal_personal_emails: bool,

    /// Reveal phone numbers (consumes credits)
    pub reveal_phone_number: bool,

    /// Run asynchronous waterfall email discovery
    pub run_waterfall_email: bool,

    /// Run asynchronous waterfall phone discovery
    pub run_waterfall_phone: bool,

    /// Effective callback URL: the caller's explicit value, or the server
    /// default when a waterfall flag is set and no explicit value was given
    pub webhook_url: Option<String>,
}

impl EnrichmentQuery {
    /// Whether this query triggers Apollo's asynchronous waterfall mode.
    pub fn is_async(&self) -> bool {
        self.run_waterfall_email || self.run_waterfall_phone
    }
}
