//! Input validation for the MCP tools.
//!
//! This module sits between the raw tool parameters deserialized from MCP
//! calls and the validated query types the Apollo client consumes. Field
//! bounds are checked first; cross-field rules are collected by an explicit
//! post-check so that all violations are reported together.
//!
//! Validation is pure: no side effects, no partial acceptance.

use crate::error::{ValidationError, ValidationResult};
use crate::models::{EnrichmentQuery, SearchQuery};

/// Maximum number of job titles per search.
pub const MAX_PERSON_TITLES: usize = 50;

/// Maximum number of locations per search.
pub const MAX_PERSON_LOCATIONS: usize = 50;

/// Maximum keyword string length.
pub const MAX_KEYWORDS_LEN: usize = 500;

/// Maximum length for any single identifier field.
pub const MAX_FIELD_LEN: usize = 255;

/// Page and per_page bounds.
pub const MAX_PAGE: u32 = 100;
pub const MAX_PER_PAGE: u32 = 100;
pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PER_PAGE: u32 = 25;

/// Raw parameters for the people-search tool, before validation.
#[derive(Debug, Clone, Default)]
pub struct SearchPeopleParams {
    pub person_titles: Vec<String>,
    pub person_locations: Option<Vec<String>>,
    pub q_keywords: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

/// Raw parameters for the person-enrichment tool, before validation.
#[derive(Debug, Clone, Default)]
pub struct EnrichPersonParams {
    pub email: Option<String>,
    pub linkedin_url: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub name: Option<String>,
    pub organization_name: Option<String>,
    pub domain: Option<String>,
    pub reveal_personal_emails: Option<bool>,
    pub reveal_phone_number: Option<bool>,
    pub run_waterfall_email: Option<bool>,
    pub run_waterfall_phone: Option<bool>,
    pub webhook_url: Option<String>,
}

/// Validate and default raw search parameters.
///
/// Bounds: person_titles 1-50 (each non-empty), person_locations 0-50,
/// q_keywords <= 500 chars, page 1-100 (default 1), per_page 1-100
/// (default 25).
pub fn validate_search(params: &SearchPeopleParams) -> ValidationResult<SearchQuery> {
    let person_titles: Vec<String> = params
        .person_titles
        .iter()
        .map(|t| t.trim().to_string())
        .collect();

    if person_titles.is_empty() {
        return Err(invalid("person_titles", "at least one job title is required"));
    }
    if person_titles.len() > MAX_PERSON_TITLES {
        return Err(invalid(
            "person_titles",
            format!("at most {} job titles are allowed", MAX_PERSON_TITLES),
        ));
    }
    if person_titles.iter().any(|t| t.is_empty()) {
        return Err(invalid("person_titles", "job titles must be non-empty"));
    }

    let person_locations: Vec<String> = params
        .person_locations
        .as_deref()
        .unwrap_or_default()
        .iter()
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty())
        .collect();

    if person_locations.len() > MAX_PERSON_LOCATIONS {
        return Err(invalid(
            "person_locations",
            format!("at most {} locations are allowed", MAX_PERSON_LOCATIONS),
        ));
    }

    let q_keywords = non_empty(params.q_keywords.as_deref());
    if let Some(keywords) = &q_keywords {
        if keywords.len() > MAX_KEYWORDS_LEN {
            return Err(invalid(
                "q_keywords",
                format!("must be at most {} characters", MAX_KEYWORDS_LEN),
            ));
        }
    }

    let page = params.page.unwrap_or(DEFAULT_PAGE);
    if page < 1 || page > MAX_PAGE {
        return Err(invalid("page", format!("must be between 1 and {}", MAX_PAGE)));
    }

    let per_page = params.per_page.unwrap_or(DEFAULT_PER_PAGE);
    if per_page < 1 || per_page > MAX_PER_PAGE {
        return Err(invalid(
            "per_page",
            format!("must be between 1 and {}", MAX_PER_PAGE),
        ));
    }

    Ok(SearchQuery {
        person_titles,
        person_locations,
        q_keywords,
        page,
        per_page,
    })
}

/// Validate raw enrichment parameters.
///
/// Per-field checks run first (lengths, email and URL well-formedness),
/// then the cross-field rules: at least one identifier combination must be
/// present, and a waterfall flag requires a resolvable webhook URL
/// (explicit or `default_webhook_url`).
///
/// The resolved webhook is carried on the returned query only when a
/// waterfall flag is set; for synchronous calls it is dropped entirely.
pub fn validate_enrich(
    params: &EnrichPersonParams,
    default_webhook_url: Option<&str>,
) -> ValidationResult<EnrichmentQuery> {
    let email = checked_field("email", params.email.as_deref())?;
    if let Some(email) = &email {
        if !is_well_formed_email(email) {
            return Err(invalid("email", "not a well-formed email address"));
        }
    }

    let linkedin_url = checked_field("linkedin_url", params.linkedin_url.as_deref())?;
    if let Some(url) = &linkedin_url {
        if !is_http_url(url) {
            return Err(invalid("linkedin_url", "must be an http(s) URL"));
        }
    }

    let webhook_url = checked_field("webhook_url", params.webhook_url.as_deref())?;
    if let Some(url) = &webhook_url {
        if !is_http_url(url) {
            return Err(invalid("webhook_url", "must be an http(s) URL"));
        }
    }

    let first_name = checked_field("first_name", params.first_name.as_deref())?;
    let last_name = checked_field("last_name", params.last_name.as_deref())?;
    let name = checked_field("name", params.name.as_deref())?;
    let organization_name = checked_field("organization_name", params.organization_name.as_deref())?;
    let domain = checked_field("domain", params.domain.as_deref())?;

    let run_waterfall_email = params.run_waterfall_email.unwrap_or(false);
    let run_waterfall_phone = params.run_waterfall_phone.unwrap_or(false);
    let is_async = run_waterfall_email || run_waterfall_phone;

    // Effective callback: explicit value wins, server default applies only
    // to async calls. Synchronous calls never carry a webhook.
    let webhook_url = if is_async {
        webhook_url.or_else(|| default_webhook_url.map(str::to_string))
    } else {
        None
    };

    let query = EnrichmentQuery {
        email,
        linkedin_url,
        first_name,
        last_name,
        name,
        organization_name,
        domain,
        reveal_personal_emails: params.reveal_personal_emails.unwrap_or(false),
        reveal_phone_number: params.reveal_phone_number.unwrap_or(false),
        run_waterfall_email,
        run_waterfall_phone,
        webhook_url,
    };

    let violations = cross_field_violations(&query);
    if !violations.is_empty() {
        return Err(ValidationError::RulesViolated(violations));
    }

    Ok(query)
}

/// Post-check for the enrichment cross-field rules.
///
/// Returns every violated rule so callers see them all at once.
pub fn cross_field_violations(query: &EnrichmentQuery) -> Vec<String> {
    let mut violations = Vec::new();

    let has_org = query.organization_name.is_some() || query.domain.is_some();
    let has_split_name = query.first_name.is_some() && query.last_name.is_some();
    let has_identifier = query.email.is_some()
        || query.linkedin_url.is_some()
        || (has_split_name && has_org)
        || (query.name.is_some() && has_org);

    if !has_identifier {
        violations.push(
            "at least one identifier is required: email, linkedin_url, \
             first_name+last_name with organization_name or domain, or \
             name with organization_name or domain"
                .to_string(),
        );
    }

    if query.is_async() && query.webhook_url.is_none() {
        violations.push(
            "waterfall enrichment requires a webhook URL (set webhook_url or \
             configure a server default)"
                .to_string(),
        );
    }

    violations
}

/// Trim an optional string, mapping empty to None.
fn non_empty(value: Option<&str>) -> Option<String> {
    value.map(str::trim).filter(|v| !v.is_empty()).map(String::from)
}

/// Trim an optional field and enforce the shared length bound.
fn checked_field(field: &str, value: Option<&str>) -> ValidationResult<Option<String>> {
    let value = non_empty(value);
    if let Some(v) = &value {
        if v.len() > MAX_FIELD_LEN {
            return Err(invalid(
                field,
                format!("must be at most {} characters", MAX_FIELD_LEN),
            ));
        }
    }
    Ok(value)
}

fn invalid(field: &str, reason: impl Into<String>) -> ValidationError {
    ValidationError::InvalidField {
        field: field.to_string(),
        reason: reason.into(),
    }
}

/// Basic email well-formedness: one '@', non-empty local part, domain with
/// at least one '.' and no empty labels.
fn is_well_formed_email(email: &str) -> bool {
    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 {
        return false;
    }

    let (local, domain) = (parts[0], parts[1]);
    if local.is_empty() || domain.is_empty() || !domain.contains('.') {
        return false;
    }

    domain.split('.').all(|part| !part.is_empty())
}

fn is_http_url(url: &str) -> bool {
    (url.starts_with("http://") && url.len() > "http://".len())
        || (url.starts_with("https://") && url.len() > "https://".len())
}
