//! Response normalization.
//!
//! Apollo's search and enrichment endpoints return structurally different
//! person records. Two explicit pure functions map both shapes into the
//! same [`CanonicalPerson`]; there is no shared base shape to inherit from,
//! only a shared output.

use crate::client::{RawOrganization, RawPerson};
use crate::models::{CanonicalPerson, CompanyInfo, PersonLocation, SocialLinks};

/// Map a search-result person to the canonical shape.
///
/// The search endpoint is contractually incapable of returning contact
/// data, so email is forced to null and personal_emails / phone_numbers
/// are forced empty regardless of any upstream value. This is a documented
/// guarantee surfaced to MCP callers, not an omission.
pub fn person_from_search(raw: &RawPerson) -> CanonicalPerson {
    CanonicalPerson {
        email: None,
        email_status: None,
        personal_emails: Vec::new(),
        phone_numbers: Vec::new(),
        ..common_fields(raw)
    }
}

/// Map an enrichment-result person to the canonical shape.
///
/// Phone numbers are assembled from the provider's single sanitized phone
/// (if present) followed by each `phone_numbers` entry whose sanitized form
/// has not been seen yet: first-appearance order, deduplicated by sanitized
/// value.
pub fn person_from_enrichment(raw: &RawPerson) -> CanonicalPerson {
    CanonicalPerson {
        email: raw.email.clone(),
        email_status: raw.email_status.clone(),
        personal_emails: raw.personal_emails.clone(),
        phone_numbers: collect_phone_numbers(raw),
        ..common_fields(raw)
    }
}

/// Fields projected identically from both person shapes.
fn common_fields(raw: &RawPerson) -> CanonicalPerson {
    CanonicalPerson {
        id: raw.id.clone(),
        first_name: raw.first_name.clone(),
        last_name: raw.last_name.clone(),
        name: raw.name.clone(),
        title: raw.title.clone(),
        headline: raw.headline.clone(),
        linkedin_url: raw.linkedin_url.clone(),
        email: None,
        email_status: None,
        personal_emails: Vec::new(),
        phone_numbers: Vec::new(),
        location: PersonLocation {
            city: raw.city.clone(),
            state: raw.state.clone(),
            country: raw.country.clone(),
        },
        company: company_from_organization(raw.organization.as_ref()),
        social: SocialLinks {
            twitter_url: raw.twitter_url.clone(),
            facebook_url: raw.facebook_url.clone(),
            github_url: raw.github_url.clone(),
        },
    }
}

/// Project the nested organization into the company sub-record.
///
/// A missing organization yields all-null fields; the sub-record itself is
/// always present.
fn company_from_organization(org: Option<&RawOrganization>) -> CompanyInfo {
    match org {
        Some(org) => CompanyInfo {
            id: org.id.clone(),
            name: org.name.clone(),
            domain: org.primary_domain.clone(),
            website_url: org.website_url.clone(),
            linkedin_url: org.linkedin_url.clone(),
            industry: org.industry.clone(),
            employee_count: org.estimated_num_employees,
        },
        None => CompanyInfo::default(),
    }
}

/// Assemble the deduplicated phone list for an enrichment result.
fn collect_phone_numbers(raw: &RawPerson) -> Vec<String> {
    let mut phones: Vec<String> = Vec::new();

    if let Some(sanitized) = &raw.sanitized_phone {
        if !sanitized.is_empty() {
            phones.push(sanitized.clone());
        }
    }

    for entry in &raw.phone_numbers {
        if let Some(sanitized) = &entry.sanitized_number {
            if !sanitized.is_empty() && !phones.iter().any(|p| p == sanitized) {
                phones.push(sanitized.clone());
            }
        }
    }

    phones
}
