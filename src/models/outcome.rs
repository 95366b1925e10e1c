//! Result shapes returned by the enrichment and composite tools.

use crate::models::person::CanonicalPerson;
use serde::{Deserialize, Serialize};

/// Outcome of a single enrichment attempt.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EnrichmentOutcome {
    /// The enriched person, or null when the provider found no match,
    /// the call failed, or the result is pending asynchronously
    pub person: Option<CanonicalPerson>,

    /// Provider status string, or a descriptive failure status
    pub status: String,

    /// Waterfall job ID, present when the provider queued an async job
    #[serde(skip_serializing_if = "Option::is_none")]
    pub waterfall_job_id: Option<String>,

    /// Waterfall job status, present alongside the job ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub waterfall_status: Option<String>,

    /// Whether this enrichment runs asynchronously (result via webhook)
    pub is_async: bool,

    /// Callback URL actually used; only echoed for async enrichments
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webhook_url: Option<String>,

    /// Credits the provider reported consuming, when available
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credits_consumed: Option<f64>,
}

impl EnrichmentOutcome {
    /// A synchronous failure outcome carrying a descriptive status.
    ///
    /// Used by the composite tool to degrade per-person failures to a
    /// null-person entry instead of aborting the batch.
    pub fn failed(status: impl Into<String>) -> Self {
        Self {
            person: None,
            status: status.into(),
            waterfall_job_id: None,
            waterfall_status: None,
            is_async: false,
            webhook_url: None,
            credits_consumed: None,
        }
    }
}

/// Summary counts for a search-and-enrich batch.
///
/// Invariant: `attempted == successful + failed + async_pending`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct EnrichmentSummary {
    /// Number of people on the search page
    pub attempted: usize,

    /// Outcomes with a non-null person, not async
    pub successful: usize,

    /// Outcomes with a null person, not async
    pub failed: usize,

    /// Outcomes queued as asynchronous waterfall jobs
    pub async_pending: usize,
}

/// Result of the composite search-and-enrich tool.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchAndEnrichOutcome {
    /// Total people matching the search across all pages
    pub total_found: u64,

    /// Page of the search that was enriched
    pub page: u32,

    /// Page size of the search
    pub per_page: u32,

    /// One outcome per search result, in search-result order
    pub outcomes: Vec<EnrichmentOutcome>,

    /// Aggregate counts over `outcomes`
    pub summary: EnrichmentSummary,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_outcome() {
        let outcome = EnrichmentOutcome::failed("no match");
        assert!(outcome.person.is_none());
        assert_eq!(outcome.status, "no match");
        assert!(!outcome.is_async);
        assert!(outcome.webhook_url.is_none());
    }

    #[test]
    fn test_webhook_omitted_when_sync() {
        let outcome = EnrichmentOutcome::failed("no match");
        let json = serde_json::to_value(&outcome).unwrap();
        assert!(json.get("webhook_url").is_none());
        assert!(json.get("waterfall_job_id").is_none());
    }
}
