//! Composite search-and-enrich tool executor.
//!
//! Runs a people search, then attempts an enrichment for every person on
//! the page. Enrichments are independent of each other and run with bounded
//! concurrency; the output sequence always preserves search-result order
//! regardless of completion order.

use crate::error::ToolResult;
use crate::models::{
    CanonicalPerson, EnrichmentOutcome, EnrichmentSummary, SearchAndEnrichOutcome,
};
use crate::tools::enrichment::PersonEnrichmentTools;
use crate::tools::search::PeopleSearchTools;
use crate::validation::{EnrichPersonParams, SearchPeopleParams};
use futures::stream::{self, StreamExt};

/// Status used when a search result exposes nothing to enrich by.
pub const SKIPPED_STATUS: &str = "skipped: no usable identifiers from search result";

/// Parameters for the composite tool: search fields plus the enrichment
/// flags applied to every person on the page.
#[derive(Debug, Clone, Default)]
pub struct SearchAndEnrichParams {
    pub search: SearchPeopleParams,
    pub reveal_personal_emails: Option<bool>,
    pub reveal_phone_number: Option<bool>,
    pub run_waterfall_email: Option<bool>,
    pub run_waterfall_phone: Option<bool>,
    pub webhook_url: Option<String>,
}

/// Executor for the `search_and_enrich` tool.
#[derive(Clone)]
pub struct SearchAndEnrichTools {
    search_tools: PeopleSearchTools,
    enrich_tools: PersonEnrichmentTools,
    concurrency: usize,
}

impl SearchAndEnrichTools {
    pub fn new(
        search_tools: PeopleSearchTools,
        enrich_tools: PersonEnrichmentTools,
        concurrency: usize,
    ) -> Self {
        Self {
            search_tools,
            enrich_tools,
            concurrency: concurrency.max(1),
        }
    }

    /// Search one page and enrich every result.
    ///
    /// A search failure or invalid input fails the whole call; a single
    /// person's enrichment failure never does. Failed enrichments degrade
    /// to a null-person outcome carrying the failure's descriptive status.
    pub async fn search_and_enrich(
        &self,
        params: &SearchAndEnrichParams,
    ) -> ToolResult<SearchAndEnrichOutcome> {
        let search_response = self.search_tools.search_people(&params.search).await?;
        let pagination = search_response.pagination;
        let people = search_response.people;

        tracing::debug!(
            "Enriching {} search results (concurrency: {})",
            people.len(),
            self.concurrency
        );

        // buffered() preserves input order regardless of completion order
        let mut enrich_futures = Vec::with_capacity(people.len());
        for person in people.iter() {
            enrich_futures.push(self.enrich_one(person, params));
        }
        let outcomes: Vec<EnrichmentOutcome> = stream::iter(enrich_futures)
            .buffered(self.concurrency)
            .collect()
            .await;

        let summary = summarize(&outcomes);

        Ok(SearchAndEnrichOutcome {
            total_found: pagination.total_entries,
            page: pagination.page,
            per_page: pagination.per_page,
            outcomes,
            summary,
        })
    }

    /// Enrich a single search result, degrading every failure to an outcome.
    async fn enrich_one(
        &self,
        person: &CanonicalPerson,
        params: &SearchAndEnrichParams,
    ) -> EnrichmentOutcome {
        let Some(enrich_params) = derive_enrich_params(person, params) else {
            return EnrichmentOutcome::failed(SKIPPED_STATUS);
        };

        match self.enrich_tools.enrich_person(&enrich_params).await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::warn!("Per-person enrichment failed: {}", e);
                EnrichmentOutcome::failed(format!("enrichment failed: {}", e))
            }
        }
    }
}

/// Derive a best-effort enrichment query from a search result.
///
/// Search results carry no email or profile URL, so the only usable
/// identifiers are a name combined with the company name or domain.
/// Returns None when that combination is not available.
fn derive_enrich_params(
    person: &CanonicalPerson,
    params: &SearchAndEnrichParams,
) -> Option<EnrichPersonParams> {
    let has_split_name = person.first_name.is_some() && person.last_name.is_some();
    let has_name = has_split_name || person.name.is_some();
    let has_org = person.company.name.is_some() || person.company.domain.is_some();

    if !has_name || !has_org {
        return None;
    }

    Some(EnrichPersonParams {
        first_name: person.first_name.clone(),
        last_name: person.last_name.clone(),
        name: person.name.clone(),
        organization_name: person.company.name.clone(),
        domain: person.company.domain.clone(),
        reveal_personal_emails: params.reveal_personal_emails,
        reveal_phone_number: params.reveal_phone_number,
        run_waterfall_email: params.run_waterfall_email,
        run_waterfall_phone: params.run_waterfall_phone,
        webhook_url: params.webhook_url.clone(),
        ..Default::default()
    })
}

/// Compute the batch summary. Counts always sum to `attempted`.
fn summarize(outcomes: &[EnrichmentOutcome]) -> EnrichmentSummary {
    let attempted = outcomes.len();
    let async_pending = outcomes.iter().filter(|o| o.is_async).count();
    let successful = outcomes
        .iter()
        .filter(|o| !o.is_async && o.person.is_some())
        .count();
    let failed = outcomes
        .iter()
        .filter(|o| !o.is_async && o.person.is_none())
        .count();

    EnrichmentSummary {
        attempted,
        successful,
        failed,
        async_pending,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CompanyInfo;

    fn search_person(name: Option<&str>, company: Option<&str>) -> CanonicalPerson {
        CanonicalPerson {
            name: name.map(String::from),
            company: CompanyInfo {
                name: company.map(String::from),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_derive_requires_name_and_org() {
        let params = SearchAndEnrichParams::default();

        assert!(derive_enrich_params(&search_person(None, Some("Acme")), &params).is_none());
        assert!(derive_enrich_params(&search_person(Some("Ada L"), None), &params).is_none());
        assert!(derive_enrich_params(&search_person(Some("Ada L"), Some("Acme")), &params).is_some());
    }

    #[test]
    fn test_derive_carries_flags() {
        let params = SearchAndEnrichParams {
            reveal_personal_emails: Some(true),
            ..Default::default()
        };

        let derived =
            derive_enrich_params(&search_person(Some("Ada L"), Some("Acme")), &params).unwrap();
        assert_eq!(derived.reveal_personal_emails, Some(true));
        assert_eq!(derived.organization_name.as_deref(), Some("Acme"));
        // Search results never expose these
        assert!(derived.email.is_none());
        assert!(derived.linkedin_url.is_none());
    }

    #[test]
    fn test_summary_counts_sum_to_attempted() {
        let outcomes = vec![
            EnrichmentOutcome {
                person: Some(CanonicalPerson::default()),
                status: "success".to_string(),
                waterfall_job_id: None,
                waterfall_status: None,
                is_async: false,
                webhook_url: None,
                credits_consumed: None,
            },
            EnrichmentOutcome::failed("no match"),
            EnrichmentOutcome {
                person: None,
                status: "queued".to_string(),
                waterfall_job_id: Some("job1".to_string()),
                waterfall_status: Some("pending".to_string()),
                is_async: true,
                webhook_url: Some("https://hooks.example.com/cb".to_string()),
                credits_consumed: None,
            },
        ];

        let summary = summarize(&outcomes);
        assert_eq!(summary.attempted, 3);
        assert_eq!(summary.successful, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.async_pending, 1);
        assert_eq!(
            summary.attempted,
            summary.successful + summary.failed + summary.async_pending
        );
    }
}
