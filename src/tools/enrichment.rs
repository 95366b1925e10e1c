//! Person-enrichment tool executor.

use crate::client::AsyncApolloClient;
use crate::error::ToolResult;
use crate::models::EnrichmentOutcome;
use crate::normalize::person_from_enrichment;
use crate::validation::{validate_enrich, EnrichPersonParams};
use std::sync::Arc;

/// Executor for the `enrich_person` tool.
///
/// The server-level default webhook URL is injected here at construction
/// and passed explicitly into validation, so the executor stays testable
/// without ambient configuration.
#[derive(Clone)]
pub struct PersonEnrichmentTools {
    client: Arc<dyn AsyncApolloClient>,
    default_webhook_url: Option<String>,
}

impl PersonEnrichmentTools {
    pub fn new(client: Arc<dyn AsyncApolloClient>, default_webhook_url: Option<String>) -> Self {
        Self {
            client,
            default_webhook_url,
        }
    }

    /// Validate, enrich, and normalize a single person.
    ///
    /// The webhook URL is echoed on the outcome only for asynchronous
    /// (waterfall) enrichments; synchronous outcomes omit it even when the
    /// caller supplied one.
    pub async fn enrich_person(
        &self,
        params: &EnrichPersonParams,
    ) -> ToolResult<EnrichmentOutcome> {
        let query = validate_enrich(params, self.default_webhook_url.as_deref())?;

        let is_async = query.is_async();
        let webhook_url = query.webhook_url.clone();

        tracing::debug!(
            "Enriching person (async: {}, reveal_emails: {}, reveal_phone: {})",
            is_async,
            query.reveal_personal_emails,
            query.reveal_phone_number
        );

        let result = self.client.enrich(query).await?;

        let person = result.person.as_ref().map(person_from_enrichment);

        Ok(EnrichmentOutcome {
            person,
            status: result.status,
            waterfall_job_id: result.waterfall_job_id,
            waterfall_status: result.waterfall_status,
            is_async,
            webhook_url: if is_async { webhook_url } else { None },
            credits_consumed: result.credits_consumed,
        })
    }
}
