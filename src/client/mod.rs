//! HTTP client for the Apollo people search and enrichment API.
//!
//! This module provides a synchronous HTTP client that can be used from
//! async contexts via `tokio::task::spawn_blocking`. The client handles
//! authentication, request-body construction, and error mapping.
//!
//! Hard contract: error values never carry the API key or the request body
//! that was sent upstream, and non-2xx responses are mapped from the status
//! line alone (the provider does not guarantee an error body).

mod async_wrapper;
pub use async_wrapper::{AsyncApolloClient, AsyncApolloClientImpl};

use crate::config::Config;
use crate::error::{ApolloApiError, ApolloApiResult};
use crate::models::{EnrichmentQuery, PaginationInfo, SearchQuery};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

/// A person record as returned by either Apollo endpoint.
///
/// Search results never populate the contact fields (email, personal
/// emails, phones); enrichment results may populate all of them. The
/// normalizer decides which fields are trusted for each source.
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct RawPerson {
    pub id: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub name: Option<String>,
    pub title: Option<String>,
    pub headline: Option<String>,
    pub linkedin_url: Option<String>,
    pub twitter_url: Option<String>,
    pub facebook_url: Option<String>,
    pub github_url: Option<String>,
    pub email: Option<String>,
    pub email_status: Option<String>,
    pub personal_emails: Vec<String>,

    /// Provider-normalized primary phone; the deduplication key
    pub sanitized_phone: Option<String>,
    pub phone_numbers: Vec<RawPhoneNumber>,

    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,

    /// Nested employer record; absent for unattributed people
    pub organization: Option<RawOrganization>,
}

/// A phone number entry from an enrichment response.
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct RawPhoneNumber {
    pub raw_number: Option<String>,
    pub sanitized_number: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

/// Nested organization record on a person.
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct RawOrganization {
    pub id: Option<String>,
    pub name: Option<String>,
    pub primary_domain: Option<String>,
    pub website_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub industry: Option<String>,
    pub estimated_num_employees: Option<u64>,
}

/// Pagination block from the search endpoint. Every field is optional;
/// the client fills gaps from the request itself.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawPagination {
    page: Option<u32>,
    per_page: Option<u32>,
    total_entries: Option<u64>,
    total_pages: Option<u64>,
}

/// Response wrapper for the people-search endpoint.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct RawSearchResponse {
    people: Vec<RawPerson>,
    pagination: Option<RawPagination>,
}

/// Response wrapper for the enrichment endpoint.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct RawEnrichResponse {
    person: Option<RawPerson>,
    status: Option<String>,
    waterfall_job_id: Option<String>,
    waterfall_status: Option<String>,
    credits_consumed: Option<f64>,
}

/// One page of raw search results plus resolved pagination.
#[derive(Debug, Clone)]
pub struct SearchPage {
    pub people: Vec<RawPerson>,
    pub pagination: PaginationInfo,
}

/// Result of one enrichment call.
#[derive(Debug, Clone)]
pub struct EnrichResult {
    pub person: Option<RawPerson>,

    /// Provider status, `"unknown"` when the provider omits it
    pub status: String,

    pub waterfall_job_id: Option<String>,
    pub waterfall_status: Option<String>,
    pub credits_consumed: Option<f64>,
}

/// HTTP client for the Apollo API.
///
/// Uses `ureq` for synchronous HTTP requests and can be called from async
/// contexts through [`AsyncApolloClient`].
#[derive(Clone)]
pub struct ApolloClient {
    /// Base URL for the Apollo API
    base_url: String,

    /// API key for authentication
    api_key: String,

    /// HTTP client agent
    agent: Arc<ureq::Agent>,
}

impl ApolloClient {
    /// Create a new ApolloClient from configuration.
    ///
    /// The configuration layer guarantees a non-empty API key; a missing
    /// credential never reaches this constructor.
    pub fn new(config: &Config) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(config.request_timeout))
            .build();

        Self {
            base_url: config.apollo_api_url.clone(),
            api_key: config.apollo_api_key.clone(),
            agent: Arc::new(agent),
        }
    }

    /// Create an ApolloClient with a custom base URL (useful for testing).
    #[doc(hidden)]
    pub fn with_base_url(base_url: String, api_key: String) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(10))
            .build();

        Self {
            base_url,
            api_key,
            agent: Arc::new(agent),
        }
    }

    /// Build a full URL from a path.
    fn build_url(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{}/{}", base, path)
    }

    /// Execute a POST request with authentication and JSON body.
    fn post(&self, path: &str, body: &serde_json::Value) -> Result<ureq::Response, ApolloApiError> {
        let url = self.build_url(path);

        tracing::debug!("POST {}", url);

        let result = self
            .agent
            .post(&url)
            .set("X-Api-Key", &self.api_key)
            .set("Content-Type", "application/json")
            .send_json(body)
            .map_err(|e| self.map_error(e));

        match &result {
            Ok(response) => {
                tracing::debug!("POST {} - Success (status: {})", url, response.status());
            }
            Err(e) => {
                tracing::error!("POST {} - Error: {}", url, e);
            }
        }

        result
    }

    /// Map a ureq error to an ApolloApiError.
    ///
    /// Non-2xx responses are mapped from the status line only; the response
    /// body is never read into the error.
    fn map_error(&self, error: ureq::Error) -> ApolloApiError {
        match error {
            ureq::Error::Status(code, response) => match code {
                401 | 403 => ApolloApiError::Unauthorized,
                429 => ApolloApiError::RateLimitExceeded,
                _ => ApolloApiError::ApiError {
                    status: code,
                    status_text: response.status_text().to_string(),
                },
            },
            ureq::Error::Transport(transport) => {
                if transport.kind() == ureq::ErrorKind::ConnectionFailed {
                    ApolloApiError::HttpError("Connection failed".to_string())
                } else if transport.kind() == ureq::ErrorKind::Io {
                    ApolloApiError::Timeout
                } else {
                    ApolloApiError::HttpError(transport.to_string())
                }
            }
        }
    }

    /// Search for people matching a validated query.
    ///
    /// Performs a single `POST /mixed_people/search`. Missing pagination
    /// metadata in the response is defaulted from the request's own page and
    /// per_page with zero counts; an omitted pagination block is not an
    /// error.
    pub fn search(&self, query: &SearchQuery) -> ApolloApiResult<SearchPage> {
        let body = Self::search_body(query);

        let response = self.post("/mixed_people/search", &body)?;
        let text = response
            .into_string()
            .map_err(|e| ApolloApiError::HttpError(e.to_string()))?;

        let raw: RawSearchResponse =
            serde_json::from_str(&text).map_err(ApolloApiError::JsonError)?;

        let pagination = Self::resolve_pagination(raw.pagination, query);

        tracing::debug!(
            "Search returned {} people (page {} of {})",
            raw.people.len(),
            pagination.page,
            pagination.total_pages
        );

        Ok(SearchPage {
            people: raw.people,
            pagination,
        })
    }

    /// Enrich a single person from a validated query.
    ///
    /// Performs a single `POST /people/match`. A missing provider status
    /// defaults to `"unknown"`; a null person is a valid no-match result,
    /// not an error.
    pub fn enrich(&self, query: &EnrichmentQuery) -> ApolloApiResult<EnrichResult> {
        let body = Self::enrich_body(query);

        let response = self.post("/people/match", &body)?;
        let text = response
            .into_string()
            .map_err(|e| ApolloApiError::HttpError(e.to_string()))?;

        let raw: RawEnrichResponse =
            serde_json::from_str(&text).map_err(ApolloApiError::JsonError)?;

        Ok(EnrichResult {
            person: raw.person,
            status: raw.status.unwrap_or_else(|| "unknown".to_string()),
            waterfall_job_id: raw.waterfall_job_id,
            waterfall_status: raw.waterfall_status,
            credits_consumed: raw.credits_consumed,
        })
    }

    /// Build the search request body.
    ///
    /// Page and per_page are always sent (per_page capped at 100); optional
    /// fields are omitted entirely when empty rather than sent as empty
    /// arrays or strings.
    fn search_body(query: &SearchQuery) -> serde_json::Value {
        let mut body = serde_json::Map::new();

        body.insert("person_titles".to_string(), json!(query.person_titles));
        if !query.person_locations.is_empty() {
            body.insert(
                "person_locations".to_string(),
                json!(query.person_locations),
            );
        }
        if let Some(keywords) = &query.q_keywords {
            body.insert("q_keywords".to_string(), json!(keywords));
        }
        body.insert("page".to_string(), json!(query.page));
        body.insert("per_page".to_string(), json!(query.per_page.min(100)));

        serde_json::Value::Object(body)
    }

    /// Build the enrichment request body.
    ///
    /// Only supplied identifier fields are included. Reveal and waterfall
    /// flags are included only when explicitly true: Apollo treats field
    /// presence, not value, as the toggle.
    fn enrich_body(query: &EnrichmentQuery) -> serde_json::Value {
        let mut body = serde_json::Map::new();

        let fields = [
            ("email", &query.email),
            ("linkedin_url", &query.linkedin_url),
            ("first_name", &query.first_name),
            ("last_name", &query.last_name),
            ("name", &query.name),
            ("organization_name", &query.organization_name),
            ("domain", &query.domain),
        ];
        for (key, value) in fields {
            if let Some(value) = value {
                body.insert(key.to_string(), json!(value));
            }
        }

        if query.reveal_personal_emails {
            body.insert("reveal_personal_emails".to_string(), json!(true));
        }
        if query.reveal_phone_number {
            body.insert("reveal_phone_number".to_string(), json!(true));
        }
        if query.run_waterfall_email {
            body.insert("run_waterfall_email".to_string(), json!(true));
        }
        if query.run_waterfall_phone {
            body.insert("run_waterfall_phone".to_string(), json!(true));
        }
        if let Some(webhook) = &query.webhook_url {
            body.insert("webhook_url".to_string(), json!(webhook));
        }

        serde_json::Value::Object(body)
    }

    /// Resolve pagination from the provider response, falling back to the
    /// request's own values. When the provider reports entries but no page
    /// count, pages are computed from entries and per_page.
    fn resolve_pagination(raw: Option<RawPagination>, query: &SearchQuery) -> PaginationInfo {
        let raw = raw.unwrap_or_default();

        let page = raw.page.unwrap_or(query.page);
        let per_page = raw.per_page.unwrap_or(query.per_page);
        let total_entries = raw.total_entries.unwrap_or(0);
        let total_pages = raw.total_pages.unwrap_or_else(|| {
            if total_entries == 0 || per_page == 0 {
                0
            } else {
                total_entries.div_ceil(per_page as u64)
            }
        });

        PaginationInfo {
            page,
            per_page,
            total_entries,
            total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn search_query() -> SearchQuery {
        SearchQuery {
            person_titles: vec!["CEO".to_string()],
            person_locations: vec![],
            q_keywords: None,
            page: 2,
            per_page: 10,
        }
    }

    #[test]
    fn test_build_url() {
        let client = ApolloClient::with_base_url(
            "https://api.example.com/api/v1".to_string(),
            "test-key".to_string(),
        );
        assert_eq!(
            client.build_url("/mixed_people/search"),
            "https://api.example.com/api/v1/mixed_people/search"
        );

        let client_with_slash = ApolloClient::with_base_url(
            "https://api.example.com/api/v1/".to_string(),
            "test-key".to_string(),
        );
        assert_eq!(
            client_with_slash.build_url("people/match"),
            "https://api.example.com/api/v1/people/match"
        );
    }

    #[test]
    fn test_search_body_omits_empty_optionals() {
        let body = ApolloClient::search_body(&search_query());
        assert_eq!(body["person_titles"], json!(["CEO"]));
        assert_eq!(body["page"], json!(2));
        assert_eq!(body["per_page"], json!(10));
        assert!(body.get("person_locations").is_none());
        assert!(body.get("q_keywords").is_none());
    }

    #[test]
    fn test_search_body_caps_per_page() {
        let mut query = search_query();
        query.per_page = 250;
        let body = ApolloClient::search_body(&query);
        assert_eq!(body["per_page"], json!(100));
    }

    #[test]
    fn test_enrich_body_omits_absent_flags() {
        let query = EnrichmentQuery {
            email: Some("a@b.com".to_string()),
            reveal_phone_number: true,
            ..Default::default()
        };
        let body = ApolloClient::enrich_body(&query);

        assert_eq!(body["email"], json!("a@b.com"));
        assert_eq!(body["reveal_phone_number"], json!(true));
        // Absent means omitted, never sent as false
        assert!(body.get("reveal_personal_emails").is_none());
        assert!(body.get("run_waterfall_email").is_none());
        assert!(body.get("run_waterfall_phone").is_none());
        assert!(body.get("webhook_url").is_none());
        assert!(body.get("first_name").is_none());
    }

    #[test]
    fn test_resolve_pagination_defaults_from_query() {
        let query = search_query();

        let pagination = ApolloClient::resolve_pagination(None, &query);
        assert_eq!(pagination.page, 2);
        assert_eq!(pagination.per_page, 10);
        assert_eq!(pagination.total_entries, 0);
        assert_eq!(pagination.total_pages, 0);
    }

    #[test]
    fn test_resolve_pagination_computes_pages() {
        let query = search_query();
        let raw = RawPagination {
            page: Some(2),
            per_page: Some(10),
            total_entries: Some(25),
            total_pages: None,
        };

        let pagination = ApolloClient::resolve_pagination(Some(raw), &query);
        assert_eq!(pagination.total_entries, 25);
        assert_eq!(pagination.total_pages, 3);
    }
}
