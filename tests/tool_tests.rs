//! Tests for the tool executors against an in-memory fake Apollo client.

use apollo_mcp_server::client::{
    AsyncApolloClient, EnrichResult, RawOrganization, RawPerson, RawPhoneNumber, SearchPage,
};
use apollo_mcp_server::error::{ApolloApiError, ApolloApiResult, ToolError};
use apollo_mcp_server::models::{EnrichmentQuery, PaginationInfo, SearchQuery};
use apollo_mcp_server::tools::composite::SKIPPED_STATUS;
use apollo_mcp_server::{
    EnrichPersonParams, PeopleSearchTools, PersonEnrichmentTools, SearchAndEnrichParams,
    SearchAndEnrichTools, SearchPeopleParams,
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

type EnrichFn = Box<dyn Fn(&EnrichmentQuery) -> ApolloApiResult<EnrichResult> + Send + Sync>;

/// Fake Apollo client returning canned data, with optional per-person
/// delays to exercise out-of-order completion in the composite tool.
struct FakeApolloClient {
    page: SearchPage,
    enrich_fn: EnrichFn,
    delays_ms: HashMap<String, u64>,
}

impl FakeApolloClient {
    fn new(page: SearchPage, enrich_fn: EnrichFn) -> Self {
        Self {
            page,
            enrich_fn,
            delays_ms: HashMap::new(),
        }
    }
}

#[async_trait]
impl AsyncApolloClient for FakeApolloClient {
    async fn search(&self, _query: SearchQuery) -> ApolloApiResult<SearchPage> {
        Ok(self.page.clone())
    }

    async fn enrich(&self, query: EnrichmentQuery) -> ApolloApiResult<EnrichResult> {
        if let Some(delay) = query.name.as_ref().and_then(|n| self.delays_ms.get(n)) {
            tokio::time::sleep(Duration::from_millis(*delay)).await;
        }
        (self.enrich_fn)(&query)
    }
}

fn search_person(id: &str, name: &str, org: Option<(&str, &str)>) -> RawPerson {
    RawPerson {
        id: Some(id.to_string()),
        name: Some(name.to_string()),
        title: Some("CEO".to_string()),
        organization: org.map(|(org_name, domain)| RawOrganization {
            id: Some(format!("org-{}", id)),
            name: Some(org_name.to_string()),
            primary_domain: Some(domain.to_string()),
            ..Default::default()
        }),
        ..Default::default()
    }
}

fn page_of(people: Vec<RawPerson>, total_entries: u64) -> SearchPage {
    let len = people.len() as u32;
    SearchPage {
        people,
        pagination: PaginationInfo {
            page: 1,
            per_page: len.max(1),
            total_entries,
            total_pages: 1,
        },
    }
}

fn success_result(name: Option<&str>) -> ApolloApiResult<EnrichResult> {
    Ok(EnrichResult {
        person: Some(RawPerson {
            id: Some("enriched".to_string()),
            name: name.map(String::from),
            email: Some("found@example.com".to_string()),
            ..Default::default()
        }),
        status: "success".to_string(),
        waterfall_job_id: None,
        waterfall_status: None,
        credits_consumed: Some(1.0),
    })
}

fn queued_result() -> ApolloApiResult<EnrichResult> {
    Ok(EnrichResult {
        person: None,
        status: "queued".to_string(),
        waterfall_job_id: Some("job-1".to_string()),
        waterfall_status: Some("pending".to_string()),
        credits_consumed: None,
    })
}

// ========================= Search executor =========================

#[tokio::test]
async fn test_search_people_end_to_end() {
    let page = page_of(
        vec![
            search_person("p1", "Ada Lovelace", Some(("Acme", "acme.com"))),
            search_person("p2", "Grace Hopper", None),
        ],
        2,
    );
    let client = Arc::new(FakeApolloClient::new(
        page,
        Box::new(|_| success_result(None)),
    ));
    let tools = PeopleSearchTools::new(client);

    let response = tools
        .search_people(&SearchPeopleParams {
            person_titles: vec!["CEO".to_string()],
            per_page: Some(2),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(response.people.len(), 2);
    for person in &response.people {
        // Search results never carry contact data
        assert!(person.email.is_none());
        assert!(person.personal_emails.is_empty());
        assert!(person.phone_numbers.is_empty());
    }
    assert_eq!(response.people[0].company.name.as_deref(), Some("Acme"));
    assert!(response.people[1].company.name.is_none());

    assert_eq!(response.pagination.page, 1);
    assert_eq!(response.pagination.per_page, 2);
    assert!(response.pagination.total_entries >= 2);
    assert!(response.pagination.total_pages >= 1);
}

#[tokio::test]
async fn test_search_rejects_invalid_input() {
    let client = Arc::new(FakeApolloClient::new(
        page_of(vec![], 0),
        Box::new(|_| success_result(None)),
    ));
    let tools = PeopleSearchTools::new(client);

    let err = tools
        .search_people(&SearchPeopleParams::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ToolError::Validation(_)));
}

// ========================= Enrich executor =========================

#[tokio::test]
async fn test_enrich_phone_dedup() {
    let client = Arc::new(FakeApolloClient::new(
        page_of(vec![], 0),
        Box::new(|_| {
            Ok(EnrichResult {
                person: Some(RawPerson {
                    id: Some("p1".to_string()),
                    email: Some("x@y.com".to_string()),
                    sanitized_phone: Some("+1-555".to_string()),
                    phone_numbers: vec![
                        RawPhoneNumber {
                            sanitized_number: Some("+1-555".to_string()),
                            ..Default::default()
                        },
                        RawPhoneNumber {
                            sanitized_number: Some("+1-999".to_string()),
                            ..Default::default()
                        },
                    ],
                    ..Default::default()
                }),
                status: "success".to_string(),
                waterfall_job_id: None,
                waterfall_status: None,
                credits_consumed: Some(1.0),
            })
        }),
    ));
    let tools = PersonEnrichmentTools::new(client, None);

    let outcome = tools
        .enrich_person(&EnrichPersonParams {
            email: Some("x@y.com".to_string()),
            reveal_phone_number: Some(true),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(outcome.status, "success");
    assert!(!outcome.is_async);
    assert!(outcome.webhook_url.is_none());
    assert_eq!(outcome.credits_consumed, Some(1.0));

    let person = outcome.person.unwrap();
    assert_eq!(person.phone_numbers, vec!["+1-555", "+1-999"]);
}

#[tokio::test]
async fn test_enrich_async_echoes_default_webhook() {
    let client = Arc::new(FakeApolloClient::new(
        page_of(vec![], 0),
        Box::new(|_| queued_result()),
    ));
    let tools =
        PersonEnrichmentTools::new(client, Some("https://hooks.example.com/cb".to_string()));

    let outcome = tools
        .enrich_person(&EnrichPersonParams {
            email: Some("x@y.com".to_string()),
            run_waterfall_email: Some(true),
            ..Default::default()
        })
        .await
        .unwrap();

    assert!(outcome.is_async);
    assert!(outcome.person.is_none());
    assert_eq!(outcome.status, "queued");
    assert_eq!(outcome.waterfall_job_id.as_deref(), Some("job-1"));
    assert_eq!(
        outcome.webhook_url.as_deref(),
        Some("https://hooks.example.com/cb")
    );
}

#[tokio::test]
async fn test_enrich_waterfall_without_webhook_rejected() {
    let client = Arc::new(FakeApolloClient::new(
        page_of(vec![], 0),
        Box::new(|_| queued_result()),
    ));
    let tools = PersonEnrichmentTools::new(client, None);

    let err = tools
        .enrich_person(&EnrichPersonParams {
            email: Some("x@y.com".to_string()),
            run_waterfall_email: Some(true),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ToolError::Validation(_)));
}

#[tokio::test]
async fn test_enrich_sync_omits_supplied_webhook() {
    let client = Arc::new(FakeApolloClient::new(
        page_of(vec![], 0),
        Box::new(|query| {
            // The client must not see a webhook for a synchronous call
            assert!(query.webhook_url.is_none());
            success_result(None)
        }),
    ));
    let tools = PersonEnrichmentTools::new(client, None);

    let outcome = tools
        .enrich_person(&EnrichPersonParams {
            email: Some("x@y.com".to_string()),
            webhook_url: Some("https://mine.example.com/cb".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();

    assert!(!outcome.is_async);
    assert!(outcome.webhook_url.is_none());
}

// ========================= Composite executor =========================

fn composite_tools(client: Arc<FakeApolloClient>, concurrency: usize) -> SearchAndEnrichTools {
    let search = PeopleSearchTools::new(client.clone());
    let enrich = PersonEnrichmentTools::new(client, None);
    SearchAndEnrichTools::new(search, enrich, concurrency)
}

#[tokio::test]
async fn test_composite_degrades_per_person_failures() {
    let page = page_of(
        vec![
            search_person("p1", "Ada Lovelace", Some(("Acme", "acme.com"))),
            // No organization: nothing usable to enrich by
            search_person("p2", "Grace Hopper", None),
            search_person("p3", "Alan Turing", Some(("Bletchley", "bletchley.example"))),
        ],
        3,
    );
    let client = Arc::new(FakeApolloClient::new(
        page,
        Box::new(|query| {
            if query.name.as_deref() == Some("Alan Turing") {
                Err(ApolloApiError::Timeout)
            } else {
                success_result(query.name.as_deref())
            }
        }),
    ));
    let tools = composite_tools(client, 5);

    let outcome = tools
        .search_and_enrich(&SearchAndEnrichParams {
            search: SearchPeopleParams {
                person_titles: vec!["CEO".to_string()],
                ..Default::default()
            },
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(outcome.outcomes.len(), 3);
    assert_eq!(outcome.summary.attempted, 3);
    assert_eq!(outcome.summary.successful, 1);
    assert_eq!(outcome.summary.failed, 2);
    assert_eq!(outcome.summary.async_pending, 0);

    assert!(outcome.outcomes[0].person.is_some());
    assert_eq!(outcome.outcomes[1].status, SKIPPED_STATUS);
    assert!(outcome.outcomes[2].person.is_none());
    assert!(outcome.outcomes[2].status.contains("enrichment failed"));
    assert!(outcome.outcomes[2].status.contains("Request timeout"));
}

#[tokio::test]
async fn test_composite_preserves_search_order_under_concurrency() {
    let page = page_of(
        vec![
            search_person("p1", "Ada Lovelace", Some(("Acme", "acme.com"))),
            search_person("p2", "Grace Hopper", Some(("Navy", "navy.example"))),
            search_person("p3", "Alan Turing", Some(("Bletchley", "bletchley.example"))),
        ],
        3,
    );
    let mut client = FakeApolloClient::new(
        page,
        Box::new(|query| success_result(query.name.as_deref())),
    );
    // First person finishes last, last person finishes first
    client.delays_ms.insert("Ada Lovelace".to_string(), 60);
    client.delays_ms.insert("Grace Hopper".to_string(), 30);
    client.delays_ms.insert("Alan Turing".to_string(), 0);
    let tools = composite_tools(Arc::new(client), 3);

    let outcome = tools
        .search_and_enrich(&SearchAndEnrichParams {
            search: SearchPeopleParams {
                person_titles: vec!["CEO".to_string()],
                ..Default::default()
            },
            ..Default::default()
        })
        .await
        .unwrap();

    let names: Vec<_> = outcome
        .outcomes
        .iter()
        .map(|o| o.person.as_ref().unwrap().name.clone().unwrap())
        .collect();
    assert_eq!(names, vec!["Ada Lovelace", "Grace Hopper", "Alan Turing"]);
}

#[tokio::test]
async fn test_composite_counts_async_pending() {
    let page = page_of(
        vec![
            search_person("p1", "Ada Lovelace", Some(("Acme", "acme.com"))),
            search_person("p2", "Grace Hopper", Some(("Navy", "navy.example"))),
        ],
        2,
    );
    let client = Arc::new(FakeApolloClient::new(page, Box::new(|_| queued_result())));

    let search = PeopleSearchTools::new(client.clone());
    let enrich = PersonEnrichmentTools::new(
        client,
        Some("https://hooks.example.com/cb".to_string()),
    );
    let tools = SearchAndEnrichTools::new(search, enrich, 2);

    let outcome = tools
        .search_and_enrich(&SearchAndEnrichParams {
            search: SearchPeopleParams {
                person_titles: vec!["CEO".to_string()],
                ..Default::default()
            },
            run_waterfall_email: Some(true),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(outcome.summary.attempted, 2);
    assert_eq!(outcome.summary.async_pending, 2);
    assert_eq!(outcome.summary.successful, 0);
    assert_eq!(outcome.summary.failed, 0);
    for o in &outcome.outcomes {
        assert!(o.is_async);
        assert_eq!(
            o.webhook_url.as_deref(),
            Some("https://hooks.example.com/cb")
        );
    }
}

#[tokio::test]
async fn test_composite_propagates_search_validation_error() {
    let client = Arc::new(FakeApolloClient::new(
        page_of(vec![], 0),
        Box::new(|_| queued_result()),
    ));
    let tools = composite_tools(client, 2);

    let err = tools
        .search_and_enrich(&SearchAndEnrichParams::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ToolError::Validation(_)));
}
