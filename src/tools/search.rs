//! People-search tool executor.

use crate::client::AsyncApolloClient;
use crate::error::ToolResult;
use crate::models::{CanonicalPerson, PaginationInfo};
use crate::normalize::person_from_search;
use crate::validation::{validate_search, SearchPeopleParams};
use std::sync::Arc;

/// Executor for the `search_people` tool.
#[derive(Clone)]
pub struct PeopleSearchTools {
    client: Arc<dyn AsyncApolloClient>,
}

/// Response from a people search.
#[derive(Debug, Clone)]
pub struct SearchPeopleResponse {
    /// Normalized people for this page. Search results never carry contact
    /// data: email is null and the email/phone lists are empty.
    pub people: Vec<CanonicalPerson>,

    /// Pagination, echoed from the provider or defaulted from the request
    pub pagination: PaginationInfo,
}

impl PeopleSearchTools {
    pub fn new(client: Arc<dyn AsyncApolloClient>) -> Self {
        Self { client }
    }

    /// Validate, search, and normalize one page of people.
    pub async fn search_people(
        &self,
        params: &SearchPeopleParams,
    ) -> ToolResult<SearchPeopleResponse> {
        let query = validate_search(params)?;

        tracing::debug!(
            "Searching people: {} title(s), page {}, per_page {}",
            query.person_titles.len(),
            query.page,
            query.per_page
        );

        let page = self.client.search(query).await?;

        let people: Vec<CanonicalPerson> =
            page.people.iter().map(person_from_search).collect();

        Ok(SearchPeopleResponse {
            people,
            pagination: page.pagination,
        })
    }
}
