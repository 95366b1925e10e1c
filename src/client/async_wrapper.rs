//! Async wrapper around the synchronous ApolloClient.
//!
//! This module provides an async interface to the synchronous ApolloClient
//! by using `tokio::task::spawn_blocking` to run HTTP operations on a
//! dedicated thread pool, preventing blocking of the async runtime.

use crate::client::{ApolloClient, EnrichResult, SearchPage};
use crate::error::{ApolloApiError, ApolloApiResult};
use crate::models::{EnrichmentQuery, SearchQuery};
use async_trait::async_trait;
use std::sync::Arc;

/// Async trait for Apollo client operations.
///
/// Tool executors depend on this trait object rather than the concrete
/// client so they can be exercised against in-memory fakes in tests.
#[async_trait]
pub trait AsyncApolloClient: Send + Sync {
    async fn search(&self, query: SearchQuery) -> ApolloApiResult<SearchPage>;
    async fn enrich(&self, query: EnrichmentQuery) -> ApolloApiResult<EnrichResult>;
}

/// Async wrapper around the synchronous ApolloClient.
#[derive(Clone)]
pub struct AsyncApolloClientImpl {
    client: Arc<ApolloClient>,
}

impl AsyncApolloClientImpl {
    pub fn new(client: ApolloClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }
}

#[async_trait]
impl AsyncApolloClient for AsyncApolloClientImpl {
    async fn search(&self, query: SearchQuery) -> ApolloApiResult<SearchPage> {
        let client = self.client.clone();

        tokio::task::spawn_blocking(move || client.search(&query))
            .await
            .map_err(|e| ApolloApiError::HttpError(format!("Task join error: {}", e)))?
    }

    async fn enrich(&self, query: EnrichmentQuery) -> ApolloApiResult<EnrichResult> {
        let client = self.client.clone();

        tokio::task::spawn_blocking(move || client.enrich(&query))
            .await
            .map_err(|e| ApolloApiError::HttpError(format!("Task join error: {}", e)))?
    }
}
