//! MCP tool handlers for the Apollo server.
//!
//! This module implements the three MCP tools using the rmcp SDK's
//! tool_router pattern.

use crate::client::AsyncApolloClient;
use crate::error::ToolError;
use crate::tools::{
    PeopleSearchTools, PersonEnrichmentTools, SearchAndEnrichParams, SearchAndEnrichTools,
};
use crate::validation::{EnrichPersonParams, SearchPeopleParams};
use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::*;
use rmcp::{tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use schemars::JsonSchema;
use serde::Deserialize;
use std::borrow::Cow;
use std::sync::Arc;

/// The Apollo MCP server that exposes people search and enrichment tools.
#[derive(Clone)]
pub struct ApolloMcpServer {
    search_tools: PeopleSearchTools,
    enrich_tools: PersonEnrichmentTools,
    composite_tools: SearchAndEnrichTools,
    tool_router: ToolRouter<Self>,
}

// Implement ServerHandler using the tool_handler macro
#[tool_handler]
impl ServerHandler for ApolloMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities {
                tools: Some(Default::default()),
                ..Default::default()
            },
            server_info: Implementation {
                name: "apollo-mcp-server".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                icons: None,
                title: None,
                website_url: None,
            },
            instructions: Some(
                "MCP server for Apollo.io people data. search_people finds people by \
                 job title, location, and keywords but never returns contact details; \
                 enrich_person reveals emails and phone numbers for a single person; \
                 search_and_enrich combines both in one call."
                    .into(),
            ),
        }
    }
}

// Helper structs for tool parameters

#[derive(Debug, Deserialize, JsonSchema)]
struct SearchPeopleToolParams {
    /// Job titles to match (1-50 entries, required)
    person_titles: Vec<String>,
    /// Locations to match (up to 50 entries)
    #[serde(default)]
    person_locations: Option<Vec<String>>,
    /// Free-text keywords (max 500 characters)
    #[serde(default)]
    q_keywords: Option<String>,
    /// Page number, 1-100 (default 1)
    #[serde(default)]
    page: Option<u32>,
    /// Results per page, 1-100 (default 25)
    #[serde(default)]
    per_page: Option<u32>,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct EnrichPersonToolParams {
    /// Work email address of the person to enrich
    #[serde(default)]
    email: Option<String>,
    /// LinkedIn profile URL
    #[serde(default)]
    linkedin_url: Option<String>,
    #[serde(default)]
    first_name: Option<String>,
    #[serde(default)]
    last_name: Option<String>,
    /// Full name (alternative to first_name + last_name)
    #[serde(default)]
    name: Option<String>,
    /// Employer name, required when matching by name
    #[serde(default)]
    organization_name: Option<String>,
    /// Employer domain, alternative to organization_name
    #[serde(default)]
    domain: Option<String>,
    /// Reveal personal email addresses (consumes credits, default false)
    #[serde(default)]
    reveal_personal_emails: Option<bool>,
    /// Reveal phone numbers (consumes credits, default false)
    #[serde(default)]
    reveal_phone_number: Option<bool>,
    /// Run asynchronous waterfall email discovery (requires a webhook)
    #[serde(default)]
    run_waterfall_email: Option<bool>,
    /// Run asynchronous waterfall phone discovery (requires a webhook)
    #[serde(default)]
    run_waterfall_phone: Option<bool>,
    /// Callback URL for waterfall results (falls back to the server default)
    #[serde(default)]
    webhook_url: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct SearchAndEnrichToolParams {
    /// Job titles to match (1-50 entries, required)
    person_titles: Vec<String>,
    /// Locations to match (up to 50 entries)
    #[serde(default)]
    person_locations: Option<Vec<String>>,
    /// Free-text keywords (max 500 characters)
    #[serde(default)]
    q_keywords: Option<String>,
    /// Page number, 1-100 (default 1)
    #[serde(default)]
    page: Option<u32>,
    /// Results per page, 1-100 (default 25)
    #[serde(default)]
    per_page: Option<u32>,
    /// Reveal personal email addresses for each person (consumes credits)
    #[serde(default)]
    reveal_personal_emails: Option<bool>,
    /// Reveal phone numbers for each person (consumes credits)
    #[serde(default)]
    reveal_phone_number: Option<bool>,
    /// Run asynchronous waterfall email discovery per person
    #[serde(default)]
    run_waterfall_email: Option<bool>,
    /// Run asynchronous waterfall phone discovery per person
    #[serde(default)]
    run_waterfall_phone: Option<bool>,
    /// Callback URL for waterfall results (falls back to the server default)
    #[serde(default)]
    webhook_url: Option<String>,
}

/// Convert a tool error to an MCP error.
///
/// Validation errors surface verbatim as invalid-params; provider failures
/// surface as internal errors (already scrubbed of credentials upstream).
fn to_mcp_error(e: ToolError) -> McpError {
    let code = match &e {
        ToolError::Validation(_) => ErrorCode::INVALID_PARAMS,
        ToolError::Api(_) => ErrorCode::INTERNAL_ERROR,
    };
    McpError {
        code,
        message: Cow::from(e.to_string()),
        data: None,
    }
}

fn to_internal_error(e: impl std::fmt::Display) -> McpError {
    McpError {
        code: ErrorCode::INTERNAL_ERROR,
        message: Cow::from(e.to_string()),
        data: None,
    }
}

// Tool router implementation
#[tool_router]
impl ApolloMcpServer {
    /// Create a new Apollo MCP server.
    ///
    /// # Arguments
    /// * `client` - Apollo API client
    /// * `default_webhook_url` - Server-level waterfall callback default
    /// * `enrich_concurrency` - Max parallel enrichments in search_and_enrich
    pub fn new(
        client: Arc<dyn AsyncApolloClient>,
        default_webhook_url: Option<String>,
        enrich_concurrency: usize,
    ) -> Self {
        let search_tools = PeopleSearchTools::new(client.clone());
        let enrich_tools = PersonEnrichmentTools::new(client, default_webhook_url);
        let composite_tools = SearchAndEnrichTools::new(
            search_tools.clone(),
            enrich_tools.clone(),
            enrich_concurrency,
        );

        Self {
            search_tools,
            enrich_tools,
            composite_tools,
            tool_router: Self::tool_router(),
        }
    }

    /// Search for people by job title, location, and keywords.
    #[tool(
        description = "Search for people by job title, location, and free-text keywords. \
                       Returns up to per_page (1-100, default 25) people per page with name, \
                       title, company, location, and social links. Search results NEVER \
                       include emails or phone numbers; use enrich_person or \
                       search_and_enrich to reveal contact data."
    )]
    async fn search_people(
        &self,
        params: Parameters<SearchPeopleToolParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;

        let response = self
            .search_tools
            .search_people(&SearchPeopleParams {
                person_titles: params.person_titles,
                person_locations: params.person_locations,
                q_keywords: params.q_keywords,
                page: params.page,
                per_page: params.per_page,
            })
            .await
            .map_err(to_mcp_error)?;

        let json_response = serde_json::to_string_pretty(&serde_json::json!({
            "people": response.people,
            "pagination": response.pagination,
        }))
        .map_err(to_internal_error)?;

        Ok(CallToolResult::success(vec![Content::text(json_response)]))
    }

    /// Enrich a single person with contact data.
    #[tool(
        description = "Enrich a single person with emails and phone numbers. Requires at \
                       least one identifier: email, linkedin_url, first_name+last_name with \
                       organization_name or domain, or name with organization_name or \
                       domain. Waterfall flags run asynchronous multi-source discovery and \
                       deliver results to a webhook instead of the immediate response."
    )]
    async fn enrich_person(
        &self,
        params: Parameters<EnrichPersonToolParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;

        let outcome = self
            .enrich_tools
            .enrich_person(&EnrichPersonParams {
                email: params.email,
                linkedin_url: params.linkedin_url,
                first_name: params.first_name,
                last_name: params.last_name,
                name: params.name,
                organization_name: params.organization_name,
                domain: params.domain,
                reveal_personal_emails: params.reveal_personal_emails,
                reveal_phone_number: params.reveal_phone_number,
                run_waterfall_email: params.run_waterfall_email,
                run_waterfall_phone: params.run_waterfall_phone,
                webhook_url: params.webhook_url,
            })
            .await
            .map_err(to_mcp_error)?;

        let json_response = serde_json::to_string_pretty(&outcome).map_err(to_internal_error)?;

        Ok(CallToolResult::success(vec![Content::text(json_response)]))
    }

    /// Search for people and enrich every result in one call.
    #[tool(
        description = "Search for people and enrich every result on the page in one call. \
                       Takes the same search fields as search_people plus the enrichment \
                       flags, applied to each person. Returns one outcome per person in \
                       search order with summary counts (attempted, successful, failed, \
                       async_pending). A single person's enrichment failure does not abort \
                       the batch."
    )]
    async fn search_and_enrich(
        &self,
        params: Parameters<SearchAndEnrichToolParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;

        let outcome = self
            .composite_tools
            .search_and_enrich(&SearchAndEnrichParams {
                search: SearchPeopleParams {
                    person_titles: params.person_titles,
                    person_locations: params.person_locations,
                    q_keywords: params.q_keywords,
                    page: params.page,
                    per_page: params.per_page,
                },
                reveal_personal_emails: params.reveal_personal_emails,
                reveal_phone_number: params.reveal_phone_number,
                run_waterfall_email: params.run_waterfall_email,
                run_waterfall_phone: params.run_waterfall_phone,
                webhook_url: params.webhook_url,
            })
            .await
            .map_err(to_mcp_error)?;

        let json_response = serde_json::to_string_pretty(&outcome).map_err(to_internal_error)?;

        Ok(CallToolResult::success(vec![Content::text(json_response)]))
    }
}
