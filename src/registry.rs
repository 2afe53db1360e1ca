//! The tool registry and dispatcher (C9): an insertion-ordered catalogue
//! of every registered tool, plus exact-name dispatch to the product
//! handler that serves it. Built once at startup; immutable afterward.

use crate::clients::ProductClients;
use crate::handlers::{bitbucket as bb, confluence as cf, jira};
use crate::search;
use crate::types::{Product, ToolDescriptor, ToolResponse};

/// Registered tool catalogue entries, in the fixed order Jira (11) →
/// Confluence (7) → Bitbucket (8) → Unified (1).
const DESCRIPTORS: &[ToolDescriptor] = &[
    ToolDescriptor { name: "jira_search_issues", description: "Search Jira issues using JQL or free text", product: Product::Jira },
    ToolDescriptor { name: "jira_get_issue", description: "Fetch a single Jira issue by key", product: Product::Jira },
    ToolDescriptor { name: "jira_create_issue", description: "Create a new Jira issue", product: Product::Jira },
    ToolDescriptor { name: "jira_update_issue", description: "Update fields on an existing Jira issue", product: Product::Jira },
    ToolDescriptor { name: "jira_transition_issue", description: "Move a Jira issue through a workflow transition", product: Product::Jira },
    ToolDescriptor { name: "jira_list_projects", description: "List Jira projects visible to the credential", product: Product::Jira },
    ToolDescriptor { name: "jira_get_sprint", description: "Fetch the active sprint for a Jira board", product: Product::Jira },
    ToolDescriptor { name: "jira_add_comment", description: "Add a comment to a Jira issue", product: Product::Jira },
    ToolDescriptor { name: "jira_get_comments", description: "List comments on a Jira issue", product: Product::Jira },
    ToolDescriptor { name: "jira_assign_issue", description: "Assign a Jira issue to a user", product: Product::Jira },
    ToolDescriptor { name: "jira_get_sprint_issues", description: "List issues in the active sprint for a Jira board", product: Product::Jira },
    ToolDescriptor { name: "confluence_search", description: "Search Confluence pages using CQL or free text", product: Product::Confluence },
    ToolDescriptor { name: "confluence_get_page", description: "Fetch a single Confluence page by id", product: Product::Confluence },
    ToolDescriptor { name: "confluence_create_page", description: "Create a new Confluence page", product: Product::Confluence },
    ToolDescriptor { name: "confluence_update_page", description: "Update an existing Confluence page", product: Product::Confluence },
    ToolDescriptor { name: "confluence_list_spaces", description: "List Confluence spaces visible to the credential", product: Product::Confluence },
    ToolDescriptor { name: "confluence_get_page_children", description: "List the child pages of a Confluence page", product: Product::Confluence },
    ToolDescriptor { name: "confluence_delete_page", description: "Delete a Confluence page", product: Product::Confluence },
    ToolDescriptor { name: "bitbucket_list_repos", description: "List Bitbucket repositories in a workspace", product: Product::Bitbucket },
    ToolDescriptor { name: "bitbucket_get_repo", description: "Fetch a single Bitbucket repository", product: Product::Bitbucket },
    ToolDescriptor { name: "bitbucket_list_pull_requests", description: "List pull requests on a Bitbucket repository", product: Product::Bitbucket },
    ToolDescriptor { name: "bitbucket_get_pull_request", description: "Fetch a single Bitbucket pull request", product: Product::Bitbucket },
    ToolDescriptor { name: "bitbucket_search_code", description: "Search source code across a Bitbucket workspace", product: Product::Bitbucket },
    ToolDescriptor { name: "bitbucket_create_pull_request", description: "Open a new Bitbucket pull request", product: Product::Bitbucket },
    ToolDescriptor { name: "bitbucket_list_branches", description: "List branches on a Bitbucket repository", product: Product::Bitbucket },
    ToolDescriptor { name: "bitbucket_get_commits", description: "List commits on a Bitbucket repository", product: Product::Bitbucket },
    ToolDescriptor { name: "atlassian_unified_search", description: "Search Jira, Confluence, and Bitbucket in one call", product: Product::Unified },
];

/// Immutable, built-once dispatcher. Holds the configured product
/// clients and enough configuration context to explain unconfigured
/// mode when a tool call can't be served.
pub struct Registry {
    clients: ProductClients,
    config_hint: String,
}

impl Registry {
    #[must_use]
    pub fn new(clients: ProductClients, config_hint: String) -> Self {
        Self { clients, config_hint }
    }

    #[must_use]
    pub fn descriptors(&self) -> &'static [ToolDescriptor] {
        DESCRIPTORS
    }

    fn unconfigured(&self, product: Product, tool_name: &str) -> ToolResponse {
        ToolResponse::error(
            product,
            tool_name,
            format!(
                "{product} is not configured. {}",
                self.config_hint
            ),
        )
    }

    /// Dispatches a `tools/call` by exact tool name.
    ///
    /// Routing is conceptually prefix-based (`jira_` / `confluence_` /
    /// `bitbucket_` / `atlassian_`) but realized as an exhaustive match
    /// over the full registered name set, so an unregistered name under
    /// a recognized prefix is rejected the same way as a wholly unknown
    /// one.
    pub async fn dispatch(&self, name: &str, args: Vec<(String, String)>) -> ToolResponse {
        macro_rules! jira_call {
            ($f:path) => {
                match &self.clients.jira {
                    Some(client) => $f(client, &args).await,
                    None => self.unconfigured(Product::Jira, name),
                }
            };
        }
        macro_rules! confluence_call {
            ($f:path) => {
                match &self.clients.confluence {
                    Some(client) => $f(client, &args).await,
                    None => self.unconfigured(Product::Confluence, name),
                }
            };
        }
        macro_rules! bitbucket_call {
            ($f:path) => {
                match &self.clients.bitbucket {
                    Some(client) => $f(client, &args).await,
                    None => self.unconfigured(Product::Bitbucket, name),
                }
            };
        }

        match name {
            "jira_search_issues" => jira_call!(jira::execute_search_issues),
            "jira_get_issue" => jira_call!(jira::execute_get_issue),
            "jira_create_issue" => jira_call!(jira::execute_create_issue),
            "jira_update_issue" => jira_call!(jira::execute_update_issue),
            "jira_transition_issue" => jira_call!(jira::execute_transition_issue),
            "jira_list_projects" => jira_call!(jira::execute_list_projects),
            "jira_get_sprint" => jira_call!(jira::execute_get_sprint),
            "jira_add_comment" => jira_call!(jira::execute_add_comment),
            "jira_get_comments" => jira_call!(jira::execute_get_comments),
            "jira_assign_issue" => jira_call!(jira::execute_assign_issue),
            "jira_get_sprint_issues" => jira_call!(jira::execute_get_sprint_issues),
            "confluence_search" => confluence_call!(cf::execute_search),
            "confluence_get_page" => confluence_call!(cf::execute_get_page),
            "confluence_create_page" => confluence_call!(cf::execute_create_page),
            "confluence_update_page" => confluence_call!(cf::execute_update_page),
            "confluence_list_spaces" => confluence_call!(cf::execute_list_spaces),
            "confluence_get_page_children" => confluence_call!(cf::execute_get_page_children),
            "confluence_delete_page" => confluence_call!(cf::execute_delete_page),
            "bitbucket_list_repos" => bitbucket_call!(bb::execute_list_repos),
            "bitbucket_get_repo" => bitbucket_call!(bb::execute_get_repo),
            "bitbucket_list_pull_requests" => bitbucket_call!(bb::execute_list_pull_requests),
            "bitbucket_get_pull_request" => bitbucket_call!(bb::execute_get_pull_request),
            "bitbucket_search_code" => bitbucket_call!(bb::execute_search_code),
            "bitbucket_create_pull_request" => bitbucket_call!(bb::execute_create_pull_request),
            "bitbucket_list_branches" => bitbucket_call!(bb::execute_list_branches),
            "bitbucket_get_commits" => bitbucket_call!(bb::execute_get_commits),
            "atlassian_unified_search" => search::execute_unified_search(&self.clients, &args).await,
            other => ToolResponse::error(Product::Unified, other, format!("Unknown tool: {other}")),
        }
    }
}
