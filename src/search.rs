//! The unified cross-product search engine (C8): classifies a free-text
//! query, fans out to the configured product clients concurrently, merges
//! heterogeneous result shapes into a single Markdown document, and
//! tolerates partial failures.
//!
//! Fan-out uses `futures::future::join_all` over boxed branch futures —
//! each branch returns a rendered section independent of completion
//! order, so section order stays fixed (Jira → Confluence → Bitbucket)
//! regardless of which branch answers first.

use crate::clients::ProductClients;
use crate::handlers::common::{lookup, required, resolve_query};
use crate::json;
use crate::types::{Product, ToolResponse};
use futures::future::BoxFuture;

const DEFAULT_MAX_RESULTS_PER_PRODUCT: i64 = 10;
const SUMMARY_LIMIT: usize = 55;
const EXCERPT_LIMIT: usize = 100;

struct Section {
    product: Product,
    heading: String,
    body: String,
    hit_count: i64,
    failed: bool,
}

/// Truncates `text` to at most `limit` characters, idempotently:
/// strings already within the limit are returned unchanged, otherwise
/// truncated to `limit - 3` characters plus a `...` ellipsis.
#[must_use]
pub fn truncate(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    let mut out: String = text.chars().take(limit.saturating_sub(3)).collect();
    out.push_str("...");
    out
}

fn requested_products(args: &[(String, String)]) -> Vec<Product> {
    let raw = lookup(args, "products");
    let Some(raw) = raw.filter(|s| !s.trim().is_empty()) else {
        return vec![Product::Jira, Product::Confluence];
    };
    raw.split(',')
        .map(str::trim)
        .filter_map(|s| match s.to_lowercase().as_str() {
            "jira" => Some(Product::Jira),
            "confluence" => Some(Product::Confluence),
            "bitbucket" => Some(Product::Bitbucket),
            _ => None,
        })
        .collect()
}

fn max_results_per_product(args: &[(String, String)]) -> i64 {
    lookup(args, "maxResults")
        .and_then(|v| v.parse::<i64>().ok())
        .unwrap_or(DEFAULT_MAX_RESULTS_PER_PRODUCT)
}

async fn jira_branch(
    client: &crate::clients::JiraClient,
    query: &str,
    max_results: i64,
) -> Section {
    let jql = resolve_query(query, "updated");
    match client.search_issues(&jql, max_results).await {
        Ok(body) => {
            let total = json::int_at(&body, "total", 0);
            let issues = json::array_blocks(&body, "issues");
            let mut rows = String::new();
            for issue in &issues {
                let key = json::string_or_default(issue, "key", "-");
                let summary = json::navigate(issue, &["fields", "summary"]).unwrap_or_default();
                let status =
                    json::navigate(issue, &["fields", "status", "name"]).unwrap_or_else(|| "-".to_string());
                let issue_type = json::navigate(issue, &["fields", "issuetype", "name"])
                    .unwrap_or_else(|| "-".to_string());
                let summary = if summary.is_empty() {
                    "-".to_string()
                } else {
                    truncate(&summary, SUMMARY_LIMIT)
                };
                rows.push_str(&format!(
                    "| {key} | {summary} | {status} | {issue_type} |\n"
                ));
            }
            let body = if issues.is_empty() {
                "No issues matched.".to_string()
            } else {
                format!("| Key | Summary | Status | Type |\n| --- | --- | --- | --- |\n{rows}")
            };
            Section {
                product: Product::Jira,
                heading: format!("### Jira ({} found)", issues.len()),
                body,
                hit_count: total,
                failed: false,
            }
        }
        Err(e) => Section {
            product: Product::Jira,
            heading: "### Jira".to_string(),
            body: format!("_Search failed: {e}_"),
            hit_count: 0,
            failed: true,
        },
    }
}

async fn confluence_branch(
    client: &crate::clients::ConfluenceClient,
    query: &str,
    max_results: i64,
) -> Section {
    let cql = resolve_query(query, "lastModified");
    match client.search(&cql, max_results).await {
        Ok(body) => {
            let total = {
                let t = json::int_at(&body, "totalSize", -1);
                if t >= 0 { t } else { json::int_at(&body, "size", 0) }
            };
            let results = json::array_blocks(&body, "results");
            let mut lines = String::new();
            for result in &results {
                let title = json::navigate(result, &["content", "title"])
                    .unwrap_or_else(|| json::string_or_default(result, "title", "-"));
                let space_key = json::navigate(result, &["content", "space", "key"])
                    .unwrap_or_else(|| "-".to_string());
                let last_modified = json::string_or_default(result, "lastModified", "-");
                lines.push_str(&format!("- **{title}** [{space_key}] — {last_modified}\n"));
                let excerpt = json::string_at(result, "excerpt");
                if let Some(excerpt) = excerpt.filter(|e| !e.is_empty()) {
                    lines.push_str(&format!("  > {}\n", truncate(&excerpt, EXCERPT_LIMIT)));
                }
            }
            let body = if results.is_empty() {
                "No pages matched.".to_string()
            } else {
                lines
            };
            Section {
                product: Product::Confluence,
                heading: format!("### Confluence Pages ({} found)", results.len()),
                body,
                hit_count: total,
                failed: false,
            }
        }
        Err(e) => Section {
            product: Product::Confluence,
            heading: "### Confluence".to_string(),
            body: format!("_Search failed: {e}_"),
            hit_count: 0,
            failed: true,
        },
    }
}

async fn bitbucket_branch(
    client: &crate::clients::BitbucketClient,
    workspace: &str,
    query: &str,
) -> Section {
    match client.search_code(workspace, query).await {
        Ok(body) => {
            let values = json::array_blocks(&body, "values");
            let mut lines = String::new();
            for value in &values {
                let file_path = json::navigate(value, &["file", "path"]).unwrap_or_else(|| "-".to_string());
                let repo_name = json::navigate(value, &["repository", "name"])
                    .unwrap_or_else(|| "-".to_string());
                lines.push_str(&format!("- `{file_path}` in **{repo_name}**\n"));
            }
            let count = values.len();
            let body = if values.is_empty() {
                "No code matches.".to_string()
            } else {
                lines
            };
            Section {
                product: Product::Bitbucket,
                heading: format!("### Bitbucket ({count} found)"),
                body,
                hit_count: i64::try_from(count).unwrap_or(i64::MAX),
                failed: false,
            }
        }
        Err(e) => Section {
            product: Product::Bitbucket,
            heading: "### Bitbucket".to_string(),
            body: format!("_Search failed: {e}_"),
            hit_count: 0,
            failed: true,
        },
    }
}

/// Runs the unified search over whichever product clients are both
/// requested and configured, merging the per-product sections into one
/// Markdown document.
pub async fn execute_unified_search(clients: &ProductClients, args: &[(String, String)]) -> ToolResponse {
    let query = match required(args, "query") {
        Ok(v) => v,
        Err(e) => return ToolResponse::error(Product::Unified, "atlassian_unified_search", e.to_string()),
    };
    let max_results = max_results_per_product(args);
    let requested = requested_products(args);
    let workspace = lookup(args, "workspace");

    let mut branches: Vec<BoxFuture<'_, Section>> = Vec::new();

    if requested.contains(&Product::Jira) {
        if let Some(jira) = &clients.jira {
            branches.push(Box::pin(jira_branch(jira, query, max_results)));
        } else {
            branches.push(Box::pin(async {
                Section {
                    product: Product::Jira,
                    heading: "### Jira".to_string(),
                    body: "_Search failed: Jira is not configured_".to_string(),
                    hit_count: 0,
                    failed: true,
                }
            }));
        }
    }

    if requested.contains(&Product::Confluence) {
        if let Some(confluence) = &clients.confluence {
            branches.push(Box::pin(confluence_branch(confluence, query, max_results)));
        } else {
            branches.push(Box::pin(async {
                Section {
                    product: Product::Confluence,
                    heading: "### Confluence".to_string(),
                    body: "_Search failed: Confluence is not configured_".to_string(),
                    hit_count: 0,
                    failed: true,
                }
            }));
        }
    }

    if let Some(workspace) = workspace.filter(|w| !w.is_empty()) {
        if requested.contains(&Product::Bitbucket) {
            if let Some(bitbucket) = &clients.bitbucket {
                branches.push(Box::pin(bitbucket_branch(bitbucket, workspace, query)));
            }
        }
    }

    if branches.is_empty() {
        return ToolResponse::success(
            Product::Unified,
            "atlassian_unified_search",
            format!("No results found for: \"{query}\""),
        );
    }

    let mut sections = futures::future::join_all(branches).await;
    sections.sort_by_key(|s| match s.product {
        Product::Jira => 0,
        Product::Confluence => 1,
        Product::Bitbucket => 2,
        Product::Unified => 3,
    });

    let all_empty_no_failures = sections.iter().all(|s| !s.failed && s.hit_count == 0);
    if all_empty_no_failures {
        return ToolResponse::success(
            Product::Unified,
            "atlassian_unified_search",
            format!("No results found for: \"{query}\""),
        );
    }

    let total: i64 = sections.iter().map(|s| s.hit_count).sum();
    let product_names: Vec<&str> = sections
        .iter()
        .map(|s| match s.product {
            Product::Jira => "Jira",
            Product::Confluence => "Confluence",
            Product::Bitbucket => "Bitbucket",
            Product::Unified => "Unified",
        })
        .collect();

    let mut out = format!(
        "# Unified Search Results\n\nQuery: \"{query}\"\nProducts searched: {}\nTotal hits: {total}\n\n",
        product_names.join(", ")
    );
    for section in &sections {
        out.push_str(&section.heading);
        out.push('\n');
        out.push_str(&section.body);
        out.push('\n');
    }

    let item_count = usize::try_from(total.max(0)).unwrap_or(0);
    ToolResponse::success_with_count(Product::Unified, "atlassian_unified_search", out, item_count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_is_idempotent_within_limit() {
        assert_eq!(truncate("short", 55), "short");
    }

    #[test]
    fn truncate_ellipsizes_reducing_limit_by_three() {
        let long = "x".repeat(60);
        let t = truncate(&long, 55);
        assert_eq!(t.len(), 55);
        assert!(t.ends_with("..."));
    }

    #[test]
    fn requested_products_defaults_to_jira_and_confluence() {
        assert_eq!(requested_products(&[]), vec![Product::Jira, Product::Confluence]);
    }

    #[test]
    fn requested_products_parses_case_insensitive_csv() {
        let args = vec![("products".to_string(), "JIRA, bitbucket".to_string())];
        assert_eq!(requested_products(&args), vec![Product::Jira, Product::Bitbucket]);
    }

    #[tokio::test]
    async fn missing_query_is_an_error() {
        let clients = ProductClients::default();
        let resp = execute_unified_search(&clients, &[]).await;
        assert!(resp.is_error);
    }

    #[tokio::test]
    async fn unconfigured_products_render_as_failed_sections() {
        let clients = ProductClients::default();
        let args = vec![("query".to_string(), "auth".to_string())];
        let resp = execute_unified_search(&clients, &args).await;
        assert!(!resp.is_error);
        assert!(resp.first_text().contains("### Jira"));
        assert!(resp.first_text().contains("Search failed"));
    }
}
