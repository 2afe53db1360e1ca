//! Confluence tool handlers.

use super::common::{escape_json_string, max_results, required, required_int, resolve_query};
use crate::clients::ConfluenceClient;
use crate::json;
use crate::types::{Product, ToolResponse};

const PRODUCT: Product = Product::Confluence;

fn from_error(tool_name: &str, err: crate::error::GatewayError) -> ToolResponse {
    ToolResponse::error(PRODUCT, tool_name, err.to_string())
}

pub async fn execute_search(client: &ConfluenceClient, args: &[(String, String)]) -> ToolResponse {
    let query = match required(args, "query") {
        Ok(v) => v,
        Err(e) => return ToolResponse::error(PRODUCT, "confluence_search", e.to_string()),
    };
    let cql = resolve_query(query, "lastModified");
    let limit = max_results(args);
    match client.search(&cql, limit).await {
        Ok(body) => {
            let total = json::int_at(&body, "totalSize", json::int_at(&body, "size", 0));
            ToolResponse::success_with_count(
                PRODUCT,
                "confluence_search",
                body,
                usize::try_from(total.max(0)).unwrap_or(0),
            )
        }
        Err(e) => from_error("confluence_search", e),
    }
}

pub async fn execute_get_page(client: &ConfluenceClient, args: &[(String, String)]) -> ToolResponse {
    let id = match required(args, "pageId") {
        Ok(v) => v,
        Err(e) => return ToolResponse::error(PRODUCT, "confluence_get_page", e.to_string()),
    };
    match client.get_page(id).await {
        Ok(body) => ToolResponse::success(PRODUCT, "confluence_get_page", body),
        Err(e) => from_error("confluence_get_page", e),
    }
}

pub async fn execute_create_page(
    client: &ConfluenceClient,
    args: &[(String, String)],
) -> ToolResponse {
    let space_id = match required(args, "spaceId") {
        Ok(v) => v,
        Err(e) => return ToolResponse::error(PRODUCT, "confluence_create_page", e.to_string()),
    };
    let title = match required(args, "title") {
        Ok(v) => v,
        Err(e) => return ToolResponse::error(PRODUCT, "confluence_create_page", e.to_string()),
    };
    let content = match required(args, "content") {
        Ok(v) => v,
        Err(e) => return ToolResponse::error(PRODUCT, "confluence_create_page", e.to_string()),
    };

    let body = format!(
        r#"{{"spaceId":"{}","status":"current","title":"{}","body":{{"representation":"storage","value":"{}"}}}}"#,
        escape_json_string(space_id),
        escape_json_string(title),
        escape_json_string(content)
    );

    match client.create_page(body).await {
        Ok(body) => ToolResponse::success(PRODUCT, "confluence_create_page", body),
        Err(e) => from_error("confluence_create_page", e),
    }
}

pub async fn execute_update_page(
    client: &ConfluenceClient,
    args: &[(String, String)],
) -> ToolResponse {
    let id = match required(args, "pageId") {
        Ok(v) => v,
        Err(e) => return ToolResponse::error(PRODUCT, "confluence_update_page", e.to_string()),
    };
    let title = match required(args, "title") {
        Ok(v) => v,
        Err(e) => return ToolResponse::error(PRODUCT, "confluence_update_page", e.to_string()),
    };
    let content = match required(args, "content") {
        Ok(v) => v,
        Err(e) => return ToolResponse::error(PRODUCT, "confluence_update_page", e.to_string()),
    };
    let version = required_int(args, "version").unwrap_or(1);

    let body = format!(
        r#"{{"id":"{}","status":"current","title":"{}","body":{{"representation":"storage","value":"{}"}},"version":{{"number":{}}}}}"#,
        escape_json_string(id),
        escape_json_string(title),
        escape_json_string(content),
        version
    );

    match client.update_page(id, body).await {
        Ok(body) => ToolResponse::success(PRODUCT, "confluence_update_page", body),
        Err(e) => from_error("confluence_update_page", e),
    }
}

pub async fn execute_list_spaces(
    client: &ConfluenceClient,
    _args: &[(String, String)],
) -> ToolResponse {
    match client.list_spaces().await {
        Ok(body) => ToolResponse::success(PRODUCT, "confluence_list_spaces", body),
        Err(e) => from_error("confluence_list_spaces", e),
    }
}

pub async fn execute_get_page_children(
    client: &ConfluenceClient,
    args: &[(String, String)],
) -> ToolResponse {
    let id = match required(args, "pageId") {
        Ok(v) => v,
        Err(e) => {
            return ToolResponse::error(PRODUCT, "confluence_get_page_children", e.to_string())
        }
    };
    match client.get_page_children(id).await {
        Ok(body) => ToolResponse::success(PRODUCT, "confluence_get_page_children", body),
        Err(e) => from_error("confluence_get_page_children", e),
    }
}

pub async fn execute_delete_page(
    client: &ConfluenceClient,
    args: &[(String, String)],
) -> ToolResponse {
    let id = match required(args, "pageId") {
        Ok(v) => v,
        Err(e) => return ToolResponse::error(PRODUCT, "confluence_delete_page", e.to_string()),
    };
    match client.delete_page(id).await {
        Ok(body) => ToolResponse::success(PRODUCT, "confluence_delete_page", body),
        Err(e) => from_error("confluence_delete_page", e),
    }
}
