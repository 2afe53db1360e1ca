//! Jira tool handlers: argument validation, body synthesis, error
//! translation into `ToolResponse`.

use super::common::{
    adf_document, escape_json_string, max_results, optional, required, required_int,
    resolve_query,
};
use crate::clients::JiraClient;
use crate::json;
use crate::types::{Product, ToolResponse};

const PRODUCT: Product = Product::Jira;

fn from_error(tool_name: &str, err: crate::error::GatewayError) -> ToolResponse {
    ToolResponse::error(PRODUCT, tool_name, err.to_string())
}

pub async fn execute_search_issues(client: &JiraClient, args: &[(String, String)]) -> ToolResponse {
    let query = match required(args, "query") {
        Ok(q) => q,
        Err(e) => return ToolResponse::error(PRODUCT, "jira_search_issues", e.to_string()),
    };
    let jql = resolve_query(query, "updated");
    let max = max_results(args);
    match client.search_issues(&jql, max).await {
        Ok(body) => {
            let total = json::int_at(&body, "total", 0);
            ToolResponse::success_with_count(
                PRODUCT,
                "jira_search_issues",
                body,
                usize::try_from(total.max(0)).unwrap_or(0),
            )
        }
        Err(e) => from_error("jira_search_issues", e),
    }
}

pub async fn execute_get_issue(client: &JiraClient, args: &[(String, String)]) -> ToolResponse {
    let key = match required(args, "issueKey") {
        Ok(k) => k,
        Err(e) => return ToolResponse::error(PRODUCT, "jira_get_issue", e.to_string()),
    };
    match client.get_issue(key).await {
        Ok(body) => ToolResponse::success(PRODUCT, "jira_get_issue", body),
        Err(e) => from_error("jira_get_issue", e),
    }
}

pub async fn execute_create_issue(client: &JiraClient, args: &[(String, String)]) -> ToolResponse {
    let project_key = match required(args, "projectKey") {
        Ok(v) => v,
        Err(e) => return ToolResponse::error(PRODUCT, "jira_create_issue", e.to_string()),
    };
    let summary = match required(args, "summary") {
        Ok(v) => v,
        Err(e) => return ToolResponse::error(PRODUCT, "jira_create_issue", e.to_string()),
    };
    let issue_type = optional(args, "issueType", "Task");
    let description = optional(args, "description", "");

    let description_field = if description.is_empty() {
        String::new()
    } else {
        format!(r#","description":{}"#, adf_document(description))
    };

    let body = format!(
        r#"{{"fields":{{"project":{{"key":"{}"}},"summary":"{}","issuetype":{{"name":"{}"}}{}}}}}"#,
        escape_json_string(project_key),
        escape_json_string(summary),
        escape_json_string(issue_type),
        description_field
    );

    match client.create_issue(body).await {
        Ok(body) => ToolResponse::success(PRODUCT, "jira_create_issue", body),
        Err(e) => from_error("jira_create_issue", e),
    }
}

pub async fn execute_update_issue(client: &JiraClient, args: &[(String, String)]) -> ToolResponse {
    let key = match required(args, "issueKey") {
        Ok(v) => v,
        Err(e) => return ToolResponse::error(PRODUCT, "jira_update_issue", e.to_string()),
    };
    let summary = optional(args, "summary", "");
    let description = optional(args, "description", "");

    let mut fields = Vec::new();
    if !summary.is_empty() {
        fields.push(format!("\"summary\":\"{}\"", escape_json_string(summary)));
    }
    if !description.is_empty() {
        fields.push(format!("\"description\":{}", adf_document(description)));
    }

    let body = format!("{{\"fields\":{{{}}}}}", fields.join(","));

    match client.update_issue(key, body).await {
        Ok(body) => ToolResponse::success(PRODUCT, "jira_update_issue", body),
        Err(e) => from_error("jira_update_issue", e),
    }
}

pub async fn execute_transition_issue(
    client: &JiraClient,
    args: &[(String, String)],
) -> ToolResponse {
    let key = match required(args, "issueKey") {
        Ok(v) => v,
        Err(e) => return ToolResponse::error(PRODUCT, "jira_transition_issue", e.to_string()),
    };
    let transition_id = match required(args, "transitionId") {
        Ok(v) => v,
        Err(e) => return ToolResponse::error(PRODUCT, "jira_transition_issue", e.to_string()),
    };
    let body = format!(
        r#"{{"transition":{{"id":"{}"}}}}"#,
        escape_json_string(transition_id)
    );
    match client.transition_issue(key, body).await {
        Ok(body) => ToolResponse::success(PRODUCT, "jira_transition_issue", body),
        Err(e) => from_error("jira_transition_issue", e),
    }
}

pub async fn execute_list_projects(client: &JiraClient, _args: &[(String, String)]) -> ToolResponse {
    match client.list_projects().await {
        Ok(body) => ToolResponse::success(PRODUCT, "jira_list_projects", body),
        Err(e) => from_error("jira_list_projects", e),
    }
}

pub async fn execute_get_sprint(client: &JiraClient, args: &[(String, String)]) -> ToolResponse {
    let board_id = match required_int(args, "boardId") {
        Ok(v) => v,
        Err(e) => return ToolResponse::error(PRODUCT, "jira_get_sprint", e.to_string()),
    };
    match client.get_sprint(&board_id.to_string()).await {
        Ok(body) => ToolResponse::success(PRODUCT, "jira_get_sprint", body),
        Err(e) => from_error("jira_get_sprint", e),
    }
}

pub async fn execute_get_sprint_issues(
    client: &JiraClient,
    args: &[(String, String)],
) -> ToolResponse {
    let board_id = match required_int(args, "boardId") {
        Ok(v) => v,
        Err(e) => return ToolResponse::error(PRODUCT, "jira_get_sprint_issues", e.to_string()),
    };
    let max = max_results(args);
    match client.get_sprint_issues(&board_id.to_string(), max).await {
        Ok(body) => ToolResponse::success(PRODUCT, "jira_get_sprint_issues", body),
        Err(e) => from_error("jira_get_sprint_issues", e),
    }
}

pub async fn execute_add_comment(client: &JiraClient, args: &[(String, String)]) -> ToolResponse {
    let key = match required(args, "issueKey") {
        Ok(v) => v,
        Err(e) => return ToolResponse::error(PRODUCT, "jira_add_comment", e.to_string()),
    };
    let comment = match required(args, "comment") {
        Ok(v) => v,
        Err(e) => return ToolResponse::error(PRODUCT, "jira_add_comment", e.to_string()),
    };
    let body = format!(r#"{{"body":{}}}"#, adf_document(comment));
    match client.add_comment(key, body).await {
        Ok(body) => ToolResponse::success(PRODUCT, "jira_add_comment", body),
        Err(e) => from_error("jira_add_comment", e),
    }
}

pub async fn execute_get_comments(client: &JiraClient, args: &[(String, String)]) -> ToolResponse {
    let key = match required(args, "issueKey") {
        Ok(v) => v,
        Err(e) => return ToolResponse::error(PRODUCT, "jira_get_comments", e.to_string()),
    };
    match client.get_comments(key).await {
        Ok(body) => ToolResponse::success(PRODUCT, "jira_get_comments", body),
        Err(e) => from_error("jira_get_comments", e),
    }
}

pub async fn execute_assign_issue(client: &JiraClient, args: &[(String, String)]) -> ToolResponse {
    let key = match required(args, "issueKey") {
        Ok(v) => v,
        Err(e) => return ToolResponse::error(PRODUCT, "jira_assign_issue", e.to_string()),
    };
    let account_id = match required(args, "accountId") {
        Ok(v) => v,
        Err(e) => return ToolResponse::error(PRODUCT, "jira_assign_issue", e.to_string()),
    };
    let body = format!(r#"{{"accountId":"{}"}}"#, escape_json_string(account_id));
    match client.assign_issue(key, body).await {
        Ok(body) => ToolResponse::success(PRODUCT, "jira_assign_issue", body),
        Err(e) => from_error("jira_assign_issue", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConnectionConfig, Credentials};
    use crate::transport::Transport;
    use std::sync::Arc;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn client(server: &MockServer) -> JiraClient {
        let config = Arc::new(
            ConnectionConfig::new(
                server.uri(),
                Credentials::personal_access_token("tok").unwrap(),
                5,
            )
            .unwrap(),
        );
        JiraClient::new(Arc::new(Transport::new(5).unwrap()), config)
    }

    #[tokio::test]
    async fn search_issues_requires_query() {
        let server = MockServer::start().await;
        let c = client(&server).await;
        let resp = execute_search_issues(&c, &[]).await;
        assert!(resp.is_error);
        assert!(resp.first_text().contains("query"));
    }

    #[tokio::test]
    async fn add_comment_builds_adf_body_containing_escaped_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/rest/api/3/issue/PROJ-1/comment"))
            .respond_with(ResponseTemplate::new(201).set_body_string("{\"id\":\"10\"}"))
            .mount(&server)
            .await;

        let c = client(&server).await;
        let args = vec![
            ("issueKey".to_string(), "PROJ-1".to_string()),
            ("comment".to_string(), "Line 1\nLine 2\"quoted\"".to_string()),
        ];
        let resp = execute_add_comment(&c, &args).await;
        assert!(!resp.is_error);
    }

    #[tokio::test]
    async fn get_sprint_rejects_non_numeric_board_id() {
        let server = MockServer::start().await;
        let c = client(&server).await;
        let args = vec![("boardId".to_string(), "abc".to_string())];
        let resp = execute_get_sprint(&c, &args).await;
        assert!(resp.is_error);
        assert!(resp.first_text().contains("boardId"));
    }
}
