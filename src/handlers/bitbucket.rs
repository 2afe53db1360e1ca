//! Bitbucket tool handlers.

use super::common::{escape_json_string, lookup, max_results, optional, required};
use crate::clients::BitbucketClient;
use crate::types::{Product, ToolResponse};

const PRODUCT: Product = Product::Bitbucket;

fn from_error(tool_name: &str, err: crate::error::GatewayError) -> ToolResponse {
    ToolResponse::error(PRODUCT, tool_name, err.to_string())
}

pub async fn execute_list_repos(client: &BitbucketClient, args: &[(String, String)]) -> ToolResponse {
    let workspace = match required(args, "workspace") {
        Ok(v) => v,
        Err(e) => return ToolResponse::error(PRODUCT, "bitbucket_list_repos", e.to_string()),
    };
    let pagelen = max_results(args);
    match client.list_repos(workspace, pagelen).await {
        Ok(body) => ToolResponse::success(PRODUCT, "bitbucket_list_repos", body),
        Err(e) => from_error("bitbucket_list_repos", e),
    }
}

pub async fn execute_get_repo(client: &BitbucketClient, args: &[(String, String)]) -> ToolResponse {
    let workspace = match required(args, "workspace") {
        Ok(v) => v,
        Err(e) => return ToolResponse::error(PRODUCT, "bitbucket_get_repo", e.to_string()),
    };
    let slug = match required(args, "repoSlug") {
        Ok(v) => v,
        Err(e) => return ToolResponse::error(PRODUCT, "bitbucket_get_repo", e.to_string()),
    };
    match client.get_repo(workspace, slug).await {
        Ok(body) => ToolResponse::success(PRODUCT, "bitbucket_get_repo", body),
        Err(e) => from_error("bitbucket_get_repo", e),
    }
}

pub async fn execute_list_pull_requests(
    client: &BitbucketClient,
    args: &[(String, String)],
) -> ToolResponse {
    let workspace = match required(args, "workspace") {
        Ok(v) => v,
        Err(e) => {
            return ToolResponse::error(PRODUCT, "bitbucket_list_pull_requests", e.to_string())
        }
    };
    let slug = match required(args, "repoSlug") {
        Ok(v) => v,
        Err(e) => {
            return ToolResponse::error(PRODUCT, "bitbucket_list_pull_requests", e.to_string())
        }
    };
    let pagelen = max_results(args);
    let state = optional(args, "state", "OPEN");
    match client.list_pull_requests(workspace, slug, pagelen, state).await {
        Ok(body) => ToolResponse::success(PRODUCT, "bitbucket_list_pull_requests", body),
        Err(e) => from_error("bitbucket_list_pull_requests", e),
    }
}

pub async fn execute_get_pull_request(
    client: &BitbucketClient,
    args: &[(String, String)],
) -> ToolResponse {
    let workspace = match required(args, "workspace") {
        Ok(v) => v,
        Err(e) => return ToolResponse::error(PRODUCT, "bitbucket_get_pull_request", e.to_string()),
    };
    let slug = match required(args, "repoSlug") {
        Ok(v) => v,
        Err(e) => return ToolResponse::error(PRODUCT, "bitbucket_get_pull_request", e.to_string()),
    };
    let id = match required(args, "pullRequestId") {
        Ok(v) => v,
        Err(e) => return ToolResponse::error(PRODUCT, "bitbucket_get_pull_request", e.to_string()),
    };
    match client.get_pull_request(workspace, slug, id).await {
        Ok(body) => ToolResponse::success(PRODUCT, "bitbucket_get_pull_request", body),
        Err(e) => from_error("bitbucket_get_pull_request", e),
    }
}

pub async fn execute_search_code(client: &BitbucketClient, args: &[(String, String)]) -> ToolResponse {
    let workspace = match required(args, "workspace") {
        Ok(v) => v,
        Err(e) => return ToolResponse::error(PRODUCT, "bitbucket_search_code", e.to_string()),
    };
    let query = match required(args, "query") {
        Ok(v) => v,
        Err(e) => return ToolResponse::error(PRODUCT, "bitbucket_search_code", e.to_string()),
    };
    match client.search_code(workspace, query).await {
        Ok(body) => ToolResponse::success(PRODUCT, "bitbucket_search_code", body),
        Err(e) => from_error("bitbucket_search_code", e),
    }
}

pub async fn execute_create_pull_request(
    client: &BitbucketClient,
    args: &[(String, String)],
) -> ToolResponse {
    let workspace = match required(args, "workspace") {
        Ok(v) => v,
        Err(e) => {
            return ToolResponse::error(PRODUCT, "bitbucket_create_pull_request", e.to_string())
        }
    };
    let slug = match required(args, "repoSlug") {
        Ok(v) => v,
        Err(e) => {
            return ToolResponse::error(PRODUCT, "bitbucket_create_pull_request", e.to_string())
        }
    };
    let title = match required(args, "title") {
        Ok(v) => v,
        Err(e) => {
            return ToolResponse::error(PRODUCT, "bitbucket_create_pull_request", e.to_string())
        }
    };
    let source_branch = match required(args, "sourceBranch") {
        Ok(v) => v,
        Err(e) => {
            return ToolResponse::error(PRODUCT, "bitbucket_create_pull_request", e.to_string())
        }
    };
    let destination_branch = match required(args, "destinationBranch") {
        Ok(v) => v,
        Err(e) => {
            return ToolResponse::error(PRODUCT, "bitbucket_create_pull_request", e.to_string())
        }
    };
    let description = optional(args, "description", "");

    let body = format!(
        r#"{{"title":"{}","source":{{"branch":{{"name":"{}"}}}},"destination":{{"branch":{{"name":"{}"}}}},"description":"{}"}}"#,
        escape_json_string(title),
        escape_json_string(source_branch),
        escape_json_string(destination_branch),
        escape_json_string(description)
    );

    match client.create_pull_request(workspace, slug, body).await {
        Ok(body) => ToolResponse::success(PRODUCT, "bitbucket_create_pull_request", body),
        Err(e) => from_error("bitbucket_create_pull_request", e),
    }
}

pub async fn execute_list_branches(
    client: &BitbucketClient,
    args: &[(String, String)],
) -> ToolResponse {
    let workspace = match required(args, "workspace") {
        Ok(v) => v,
        Err(e) => return ToolResponse::error(PRODUCT, "bitbucket_list_branches", e.to_string()),
    };
    let slug = match required(args, "repoSlug") {
        Ok(v) => v,
        Err(e) => return ToolResponse::error(PRODUCT, "bitbucket_list_branches", e.to_string()),
    };
    let pagelen = max_results(args);
    match client.list_branches(workspace, slug, pagelen).await {
        Ok(body) => ToolResponse::success(PRODUCT, "bitbucket_list_branches", body),
        Err(e) => from_error("bitbucket_list_branches", e),
    }
}

pub async fn execute_get_commits(client: &BitbucketClient, args: &[(String, String)]) -> ToolResponse {
    let workspace = match required(args, "workspace") {
        Ok(v) => v,
        Err(e) => return ToolResponse::error(PRODUCT, "bitbucket_get_commits", e.to_string()),
    };
    let slug = match required(args, "repoSlug") {
        Ok(v) => v,
        Err(e) => return ToolResponse::error(PRODUCT, "bitbucket_get_commits", e.to_string()),
    };
    let pagelen = max_results(args);
    let include = lookup(args, "include").unwrap_or("");
    match client.get_commits(workspace, slug, pagelen, include).await {
        Ok(body) => ToolResponse::success(PRODUCT, "bitbucket_get_commits", body),
        Err(e) => from_error("bitbucket_get_commits", e),
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

    async fn client(server: &MockServer) -> BitbucketClient {
        let config = Arc::new(
            ConnectionConfig::new(
                server.uri(),
                Credentials::personal_access_token("tok").unwrap(),
                5,
            )
            .unwrap(),
        );
        BitbucketClient::new(Arc::new(Transport::new(5).unwrap()), config)
    }

    #[tokio::test]
    async fn list_pull_requests_defaults_state_to_open() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/2.0/repositories/ws/repo/pullrequests"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{\"values\":[]}"))
            .mount(&server)
            .await;
        let c = client(&server).await;
        let args = vec![
            ("workspace".to_string(), "ws".to_string()),
            ("repoSlug".to_string(), "repo".to_string()),
        ];
        let resp = execute_list_pull_requests(&c, &args).await;
        assert!(!resp.is_error);
    }

    #[tokio::test]
    async fn create_pull_request_requires_branches() {
        let server = MockServer::start().await;
        let c = client(&server).await;
        let args = vec![
            ("workspace".to_string(), "ws".to_string()),
            ("repoSlug".to_string(), "repo".to_string()),
            ("title".to_string(), "My PR".to_string()),
        ];
        let resp = execute_create_pull_request(&c, &args).await;
        assert!(resp.is_error);
    }
}
