//! End-to-end JSON-RPC behavior: the line-in, line-out contract a real
//! MCP client drives the gateway through.

use atlassian_mcp_gateway::clients::ProductClients;
use atlassian_mcp_gateway::registry::Registry;
use atlassian_mcp_gateway::rpc::handle_line;

fn unconfigured_registry() -> Registry {
    Registry::new(
        ProductClients::default(),
        "Set ATLASSIAN_BASE_URL and friends, or write atlassian-mcp.properties.".to_string(),
    )
}

#[tokio::test]
async fn tools_list_returns_the_full_catalogue_in_fixed_order() {
    let line = r#"{"jsonrpc":"2.0","id":1,"method":"tools/list"}"#;
    let response = handle_line(&unconfigured_registry(), line).await.unwrap();

    assert_eq!(response.matches(r#""name":"#).count(), 27);
    let jira_pos = response.find("jira_search_issues").unwrap();
    let confluence_pos = response.find("confluence_search").unwrap();
    let bitbucket_pos = response.find("bitbucket_list_repos").unwrap();
    let unified_pos = response.find("atlassian_unified_search").unwrap();
    assert!(jira_pos < confluence_pos);
    assert!(confluence_pos < bitbucket_pos);
    assert!(bitbucket_pos < unified_pos);
    assert!(response.contains(r#""additionalProperties":true"#));
}

#[tokio::test]
async fn unconfigured_gateway_still_lists_tools_but_refuses_calls() {
    let registry = unconfigured_registry();

    let list_line = r#"{"jsonrpc":"2.0","id":1,"method":"tools/list"}"#;
    let list_response = handle_line(&registry, list_line).await.unwrap();
    assert_eq!(list_response.matches(r#""name":"#).count(), 27);

    let call_line = r#"{"jsonrpc":"2.0","id":2,"method":"tools/call","params":{"name":"jira_list_projects","arguments":{}}}"#;
    let call_response = handle_line(&registry, call_line).await.unwrap();
    assert!(call_response.contains(r#""isError":true"#));
    assert!(call_response.contains("not configured"));
}

#[tokio::test]
async fn notifications_never_produce_a_response_line() {
    let registry = unconfigured_registry();
    let line = r#"{"jsonrpc":"2.0","method":"initialize"}"#;
    assert!(handle_line(&registry, line).await.is_none());
}

#[tokio::test]
async fn request_ids_are_preserved_verbatim_across_shapes() {
    let registry = unconfigured_registry();

    let numeric = handle_line(&registry, r#"{"jsonrpc":"2.0","id":42,"method":"initialize"}"#)
        .await
        .unwrap();
    assert!(numeric.contains(r#""id":42"#));

    let string_id = handle_line(&registry, r#"{"jsonrpc":"2.0","id":"req-7","method":"initialize"}"#)
        .await
        .unwrap();
    assert!(string_id.contains(r#""id":"req-7""#));

    let null_id = handle_line(&registry, r#"{"jsonrpc":"2.0","id":null,"method":"initialize"}"#)
        .await
        .unwrap();
    assert!(null_id.contains(r#""id":null"#));
}

#[tokio::test]
async fn unknown_method_reports_method_not_found() {
    let registry = unconfigured_registry();
    let line = r#"{"jsonrpc":"2.0","id":1,"method":"resources/subscribe"}"#;
    let response = handle_line(&registry, line).await.unwrap();
    assert!(response.contains("-32601"));
}
