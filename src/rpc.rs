//! JSON-RPC 2.0 envelope parsing and response framing for the three
//! methods the gateway consumes: `initialize`, `tools/list`, `tools/call`.
//!
//! Built entirely on the shape-directed extractor in [`crate::json`] —
//! there is no `serde_json` on the request-parsing or response-building
//! path; outbound bodies are hand-assembled strings.

use crate::handlers::common::escape_json_string;
use crate::json;
use crate::registry::Registry;

const PROTOCOL_VERSION: &str = "2024-11-05";
const SERVER_NAME: &str = "atlassian-mcp-gateway";
const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

const METHOD_NOT_FOUND: i64 = -32601;
const INVALID_PARAMS: i64 = -32602;

/// A single parsed JSON-RPC request line.
struct Request {
    id_token: Option<String>,
    method: String,
    params: Option<String>,
}

fn parse_request(line: &str) -> Request {
    Request {
        id_token: json::raw_token(line, "id"),
        method: json::string_or_default(line, "method", ""),
        params: json::block(line, "params"),
    }
}

/// Handles one line of input. Returns `None` for notifications (no `id`
/// in the request), `Some(response_line)` otherwise.
pub async fn handle_line(registry: &Registry, line: &str) -> Option<String> {
    let request = parse_request(line);
    let id_token = request.id_token?;

    let response_body = match request.method.as_str() {
        "initialize" => initialize_result(),
        "tools/list" => tools_list_result(registry),
        "tools/call" => tools_call_result(registry, request.params.as_deref()).await,
        other => error_envelope(METHOD_NOT_FOUND, &format!("Method not found: {other}")),
    };

    Some(format!(
        r#"{{"jsonrpc":"2.0","id":{id_token},{response_body}}}"#
    ))
}

fn error_envelope(code: i64, message: &str) -> String {
    format!(
        r#""error":{{"code":{code},"message":"{}"}}"#,
        escape_json_string(message)
    )
}

fn initialize_result() -> String {
    format!(
        r#""result":{{"protocolVersion":"{PROTOCOL_VERSION}","capabilities":{{"tools":{{}}}},"serverInfo":{{"name":"{SERVER_NAME}","version":"{SERVER_VERSION}"}}}}"#
    )
}

fn tools_list_result(registry: &Registry) -> String {
    let entries: Vec<String> = registry
        .descriptors()
        .iter()
        .map(|d| {
            format!(
                r#"{{"name":"{}","description":"{}","inputSchema":{{"type":"object","properties":{{}},"additionalProperties":true}}}}"#,
                escape_json_string(d.name),
                escape_json_string(d.description)
            )
        })
        .collect();
    format!(r#""result":{{"tools":[{}]}}"#, entries.join(","))
}

async fn tools_call_result(registry: &Registry, params: Option<&str>) -> String {
    let Some(params) = params else {
        return error_envelope(INVALID_PARAMS, "Missing required parameter: 'params'");
    };
    let Some(name) = json::string_at(params, "name") else {
        return error_envelope(INVALID_PARAMS, "Missing required parameter: 'params.name'");
    };
    let arguments = json::block(params, "arguments").unwrap_or_default();
    let args = json::extract_argument_map(&arguments);

    let response = registry.dispatch(&name, args).await;
    format!(
        r#""result":{{"content":[{{"type":"text","text":"{}"}}],"isError":{}}}"#,
        escape_json_string(response.first_text()),
        response.is_error
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::ProductClients;

    fn registry() -> Registry {
        Registry::new(ProductClients::default(), "see atlassian-mcp.properties".to_string())
    }

    #[tokio::test]
    async fn initialize_preserves_numeric_id() {
        let line = r#"{"jsonrpc":"2.0","id":1,"method":"initialize"}"#;
        let response = handle_line(&registry(), line).await.unwrap();
        assert!(response.contains(r#""id":1"#));
        assert!(response.contains(PROTOCOL_VERSION));
    }

    #[tokio::test]
    async fn initialize_preserves_string_id() {
        let line = r#"{"jsonrpc":"2.0","id":"abc","method":"initialize"}"#;
        let response = handle_line(&registry(), line).await.unwrap();
        assert!(response.contains(r#""id":"abc""#));
    }

    #[tokio::test]
    async fn initialize_preserves_null_id() {
        let line = r#"{"jsonrpc":"2.0","id":null,"method":"initialize"}"#;
        let response = handle_line(&registry(), line).await.unwrap();
        assert!(response.contains(r#""id":null"#));
    }

    #[tokio::test]
    async fn notification_without_id_returns_no_response() {
        let line = r#"{"jsonrpc":"2.0","method":"initialize"}"#;
        assert!(handle_line(&registry(), line).await.is_none());
    }

    #[tokio::test]
    async fn tools_list_returns_27_tools() {
        let line = r#"{"jsonrpc":"2.0","id":1,"method":"tools/list"}"#;
        let response = handle_line(&registry(), line).await.unwrap();
        assert_eq!(response.matches(r#""name":"#).count(), 27);
        assert!(response.contains(r#""additionalProperties":true"#));
    }

    #[tokio::test]
    async fn unknown_method_is_minus_32601() {
        let line = r#"{"jsonrpc":"2.0","id":1,"method":"resources/list"}"#;
        let response = handle_line(&registry(), line).await.unwrap();
        assert!(response.contains("-32601"));
    }

    #[tokio::test]
    async fn tools_call_missing_name_is_minus_32602() {
        let line = r#"{"jsonrpc":"2.0","id":1,"method":"tools/call","params":{"arguments":{}}}"#;
        let response = handle_line(&registry(), line).await.unwrap();
        assert!(response.contains("-32602"));
    }

    #[tokio::test]
    async fn tools_call_dispatches_and_wraps_content() {
        let line = r#"{"jsonrpc":"2.0","id":1,"method":"tools/call","params":{"name":"jira_list_projects","arguments":{}}}"#;
        let response = handle_line(&registry(), line).await.unwrap();
        assert!(response.contains(r#""type":"text""#));
        assert!(response.contains(r#""isError":true"#));
    }
}
