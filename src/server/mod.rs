//! Stdio tool server.
//!
//! Serves the tool registry over line-delimited JSON-RPC 2.0 on
//! stdin/stdout: `initialize`, `tools/list`, `tools/call`, and `ping`.
//! Logging goes to stderr so stdout carries nothing but frames.
//!
//! The framing is intentionally minimal — one request object per line, one
//! response object per line, notifications (requests without an `id`)
//! acknowledged silently.

use serde::Deserialize;
use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, info};

use crate::error::{Result, ToolserveError};
use crate::tools::ToolRegistry;

const PROTOCOL_VERSION: &str = "2025-06-18";

const PARSE_ERROR: i64 = -32700;
const METHOD_NOT_FOUND: i64 = -32601;
const INVALID_PARAMS: i64 = -32602;

#[derive(Debug, Deserialize)]
struct Request {
    #[allow(dead_code)]
    jsonrpc: Option<String>,
    #[serde(default)]
    id: Option<Value>,
    method: String,
    #[serde(default)]
    params: Value,
}

/// Serves a [`ToolRegistry`] over stdio.
pub struct ToolServer {
    registry: ToolRegistry,
    name: String,
    version: String,
}

impl ToolServer {
    /// Create a server around a populated registry.
    pub fn new(registry: ToolRegistry) -> Self {
        Self {
            registry,
            name: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Run the stdio loop until stdin closes.
    pub async fn run(self) -> Result<()> {
        info!(
            tools = self.registry.len(),
            "tool server listening on stdio"
        );

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut stdout = tokio::io::stdout();

        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }
            if let Some(response) = self.handle_message(&line).await {
                stdout.write_all(response.as_bytes()).await?;
                stdout.write_all(b"\n").await?;
                stdout.flush().await?;
            }
        }

        info!("stdin closed, shutting down");
        Ok(())
    }

    /// Handle one raw frame. Returns the serialized response, or `None` for
    /// notifications.
    pub async fn handle_message(&self, line: &str) -> Option<String> {
        let request: Request = match serde_json::from_str(line) {
            Ok(request) => request,
            Err(e) => {
                return Some(error_response(
                    Value::Null,
                    PARSE_ERROR,
                    &format!("parse error: {e}"),
                ));
            }
        };

        debug!(method = %request.method, "handling request");

        // Notifications get no response.
        let id = request.id?;

        let response = match request.method.as_str() {
            "initialize" => json!({
                "jsonrpc": "2.0",
                "id": id,
                "result": {
                    "protocolVersion": PROTOCOL_VERSION,
                    "capabilities": { "tools": {} },
                    "serverInfo": { "name": self.name, "version": self.version }
                }
            })
            .to_string(),
            "ping" => json!({ "jsonrpc": "2.0", "id": id, "result": {} }).to_string(),
            "tools/list" => {
                let tools: Vec<Value> = self
                    .registry
                    .definitions()
                    .into_iter()
                    .map(|def| {
                        json!({
                            "name": def.name,
                            "description": def.description,
                            "inputSchema": def.parameters,
                        })
                    })
                    .collect();
                json!({
                    "jsonrpc": "2.0",
                    "id": id,
                    "result": { "tools": tools }
                })
                .to_string()
            }
            "tools/call" => self.handle_tool_call(id, &request.params).await,
            other => error_response(id, METHOD_NOT_FOUND, &format!("unknown method '{other}'")),
        };

        Some(response)
    }

    async fn handle_tool_call(&self, id: Value, params: &Value) -> String {
        let Some(name) = params.get("name").and_then(|v| v.as_str()) else {
            return error_response(id, INVALID_PARAMS, "missing tool name");
        };
        let arguments = params
            .get("arguments")
            .cloned()
            .unwrap_or_else(|| json!({}));

        match self.registry.execute(name, arguments).await {
            Ok(text) => tool_result(id, &text, false),
            // An unknown tool is a protocol-level mistake; everything else
            // is reported to the agent as a failed tool result.
            Err(ToolserveError::NotFound(what)) => {
                error_response(id, INVALID_PARAMS, &format!("unknown {what}"))
            }
            Err(e) => tool_result(id, &e.to_string(), true),
        }
    }
}

fn tool_result(id: Value, text: &str, is_error: bool) -> String {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "result": {
            "content": [ { "type": "text", "text": text } ],
            "isError": is_error
        }
    })
    .to_string()
}

fn error_response(id: Value, code: i64, message: &str) -> String {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "error": { "code": code, "message": message }
    })
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::AddTool;

    fn server() -> ToolServer {
        let mut registry = ToolRegistry::new();
        registry.register(Box::new(AddTool));
        ToolServer::new(registry)
    }

    fn parse(response: &str) -> Value {
        serde_json::from_str(response).unwrap()
    }

    #[tokio::test]
    async fn test_initialize() {
        let response = server()
            .handle_message(r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{}}"#)
            .await
            .unwrap();
        let value = parse(&response);
        assert_eq!(value["id"], 1);
        assert_eq!(value["result"]["serverInfo"]["name"], "toolserve");
        assert_eq!(value["result"]["protocolVersion"], PROTOCOL_VERSION);
    }

    #[tokio::test]
    async fn test_tools_list() {
        let response = server()
            .handle_message(r#"{"jsonrpc":"2.0","id":2,"method":"tools/list"}"#)
            .await
            .unwrap();
        let value = parse(&response);
        let tools = value["result"]["tools"].as_array().unwrap();
        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0]["name"], "add");
        assert!(tools[0]["inputSchema"].is_object());
    }

    #[tokio::test]
    async fn test_tools_call() {
        let response = server()
            .handle_message(
                r#"{"jsonrpc":"2.0","id":3,"method":"tools/call","params":{"name":"add","arguments":{"a":19,"b":23}}}"#,
            )
            .await
            .unwrap();
        let value = parse(&response);
        assert_eq!(value["result"]["isError"], false);
        assert_eq!(value["result"]["content"][0]["text"], "42");
    }

    #[tokio::test]
    async fn test_tool_error_is_a_failed_result() {
        let response = server()
            .handle_message(
                r#"{"jsonrpc":"2.0","id":4,"method":"tools/call","params":{"name":"add","arguments":{"a":1}}}"#,
            )
            .await
            .unwrap();
        let value = parse(&response);
        assert_eq!(value["result"]["isError"], true);
        assert!(value["result"]["content"][0]["text"]
            .as_str()
            .unwrap()
            .contains("'b'"));
    }

    #[tokio::test]
    async fn test_unknown_tool_is_invalid_params() {
        let response = server()
            .handle_message(
                r#"{"jsonrpc":"2.0","id":5,"method":"tools/call","params":{"name":"multiply"}}"#,
            )
            .await
            .unwrap();
        let value = parse(&response);
        assert_eq!(value["error"]["code"], INVALID_PARAMS);
    }

    #[tokio::test]
    async fn test_unknown_method() {
        let response = server()
            .handle_message(r#"{"jsonrpc":"2.0","id":6,"method":"resources/list"}"#)
            .await
            .unwrap();
        let value = parse(&response);
        assert_eq!(value["error"]["code"], METHOD_NOT_FOUND);
    }

    #[tokio::test]
    async fn test_notification_gets_no_response() {
        let response = server()
            .handle_message(r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#)
            .await;
        assert!(response.is_none());
    }

    #[tokio::test]
    async fn test_parse_error() {
        let response = server().handle_message("{not json").await.unwrap();
        let value = parse(&response);
        assert_eq!(value["error"]["code"], PARSE_ERROR);
        assert_eq!(value["id"], Value::Null);
    }

    #[tokio::test]
    async fn test_ping() {
        let response = server()
            .handle_message(r#"{"jsonrpc":"2.0","id":7,"method":"ping"}"#)
            .await
            .unwrap();
        let value = parse(&response);
        assert!(value["result"].is_object());
    }
}
