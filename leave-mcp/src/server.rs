//! MCP protocol handler
//!
//! Maps JSON-RPC 2.0 frames onto the tool registry and resources. Handling
//! is synchronous; the transports around it decide how frames arrive.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, warn};

use leave_core::LedgerBackend;

use crate::error::{McpError, McpResult};
use crate::resources;
use crate::tools::{get_tool_definitions, ToolCall, ToolRegistry};
use crate::{PROTOCOL_VERSION, SERVER_INSTRUCTIONS, SERVER_NAME, SERVER_VERSION};

const JSONRPC_VERSION: &str = "2.0";

/// MCP JSON-RPC request
#[derive(Debug, Clone, Deserialize)]
pub struct MCPRequest {
    pub jsonrpc: String,
    /// Absent for notifications
    #[serde(default)]
    pub id: Option<Value>,
    pub method: String,
    #[serde(default)]
    pub params: Value,
}

impl MCPRequest {
    pub fn is_notification(&self) -> bool {
        self.id.is_none()
    }
}

/// MCP JSON-RPC response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MCPResponse {
    pub jsonrpc: String,
    /// `null` when the request id could not be read
    pub id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<MCPError>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MCPError {
    pub code: i32,
    pub message: String,
}

impl MCPResponse {
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn failure(id: Value, err: &McpError) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: None,
            error: Some(MCPError {
                code: err.error_code(),
                message: err.to_string(),
            }),
        }
    }
}

/// Leave Manager MCP server
///
/// Cheap to share: sessions hold it behind an `Arc`, and the only mutable
/// state lives in the ledger.
pub struct McpServer {
    registry: ToolRegistry,
}

impl McpServer {
    /// Create a server over a shared ledger
    pub fn new(ledger: Arc<dyn LedgerBackend>) -> Self {
        Self {
            registry: ToolRegistry::new(ledger),
        }
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Handle one raw inbound frame.
    ///
    /// Returns the serialized response frame, or `None` for notifications.
    /// Malformed frames get an error frame rather than an `Err`. An explicit
    /// `"id": null` is not a notification and is rejected as invalid.
    pub fn handle_frame(&self, frame: &str) -> McpResult<Option<String>> {
        let response = match serde_json::from_str::<Value>(frame) {
            Err(e) => Some(MCPResponse::failure(
                Value::Null,
                &McpError::Parse(e.to_string()),
            )),
            Ok(value) => {
                let null_id = value.get("id").is_some_and(Value::is_null);
                let id = value.get("id").cloned().unwrap_or(Value::Null);
                match serde_json::from_value::<MCPRequest>(value) {
                    Ok(_) if null_id => Some(MCPResponse::failure(
                        Value::Null,
                        &McpError::InvalidRequest("id must not be null".to_string()),
                    )),
                    Ok(request) if request.jsonrpc != JSONRPC_VERSION => {
                        let err = McpError::InvalidRequest(format!(
                            "unsupported jsonrpc version '{}'",
                            request.jsonrpc
                        ));
                        Some(MCPResponse::failure(id, &err))
                    }
                    Ok(request) => self.handle_request(request),
                    Err(e) => Some(MCPResponse::failure(
                        id,
                        &McpError::InvalidRequest(e.to_string()),
                    )),
                }
            }
        };

        response
            .map(|r| serde_json::to_string(&r))
            .transpose()
            .map_err(McpError::from)
    }

    /// Handle an MCP request
    ///
    /// Requests without an id are never dispatched. `notifications/*` are
    /// acknowledged silently; any other id-less method is logged and dropped.
    pub fn handle_request(&self, request: MCPRequest) -> Option<MCPResponse> {
        debug!(method = %request.method, id = ?request.id, "Handling request");

        let Some(id) = request.id else {
            if request.method.starts_with("notifications/") {
                debug!(method = %request.method, "Notification received");
            } else {
                warn!(method = %request.method, "Ignoring request without id");
            }
            return None;
        };

        let outcome = self.dispatch(&request.method, request.params);
        Some(match outcome {
            Ok(result) => MCPResponse::success(id, result),
            Err(e) => MCPResponse::failure(id, &e),
        })
    }

    fn dispatch(&self, method: &str, params: Value) -> McpResult<Value> {
        match method {
            "initialize" => Ok(self.handle_initialize()),
            "ping" => Ok(json!({})),
            "tools/list" => Ok(self.handle_tools_list()),
            "tools/call" => self.handle_tools_call(params),
            "resources/list" => Ok(json!({ "resources": [] })),
            "resources/templates/list" => Ok(self.handle_resource_templates_list()),
            "resources/read" => self.handle_resources_read(params),
            m if m.starts_with("notifications/") => Ok(Value::Null),
            _ => Err(McpError::MethodNotFound(method.to_string())),
        }
    }

    fn handle_initialize(&self) -> Value {
        json!({
            "protocolVersion": PROTOCOL_VERSION,
            "serverInfo": {
                "name": SERVER_NAME,
                "version": SERVER_VERSION
            },
            "capabilities": {
                "tools": { "listChanged": false },
                "resources": { "subscribe": false, "listChanged": false }
            },
            "instructions": SERVER_INSTRUCTIONS
        })
    }

    fn handle_tools_list(&self) -> Value {
        json!({ "tools": get_tool_definitions() })
    }

    fn handle_tools_call(&self, params: Value) -> McpResult<Value> {
        let call: ToolCall = serde_json::from_value(params)
            .map_err(|e| McpError::InvalidParams(format!("tools/call: {}", e)))?;

        let result = self.registry.call(call);
        Ok(serde_json::to_value(result)?)
    }

    fn handle_resource_templates_list(&self) -> Value {
        json!({ "resourceTemplates": resources::get_resource_templates() })
    }

    fn handle_resources_read(&self, params: Value) -> McpResult<Value> {
        let uri = params
            .get("uri")
            .and_then(|u| u.as_str())
            .ok_or_else(|| McpError::InvalidParams("resources/read requires 'uri'".to_string()))?;

        let content = resources::read_resource(uri)?;
        Ok(json!({ "contents": [content] }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use leave_core::{InMemoryLedger, SeedData};

    fn server() -> McpServer {
        McpServer::new(Arc::new(InMemoryLedger::from_seed(SeedData::reference())))
    }

    fn call(server: &McpServer, frame: Value) -> Value {
        let out = server.handle_frame(&frame.to_string()).unwrap().unwrap();
        serde_json::from_str(&out).unwrap()
    }

    #[test]
    fn test_initialize() {
        let response = call(
            &server(),
            json!({"jsonrpc": "2.0", "id": 1, "method": "initialize", "params": {}}),
        );
        assert_eq!(response["id"], 1);
        assert_eq!(response["result"]["serverInfo"]["name"], "LeaveManager");
        assert_eq!(response["result"]["protocolVersion"], PROTOCOL_VERSION);
    }

    #[test]
    fn test_notification_has_no_response() {
        let out = server()
            .handle_frame(r#"{"jsonrpc": "2.0", "method": "notifications/initialized"}"#)
            .unwrap();
        assert!(out.is_none());
    }

    #[test]
    fn test_parse_error_has_null_id() {
        let out = server().handle_frame("{oops").unwrap().unwrap();
        let response: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(response["id"], Value::Null);
        assert_eq!(response["error"]["code"], -32700);
    }

    #[test]
    fn test_invalid_request_keeps_id() {
        let response = call(&server(), json!({"jsonrpc": "2.0", "id": 9, "params": {}}));
        assert_eq!(response["id"], 9);
        assert_eq!(response["error"]["code"], -32600);
    }

    #[test]
    fn test_unknown_method() {
        let response = call(
            &server(),
            json!({"jsonrpc": "2.0", "id": "a", "method": "sampling/createMessage"}),
        );
        assert_eq!(response["error"]["code"], -32601);
    }

    #[test]
    fn test_tools_call_missing_name() {
        let response = call(
            &server(),
            json!({"jsonrpc": "2.0", "id": 2, "method": "tools/call", "params": {}}),
        );
        assert_eq!(response["error"]["code"], -32602);
    }

    #[test]
    fn test_resources_read_greeting() {
        let response = call(
            &server(),
            json!({
                "jsonrpc": "2.0", "id": 3, "method": "resources/read",
                "params": {"uri": "greeting://Ana"}
            }),
        );
        assert_eq!(
            response["result"]["contents"][0]["text"],
            "Hello, Ana! How can I assist you with leave management today?"
        );
    }

    #[test]
    fn test_resources_read_unknown() {
        let response = call(
            &server(),
            json!({
                "jsonrpc": "2.0", "id": 4, "method": "resources/read",
                "params": {"uri": "ledger://E001"}
            }),
        );
        assert_eq!(response["error"]["code"], -32002);
    }

    #[test]
    fn test_call_without_id_leaves_ledger_untouched() {
        let server = server();
        let out = server
            .handle_frame(
                &json!({
                    "jsonrpc": "2.0", "method": "tools/call",
                    "params": {
                        "name": "apply_leave",
                        "arguments": {
                            "employee_id": "E002",
                            "leave_dates": ["2025-06-02", "2025-06-03", "2025-06-04"]
                        }
                    }
                })
                .to_string(),
            )
            .unwrap();
        assert!(out.is_none());
        assert_eq!(server.registry().ledger().get_record("E002").unwrap().balance, 20);
    }

    #[test]
    fn test_call_with_null_id_is_rejected() {
        let server = server();
        let response = call(
            &server,
            json!({
                "jsonrpc": "2.0", "id": null, "method": "tools/call",
                "params": {
                    "name": "apply_leave",
                    "arguments": {"employee_id": "E002", "leave_dates": ["2025-06-05"]}
                }
            }),
        );
        assert_eq!(response["id"], Value::Null);
        assert_eq!(response["error"]["code"], -32600);
        assert_eq!(server.registry().ledger().get_record("E002").unwrap().balance, 20);
    }

    #[test]
    fn test_wrong_jsonrpc_version_is_rejected() {
        let response = call(
            &server(),
            json!({"jsonrpc": "1.0", "id": 5, "method": "ping"}),
        );
        assert_eq!(response["id"], 5);
        assert_eq!(response["error"]["code"], -32600);
        assert!(response.get("result").is_none());
    }
}
