//! MCP Tool implementations
//!
//! These are the tools exposed to clients through the MCP protocol. The set
//! is closed: [`LeaveTool`] has one variant per tool, and
//! [`ToolRegistry`] dispatches over it with an exhaustive `match`.

pub mod balance;
pub mod greeting;
pub mod leave;
mod registry;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{McpError, McpResult};

pub use balance::EmployeeInput;
pub use greeting::GreetingInput;
pub use leave::ApplyLeaveInput;
pub use registry::ToolRegistry;

/// Tool definition for MCP protocol
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Tool name
    pub name: String,

    /// Description shown to the client
    pub description: String,

    /// JSON Schema for input parameters
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

/// Get all leave tool definitions
pub fn get_tool_definitions() -> Vec<ToolDefinition> {
    vec![
        balance::get_leave_balance_tool(),
        leave::apply_leave_tool(),
        leave::get_leave_history_tool(),
        greeting::get_greeting_tool(),
    ]
}

/// Tool call request, as carried by a `tools/call` frame
#[derive(Debug, Clone, Deserialize)]
pub struct ToolCall {
    pub name: String,
    #[serde(default)]
    pub arguments: Value,
}

/// Tool call response
#[derive(Debug, Clone, Serialize)]
pub struct ToolResult {
    pub content: Vec<ToolContent>,
    #[serde(rename = "isError")]
    pub is_error: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ToolContent {
    #[serde(rename = "type")]
    pub content_type: String,
    pub text: String,
}

impl ToolResult {
    /// Successful text result
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ToolContent {
                content_type: "text".to_string(),
                text: text.into(),
            }],
            is_error: false,
        }
    }

    /// Error result; the session carries on
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            is_error: true,
            ..Self::text(message)
        }
    }

    /// Text of the first content block
    pub fn first_text(&self) -> Option<&str> {
        self.content.first().map(|c| c.text.as_str())
    }
}

/// A resolved tool invocation with typed arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeaveTool {
    GetLeaveBalance(EmployeeInput),
    ApplyLeave(ApplyLeaveInput),
    GetLeaveHistory(EmployeeInput),
    GetGreeting(GreetingInput),
}

impl LeaveTool {
    /// Resolve a tool name and its raw JSON arguments
    pub fn parse(name: &str, arguments: Value) -> McpResult<Self> {
        // Clients may omit arguments entirely
        let arguments = if arguments.is_null() {
            Value::Object(serde_json::Map::new())
        } else {
            arguments
        };

        match name {
            balance::GET_LEAVE_BALANCE => Ok(LeaveTool::GetLeaveBalance(decode(name, arguments)?)),
            leave::APPLY_LEAVE => Ok(LeaveTool::ApplyLeave(decode(name, arguments)?)),
            leave::GET_LEAVE_HISTORY => Ok(LeaveTool::GetLeaveHistory(decode(name, arguments)?)),
            greeting::GET_GREETING => Ok(LeaveTool::GetGreeting(decode(name, arguments)?)),
            _ => Err(McpError::UnknownTool(name.to_string())),
        }
    }

    /// Registered name of this tool
    pub fn name(&self) -> &'static str {
        match self {
            LeaveTool::GetLeaveBalance(_) => balance::GET_LEAVE_BALANCE,
            LeaveTool::ApplyLeave(_) => leave::APPLY_LEAVE,
            LeaveTool::GetLeaveHistory(_) => leave::GET_LEAVE_HISTORY,
            LeaveTool::GetGreeting(_) => greeting::GET_GREETING,
        }
    }
}

fn decode<T: serde::de::DeserializeOwned>(tool: &str, arguments: Value) -> McpResult<T> {
    serde_json::from_value(arguments).map_err(|e| McpError::InvalidArguments {
        tool: tool.to_string(),
        reason: e.to_string(),
    })
}
