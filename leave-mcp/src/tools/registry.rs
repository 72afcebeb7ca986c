//! Tool dispatch against the shared ledger

use std::sync::Arc;

use tracing::warn;

use leave_core::LedgerBackend;

use super::{balance, greeting, leave, LeaveTool, ToolCall, ToolResult};
use crate::error::{McpError, McpResult};

/// Binds every tool to the ledger it reads or mutates
#[derive(Clone)]
pub struct ToolRegistry {
    ledger: Arc<dyn LedgerBackend>,
}

impl ToolRegistry {
    pub fn new(ledger: Arc<dyn LedgerBackend>) -> Self {
        Self { ledger }
    }

    /// Shared ledger handle
    pub fn ledger(&self) -> &Arc<dyn LedgerBackend> {
        &self.ledger
    }

    /// Handle a raw tool call.
    ///
    /// Unknown tools and bad arguments become error results, never protocol
    /// failures.
    pub fn call(&self, call: ToolCall) -> ToolResult {
        let tool = match LeaveTool::parse(&call.name, call.arguments) {
            Ok(tool) => tool,
            Err(e) => {
                warn!(tool = %call.name, "Rejected tool call: {}", e);
                return ToolResult::error(e.to_string());
            }
        };

        match self.execute(&tool) {
            Ok(text) => ToolResult::text(text),
            Err(McpError::Ledger(e)) => {
                warn!(
                    tool = tool.name(),
                    code = e.error_code(),
                    category = ?e.category(),
                    retryable = e.is_recoverable(),
                    "Ledger failure: {}",
                    e
                );
                ToolResult::error(McpError::Ledger(e).to_string())
            }
            Err(e) => {
                warn!(tool = tool.name(), "Tool failed: {}", e);
                ToolResult::error(e.to_string())
            }
        }
    }

    /// Run a resolved tool and return its text answer
    pub fn execute(&self, tool: &LeaveTool) -> McpResult<String> {
        let ledger = self.ledger.as_ref();
        match tool {
            LeaveTool::GetLeaveBalance(input) => balance::get_leave_balance(ledger, input),
            LeaveTool::ApplyLeave(input) => leave::apply_leave(ledger, input),
            LeaveTool::GetLeaveHistory(input) => leave::get_leave_history(ledger, input),
            LeaveTool::GetGreeting(input) => Ok(greeting::render_greeting(&input.name)),
        }
    }
}
