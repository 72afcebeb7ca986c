//! Leave application and history tools

use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{info, warn};

use leave_core::{LedgerBackend, LedgerError};

use super::balance::{EmployeeInput, EMPLOYEE_NOT_FOUND};
use super::ToolDefinition;
use crate::error::McpResult;

pub const APPLY_LEAVE: &str = "apply_leave";
pub const GET_LEAVE_HISTORY: &str = "get_leave_history";

/// apply_leave tool definition
pub fn apply_leave_tool() -> ToolDefinition {
    ToolDefinition {
        name: APPLY_LEAVE.to_string(),
        description: "Apply leave for specific dates (e.g., [\"2025-04-17\", \"2025-05-01\"]). Each date costs one day of balance.".to_string(),
        input_schema: json!({
            "type": "object",
            "required": ["employee_id", "leave_dates"],
            "properties": {
                "employee_id": {
                    "type": "string",
                    "description": "Employee identifier, e.g. 'E001'"
                },
                "leave_dates": {
                    "type": "array",
                    "items": { "type": "string" },
                    "description": "Dates to take off"
                }
            }
        }),
    }
}

/// get_leave_history tool definition
pub fn get_leave_history_tool() -> ToolDefinition {
    ToolDefinition {
        name: GET_LEAVE_HISTORY.to_string(),
        description: "Get leave history for the employee".to_string(),
        input_schema: json!({
            "type": "object",
            "required": ["employee_id"],
            "properties": {
                "employee_id": {
                    "type": "string",
                    "description": "Employee identifier, e.g. 'E001'"
                }
            }
        }),
    }
}

/// Input for apply_leave
///
/// Dates are opaque labels: format, ordering and duplicates are not checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplyLeaveInput {
    pub employee_id: String,
    pub leave_dates: Vec<String>,
}

pub(crate) fn apply_leave(
    ledger: &dyn LedgerBackend,
    input: &ApplyLeaveInput,
) -> McpResult<String> {
    info!(
        employee_id = %input.employee_id,
        dates = ?input.leave_dates,
        "Applying leave"
    );

    match ledger.try_deduct(&input.employee_id, &input.leave_dates) {
        Ok(deduction) => {
            info!(
                employee_id = %input.employee_id,
                remaining = deduction.remaining,
                "Leave applied"
            );
            Ok(format!(
                "Leave applied for {} day(s). Remaining balance: {}.",
                deduction.requested, deduction.remaining
            ))
        }
        Err(LedgerError::InsufficientBalance {
            requested,
            available,
        }) => {
            let response = format!(
                "Insufficient leave balance. You requested {} day(s) but have only {}.",
                requested, available
            );
            warn!(employee_id = %input.employee_id, "{}", response);
            Ok(response)
        }
        Err(LedgerError::EmployeeNotFound { employee_id }) => {
            warn!(%employee_id, "Employee ID not found");
            Ok(EMPLOYEE_NOT_FOUND.to_string())
        }
        Err(e) => Err(e.into()),
    }
}

pub(crate) fn get_leave_history(
    ledger: &dyn LedgerBackend,
    input: &EmployeeInput,
) -> McpResult<String> {
    info!(employee_id = %input.employee_id, "Fetching leave history");

    match ledger.get_record(&input.employee_id) {
        Ok(record) => {
            let history = if record.history.is_empty() {
                "No leaves taken.".to_string()
            } else {
                record.history.join(", ")
            };
            let response = format!("Leave history for {}: {}", record.employee_id, history);
            info!("History fetch result: {}", response);
            Ok(response)
        }
        Err(LedgerError::EmployeeNotFound { employee_id }) => {
            warn!(%employee_id, "Employee ID not found");
            Ok(EMPLOYEE_NOT_FOUND.to_string())
        }
        Err(e) => Err(e.into()),
    }
}
