//! Balance lookup tool

use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{info, warn};

use leave_core::{LedgerBackend, LedgerError};

use super::ToolDefinition;
use crate::error::McpResult;

pub const GET_LEAVE_BALANCE: &str = "get_leave_balance";

/// Answer for any lookup of an id the ledger does not hold
pub const EMPLOYEE_NOT_FOUND: &str = "Employee ID not found.";

/// get_leave_balance tool definition
pub fn get_leave_balance_tool() -> ToolDefinition {
    ToolDefinition {
        name: GET_LEAVE_BALANCE.to_string(),
        description: "Check how many leave days are left for the employee".to_string(),
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

/// Input for tools keyed by employee only
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeInput {
    pub employee_id: String,
}

pub(crate) fn get_leave_balance(
    ledger: &dyn LedgerBackend,
    input: &EmployeeInput,
) -> McpResult<String> {
    info!(employee_id = %input.employee_id, "Checking leave balance");

    match ledger.get_record(&input.employee_id) {
        Ok(record) => {
            let response = format!(
                "{} has {} leave days remaining.",
                record.employee_id, record.balance
            );
            info!("Balance check result: {}", response);
            Ok(response)
        }
        Err(LedgerError::EmployeeNotFound { employee_id }) => {
            warn!(%employee_id, "Employee ID not found");
            Ok(EMPLOYEE_NOT_FOUND.to_string())
        }
        Err(e) => Err(e.into()),
    }
}
