//! Greeting tool
//!
//! Also served as the `greeting://{name}` resource. Never touches the ledger.

use serde::{Deserialize, Serialize};
use serde_json::json;

use super::ToolDefinition;

pub const GET_GREETING: &str = "get_greeting";

/// get_greeting tool definition
pub fn get_greeting_tool() -> ToolDefinition {
    ToolDefinition {
        name: GET_GREETING.to_string(),
        description: "Get a personalized greeting".to_string(),
        input_schema: json!({
            "type": "object",
            "required": ["name"],
            "properties": {
                "name": {
                    "type": "string",
                    "description": "Name of the person to greet"
                }
            }
        }),
    }
}

/// Input for get_greeting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GreetingInput {
    pub name: String,
}

pub fn render_greeting(name: &str) -> String {
    format!(
        "Hello, {}! How can I assist you with leave management today?",
        name
    )
}
