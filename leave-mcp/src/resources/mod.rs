//! MCP Resource implementations
//!
//! Resources are read-only text addressed by URI. The only one is the
//! greeting template `greeting://{name}`.

use serde::{Deserialize, Serialize};

use crate::error::{McpError, McpResult};
use crate::tools::greeting::render_greeting;

const GREETING_SCHEME: &str = "greeting://";

/// Resource template definition for MCP protocol
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceTemplate {
    /// URI template
    #[serde(rename = "uriTemplate")]
    pub uri_template: String,

    pub name: String,

    pub description: String,

    /// MIME type of the resource
    #[serde(rename = "mimeType")]
    pub mime_type: String,
}

/// Get all resource templates
pub fn get_resource_templates() -> Vec<ResourceTemplate> {
    vec![ResourceTemplate {
        uri_template: format!("{}{{name}}", GREETING_SCHEME),
        name: "get_greeting".to_string(),
        description: "Get a personalized greeting".to_string(),
        mime_type: "text/plain".to_string(),
    }]
}

/// Content returned by `resources/read`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceContent {
    pub uri: String,
    #[serde(rename = "mimeType")]
    pub mime_type: String,
    pub text: String,
}

/// Extract `name` from `greeting://{name}`
pub fn parse_greeting_uri(uri: &str) -> Option<&str> {
    uri.strip_prefix(GREETING_SCHEME)
        .filter(|name| !name.is_empty() && !name.contains('/'))
}

/// Resolve a resource URI to its text
pub fn read_resource(uri: &str) -> McpResult<ResourceContent> {
    let name = parse_greeting_uri(uri).ok_or_else(|| McpError::ResourceNotFound(uri.to_string()))?;

    Ok(ResourceContent {
        uri: uri.to_string(),
        mime_type: "text/plain".to_string(),
        text: render_greeting(name),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_greeting_uri() {
        assert_eq!(parse_greeting_uri("greeting://Ana"), Some("Ana"));
        assert_eq!(parse_greeting_uri("greeting://"), None);
        assert_eq!(parse_greeting_uri("greeting://a/b"), None);
        assert_eq!(parse_greeting_uri("leave://E001"), None);
    }

    #[test]
    fn test_read_greeting() {
        let content = read_resource("greeting://Ana").unwrap();
        assert_eq!(
            content.text,
            "Hello, Ana! How can I assist you with leave management today?"
        );
        assert_eq!(content.mime_type, "text/plain");
    }

    #[test]
    fn test_read_unknown_resource() {
        let err = read_resource("ledger://E001").unwrap_err();
        assert!(matches!(err, McpError::ResourceNotFound(_)));
    }

    #[test]
    fn test_template_uri() {
        let templates = get_resource_templates();
        assert_eq!(templates[0].uri_template, "greeting://{name}");
    }
}
