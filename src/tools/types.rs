//! Tool types for Toolserve
//!
//! This module defines the `Tool` trait and `ToolDefinition`, the shape
//! every callable tool presents to the transport layer.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;

/// A tool's transport-facing description: name, human-readable purpose, and
/// the JSON Schema of its arguments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

/// Trait that all tools must implement.
///
/// Tools are executable functions an agent can call by name with JSON
/// arguments. Failures that are part of a tool's observable contract (a
/// blocked URL, a request timeout) are returned as ordinary result strings;
/// `Err` is reserved for caller mistakes such as missing parameters.
///
/// # Example
///
/// ```rust
/// use async_trait::async_trait;
/// use serde_json::Value;
/// use toolserve::tools::Tool;
/// use toolserve::error::Result;
///
/// struct PingTool;
///
/// #[async_trait]
/// impl Tool for PingTool {
///     fn name(&self) -> &str { "ping" }
///     fn description(&self) -> &str { "Answers pong" }
///     fn parameters(&self) -> Value {
///         serde_json::json!({
///             "type": "object",
///             "properties": {},
///             "required": []
///         })
///     }
///     async fn execute(&self, _args: Value) -> Result<String> {
///         Ok("pong".to_string())
///     }
/// }
/// ```
#[async_trait]
pub trait Tool: Send + Sync {
    /// The name the tool is invoked by. Unique within a registry.
    fn name(&self) -> &str;

    /// Description sent to the agent so it knows when to call the tool.
    fn description(&self) -> &str;

    /// JSON Schema for the tool's arguments.
    fn parameters(&self) -> Value;

    /// Execute the tool with the given JSON arguments.
    async fn execute(&self, args: Value) -> Result<String>;

    /// The tool's transport-facing definition.
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: self.name().to_string(),
            description: self.description().to_string(),
            parameters: self.parameters(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct PingTool;

    #[async_trait]
    impl Tool for PingTool {
        fn name(&self) -> &str {
            "ping"
        }
        fn description(&self) -> &str {
            "Answers pong"
        }
        fn parameters(&self) -> Value {
            json!({"type": "object", "properties": {}, "required": []})
        }
        async fn execute(&self, _args: Value) -> Result<String> {
            Ok("pong".to_string())
        }
    }

    #[test]
    fn test_default_definition() {
        let def = PingTool.definition();
        assert_eq!(def.name, "ping");
        assert_eq!(def.description, "Answers pong");
        assert_eq!(def.parameters["type"], "object");
    }

    #[test]
    fn test_definition_serializes() {
        let def = PingTool.definition();
        let json = serde_json::to_value(&def).unwrap();
        assert_eq!(json["name"], "ping");
        assert!(json["parameters"].is_object());
    }

    #[tokio::test]
    async fn test_execute() {
        let result = PingTool.execute(json!({})).await.unwrap();
        assert_eq!(result, "pong");
    }
}
