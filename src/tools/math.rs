//! Arithmetic tool.

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::error::{Result, ToolserveError};

use super::Tool;

/// Adds two integers.
pub struct AddTool;

impl AddTool {
    fn int_arg(args: &Value, key: &str) -> Result<i64> {
        args.get(key)
            .and_then(|v| v.as_i64())
            .ok_or_else(|| ToolserveError::Tool(format!("Missing or invalid '{key}' parameter")))
    }
}

#[async_trait]
impl Tool for AddTool {
    fn name(&self) -> &str {
        "add"
    }

    fn description(&self) -> &str {
        "Add two numbers and return their sum."
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "a": {
                    "type": "integer",
                    "description": "First integer"
                },
                "b": {
                    "type": "integer",
                    "description": "Second integer"
                }
            },
            "required": ["a", "b"]
        })
    }

    async fn execute(&self, args: Value) -> Result<String> {
        let a = Self::int_arg(&args, "a")?;
        let b = Self::int_arg(&args, "b")?;
        let sum = a
            .checked_add(b)
            .ok_or_else(|| ToolserveError::Tool("integer overflow in addition".to_string()))?;
        Ok(sum.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_properties() {
        assert_eq!(AddTool.name(), "add");
        assert!(AddTool.description().contains("Add"));
        let params = AddTool.parameters();
        assert_eq!(params["properties"]["a"]["type"], "integer");
    }

    #[tokio::test]
    async fn test_adds() {
        assert_eq!(AddTool.execute(json!({"a": 2, "b": 3})).await.unwrap(), "5");
        assert_eq!(
            AddTool.execute(json!({"a": -7, "b": 7})).await.unwrap(),
            "0"
        );
    }

    #[tokio::test]
    async fn test_missing_parameter() {
        let err = AddTool.execute(json!({"a": 2})).await.unwrap_err();
        assert!(err.to_string().contains("'b'"));
    }

    #[tokio::test]
    async fn test_non_integer_parameter() {
        let err = AddTool
            .execute(json!({"a": "two", "b": 3}))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("'a'"));
    }

    #[tokio::test]
    async fn test_overflow_is_an_error() {
        let err = AddTool
            .execute(json!({"a": i64::MAX, "b": 1}))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("overflow"));
    }
}
