//! Tool registry for Toolserve
//!
//! This module provides the `ToolRegistry` struct for managing and executing
//! tools. Tools can be registered, looked up by name, and executed with
//! proper logging and error handling.

use std::collections::HashMap;
use std::time::Instant;

use serde_json::Value;
use tracing::{error, info};

use crate::error::{Result, ToolserveError};

use super::{Tool, ToolDefinition};

/// A registry that holds and manages tools.
///
/// # Example
///
/// ```rust
/// use toolserve::tools::{AddTool, ToolRegistry};
/// use serde_json::json;
///
/// # tokio_test::block_on(async {
/// let mut registry = ToolRegistry::new();
/// registry.register(Box::new(AddTool));
///
/// assert!(registry.has("add"));
///
/// let result = registry.execute("add", json!({"a": 2, "b": 3})).await;
/// assert_eq!(result.unwrap(), "5");
/// # });
/// ```
pub struct ToolRegistry {
    tools: HashMap<String, Box<dyn Tool>>,
}

impl ToolRegistry {
    /// Create a new empty tool registry.
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Register a new tool. A tool with the same name is replaced.
    pub fn register(&mut self, tool: Box<dyn Tool>) {
        let name = tool.name().to_string();
        info!(tool = %name, "registering tool");
        self.tools.insert(name, tool);
    }

    /// Get a tool by name.
    pub fn get(&self, name: &str) -> Option<&dyn Tool> {
        self.tools.get(name).map(|t| t.as_ref())
    }

    /// Execute a tool by name.
    ///
    /// Returns `ToolserveError::NotFound` for unknown names; other errors
    /// come from the tool itself.
    pub async fn execute(&self, name: &str, args: Value) -> Result<String> {
        let tool = self
            .tools
            .get(name)
            .ok_or_else(|| ToolserveError::NotFound(format!("tool '{name}'")))?;

        let start = Instant::now();

        match tool.execute(args).await {
            Ok(output) => {
                info!(
                    tool = name,
                    duration_ms = start.elapsed().as_millis() as u64,
                    "tool executed"
                );
                Ok(output)
            }
            Err(e) => {
                error!(
                    tool = name,
                    error = %e,
                    duration_ms = start.elapsed().as_millis() as u64,
                    "tool execution failed"
                );
                Err(e)
            }
        }
    }

    /// Definitions of all registered tools, sorted by name for stable
    /// listings.
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        let mut definitions: Vec<ToolDefinition> =
            self.tools.values().map(|t| t.definition()).collect();
        definitions.sort_by(|a, b| a.name.cmp(&b.name));
        definitions
    }

    /// Names of all registered tools.
    pub fn names(&self) -> Vec<&str> {
        self.tools.keys().map(|s| s.as_str()).collect()
    }

    /// Check whether a tool exists.
    pub fn has(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Number of registered tools.
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}
