//! Documentation search tool.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::error::{Result, ToolserveError};
use crate::index::SearchIndex;

use super::Tool;

/// Searches the documentation index and returns formatted snippets.
pub struct DocSearchTool {
    index: Arc<SearchIndex>,
    max_results: usize,
    snippet_chars: usize,
}

impl DocSearchTool {
    /// Create the tool over a built index.
    pub fn new(index: Arc<SearchIndex>, max_results: usize, snippet_chars: usize) -> Self {
        Self {
            index,
            max_results: max_results.max(1),
            snippet_chars: snippet_chars.max(1),
        }
    }
}

#[async_trait]
impl Tool for DocSearchTool {
    fn name(&self) -> &str {
        "search_documentation"
    }

    fn description(&self) -> &str {
        "Search the documentation for specific topics and return matching snippets with source filenames."
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "The search term or question (e.g. \"how to use context\")"
                }
            },
            "required": ["query"]
        })
    }

    async fn execute(&self, args: Value) -> Result<String> {
        let query = args
            .get("query")
            .and_then(|v| v.as_str())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ToolserveError::Tool("Missing 'query' parameter".to_string()))?;

        let hits = self.index.search(query, self.max_results);
        if hits.is_empty() {
            return Ok(format!("No documentation matches found for '{query}'."));
        }

        let blocks: Vec<String> = hits
            .iter()
            .map(|hit| {
                format!(
                    "--- SOURCE: {} ---\n{}...",
                    hit.doc.filename,
                    snippet(&hit.doc.content, self.snippet_chars)
                )
            })
            .collect();

        Ok(blocks.join("\n\n"))
    }
}

/// Truncate to at most `max` bytes without splitting a UTF-8 code point.
fn snippet(content: &str, max: usize) -> &str {
    if content.len() <= max {
        return content;
    }
    let mut end = max;
    while !content.is_char_boundary(end) {
        end -= 1;
    }
    &content[..end]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::Document;

    fn sample_tool(snippet_chars: usize) -> DocSearchTool {
        let index = SearchIndex::fit(vec![
            Document {
                filename: "docs/context.md".to_string(),
                content: "The context object gives tools access to logging and \
                          progress reporting."
                    .to_string(),
            },
            Document {
                filename: "docs/install.md".to_string(),
                content: "Install the package and verify the binary.".to_string(),
            },
        ]);
        DocSearchTool::new(Arc::new(index), 5, snippet_chars)
    }

    #[test]
    fn test_properties() {
        let tool = sample_tool(1500);
        assert_eq!(tool.name(), "search_documentation");
        assert!(tool.description().contains("Search"));
    }

    #[tokio::test]
    async fn test_results_carry_source_header() {
        let tool = sample_tool(1500);
        let out = tool
            .execute(json!({"query": "context logging"}))
            .await
            .unwrap();
        assert!(out.contains("--- SOURCE: docs/context.md ---"));
        assert!(out.contains("context object"));
    }

    #[tokio::test]
    async fn test_no_matches_message() {
        let tool = sample_tool(1500);
        let out = tool
            .execute(json!({"query": "kubernetes operators"}))
            .await
            .unwrap();
        assert!(out.contains("No documentation matches found"));
    }

    #[tokio::test]
    async fn test_missing_query_is_an_error() {
        let tool = sample_tool(1500);
        assert!(tool.execute(json!({})).await.is_err());
        assert!(tool.execute(json!({"query": "   "})).await.is_err());
    }

    #[tokio::test]
    async fn test_snippets_are_truncated() {
        let tool = sample_tool(20);
        let out = tool.execute(json!({"query": "context"})).await.unwrap();
        let body = out.lines().nth(1).unwrap();
        // 20 bytes of content plus the ellipsis.
        assert!(body.len() <= 23);
        assert!(body.ends_with("..."));
    }

    #[test]
    fn test_snippet_respects_char_boundaries() {
        // Multi-byte content: naive slicing at byte 7 would panic.
        let text = "héllo wörld";
        let cut = snippet(text, 7);
        assert!(text.starts_with(cut));
        assert!(cut.len() <= 7);
        assert_eq!(snippet("short", 100), "short");
    }
}
