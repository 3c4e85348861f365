//! Webpage fetch tool.
//!
//! Fetches a caller-supplied URL as markdown through a reader proxy. Every
//! URL passes through [`UrlGuard`] before any outbound request is made;
//! rejection reasons and transport failures are returned as the tool's
//! result string rather than propagated as errors, so the caller always
//! sees why a fetch produced no content.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::warn;

use crate::error::{Result, ToolserveError};
use crate::net::UrlGuard;

use super::Tool;

const USER_AGENT: &str = "toolserve/0.1 (+https://github.com/toolserve/toolserve)";
const MAX_TIMEOUT_SECS: u64 = 300;

/// Fetches webpage content as markdown via a reader proxy, SSRF-guarded.
pub struct PageContentTool {
    client: Client,
    guard: Arc<UrlGuard>,
    reader_base_url: String,
    default_timeout_secs: u64,
}

impl PageContentTool {
    /// Create the tool with the given guard and reader proxy base URL.
    pub fn new(guard: Arc<UrlGuard>, reader_base_url: &str, default_timeout_secs: u64) -> Self {
        let client = Client::builder()
            .redirect(reqwest::redirect::Policy::limited(5))
            .user_agent(USER_AGENT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            guard,
            reader_base_url: reader_base_url.trim_end_matches('/').to_string(),
            default_timeout_secs,
        }
    }
}

#[async_trait]
impl Tool for PageContentTool {
    fn name(&self) -> &str {
        "get_page_content"
    }

    fn description(&self) -> &str {
        "Get the content of a webpage as markdown."
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "url": {
                    "type": "string",
                    "description": "The URL of the webpage to fetch"
                },
                "timeout": {
                    "type": "integer",
                    "description": "Request timeout in seconds (default: 30)",
                    "minimum": 1,
                    "maximum": MAX_TIMEOUT_SECS
                }
            },
            "required": ["url"]
        })
    }

    async fn execute(&self, args: Value) -> Result<String> {
        let url = args
            .get("url")
            .and_then(|v| v.as_str())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ToolserveError::Tool("Missing 'url' parameter".to_string()))?;

        let timeout = args
            .get("timeout")
            .and_then(|v| v.as_u64())
            .unwrap_or(self.default_timeout_secs)
            .clamp(1, MAX_TIMEOUT_SECS);

        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Ok(
                "Error: invalid URL format, must start with http:// or https://".to_string(),
            );
        }

        // The verdict gates the outbound request: on rejection the reason is
        // the tool's entire result and no network I/O happens.
        let verdict = self.guard.validate(url).await;
        if let Some(reason) = verdict.reason() {
            warn!(url, reason, "blocked unsafe URL");
            return Ok(format!("Error: {reason}"));
        }

        let reader_url = format!("{}/{}", self.reader_base_url, url);

        let response = match self
            .client
            .get(&reader_url)
            .timeout(Duration::from_secs(timeout))
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) if e.is_timeout() => {
                return Ok(format!("Error: request timed out after {timeout} seconds"));
            }
            Err(e) => {
                return Ok(format!("Error fetching content: {e}"));
            }
        };

        let response = match response.error_for_status() {
            Ok(response) => response,
            Err(e) => return Ok(format!("Error fetching content: {e}")),
        };

        match response.text().await {
            Ok(body) => Ok(body),
            Err(e) if e.is_timeout() => {
                Ok(format!("Error: request timed out after {timeout} seconds"))
            }
            Err(e) => Ok(format!("Error fetching content: {e}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tool() -> PageContentTool {
        PageContentTool::new(Arc::new(UrlGuard::new()), "https://r.jina.ai", 30)
    }

    #[test]
    fn test_properties() {
        let tool = tool();
        assert_eq!(tool.name(), "get_page_content");
        assert!(tool.description().contains("webpage"));
        let params = tool.parameters();
        assert_eq!(params["required"][0], "url");
    }

    #[test]
    fn test_reader_base_is_normalized() {
        let tool = PageContentTool::new(Arc::new(UrlGuard::new()), "https://r.jina.ai/", 30);
        assert_eq!(tool.reader_base_url, "https://r.jina.ai");
    }

    #[tokio::test]
    async fn test_missing_url_is_an_error() {
        let err = tool().execute(json!({})).await.unwrap_err();
        assert!(err.to_string().contains("'url'"));
    }

    #[tokio::test]
    async fn test_non_http_scheme_rejected_without_fetching() {
        let result = tool()
            .execute(json!({"url": "ftp://example.com/file"}))
            .await
            .unwrap();
        assert!(result.contains("must start with http:// or https://"));
    }

    #[tokio::test]
    async fn test_unsafe_url_returns_reason_without_fetching() {
        let result = tool()
            .execute(json!({"url": "http://127.0.0.1:8080/admin"}))
            .await
            .unwrap();
        assert!(result.starts_with("Error:"));
        assert!(result.contains("loopback"));
    }

    #[tokio::test]
    async fn test_metadata_endpoint_reason_passes_through() {
        let result = tool()
            .execute(json!({"url": "http://169.254.169.254/latest/meta-data/"}))
            .await
            .unwrap();
        assert!(result.contains("cloud metadata endpoint"));
    }

    #[tokio::test]
    async fn test_allowlisted_host_gets_past_the_guard() {
        // An unfetchable reader base keeps the test offline: reaching the
        // transport error proves the guard allowed the URL through.
        let guard = Arc::new(UrlGuard::with_allowlist(["127.0.0.1"]));
        let tool = PageContentTool::new(guard, "http://127.0.0.1:1", 1);
        let result = tool
            .execute(json!({"url": "http://127.0.0.1/status"}))
            .await
            .unwrap();
        assert!(result.contains("Error fetching content") || result.contains("timed out"));
        assert!(!result.contains("loopback"));
    }
}
