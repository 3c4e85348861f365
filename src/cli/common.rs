//! Shared CLI helpers used across multiple command handlers.

use std::sync::Arc;

use anyhow::{Context, Result};
use reqwest::Client;

use toolserve::config::Config;
use toolserve::index::{docs::download_documents, SearchIndex};
use toolserve::net::UrlGuard;
use toolserve::tools::{AddTool, DocSearchTool, PageContentTool, ToolRegistry};

/// Build the URL guard from the configured allowlist.
pub fn build_guard(config: &Config) -> Arc<UrlGuard> {
    Arc::new(UrlGuard::with_allowlist(
        config.network.allowlist.iter().cloned(),
    ))
}

/// Download the documentation archive and build the search index.
pub async fn build_index(config: &Config) -> Result<SearchIndex> {
    let client = Client::new();
    let documents = download_documents(
        &client,
        &config.docs.archive_url,
        config.docs.download_timeout_secs,
    )
    .await
    .with_context(|| {
        format!(
            "failed to build documentation index from {}",
            config.docs.archive_url
        )
    })?;
    Ok(SearchIndex::fit(documents))
}

/// Register the full tool set over a built index.
pub fn build_registry(config: &Config, index: Arc<SearchIndex>) -> ToolRegistry {
    let guard = build_guard(config);

    let mut registry = ToolRegistry::new();
    registry.register(Box::new(AddTool));
    registry.register(Box::new(PageContentTool::new(
        guard,
        &config.network.reader_base_url,
        config.network.fetch_timeout_secs,
    )));
    registry.register(Box::new(DocSearchTool::new(
        index,
        config.docs.max_results,
        config.docs.snippet_chars,
    )));
    registry
}
