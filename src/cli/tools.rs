//! Tool command handlers — direct tool invocation without the transport.

use std::sync::Arc;

use anyhow::{Context, Result};
use serde_json::json;

use toolserve::config::Config;
use toolserve::index::SearchIndex;
use toolserve::tools::{DocSearchTool, PageContentTool, Tool};

use super::common::{build_guard, build_index, build_registry};

/// List the tools the server exposes.
pub(crate) async fn cmd_tools() -> Result<()> {
    let config = Config::load().with_context(|| "failed to load configuration")?;
    let registry = build_registry(&config, Arc::new(SearchIndex::fit(Vec::new())));

    for def in registry.definitions() {
        println!("{:<22} {}", def.name, def.description);
    }
    Ok(())
}

/// Run the URL safety check and print the verdict. Exits non-zero on an
/// unsafe verdict so the command is scriptable.
pub(crate) async fn cmd_check_url(url: &str) -> Result<()> {
    let config = Config::load().with_context(|| "failed to load configuration")?;
    let guard = build_guard(&config);

    match guard.validate(url).await.reason() {
        None => {
            println!("safe: {url}");
            Ok(())
        }
        Some(reason) => {
            println!("unsafe: {reason}");
            std::process::exit(1);
        }
    }
}

/// Fetch a webpage through the safety gate and print the result.
pub(crate) async fn cmd_fetch(url: &str, timeout: Option<u64>) -> Result<()> {
    let config = Config::load().with_context(|| "failed to load configuration")?;
    let tool = PageContentTool::new(
        build_guard(&config),
        &config.network.reader_base_url,
        config.network.fetch_timeout_secs,
    );

    let mut args = json!({ "url": url });
    if let Some(timeout) = timeout {
        args["timeout"] = json!(timeout);
    }

    let result = tool.execute(args).await?;
    println!("{result}");
    Ok(())
}

/// Build the documentation index and run a search against it.
pub(crate) async fn cmd_search(query: &str, limit: Option<usize>) -> Result<()> {
    let config = Config::load().with_context(|| "failed to load configuration")?;
    let index = build_index(&config).await?;

    let tool = DocSearchTool::new(
        Arc::new(index),
        limit.unwrap_or(config.docs.max_results),
        config.docs.snippet_chars,
    );

    let result = tool.execute(json!({ "query": query })).await?;
    println!("{result}");
    Ok(())
}
