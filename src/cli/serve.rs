//! Serve command handler (stdio tool server).

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use toolserve::config::Config;
use toolserve::index::SearchIndex;
use toolserve::server::ToolServer;

use super::common::{build_index, build_registry};

/// Start the stdio tool server.
pub(crate) async fn cmd_serve(no_index: bool) -> Result<()> {
    let config = Config::load().with_context(|| "failed to load configuration")?;

    let index = if no_index {
        info!("skipping documentation download (--no-index)");
        SearchIndex::fit(Vec::new())
    } else {
        // A server without its documentation set is not worth starting;
        // fail loudly rather than serving empty search results.
        build_index(&config).await?
    };
    info!(documents = index.len(), "search index ready");

    let registry = build_registry(&config, Arc::new(index));
    ToolServer::new(registry).run().await?;

    Ok(())
}
