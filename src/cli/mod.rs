//! CLI module — command parsing and dispatch
//!
//! All CLI logic lives here. `main.rs` calls `cli::run()`.

pub mod common;
pub mod serve;
pub mod tools;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "toolserve")]
#[command(version)]
#[command(about = "Lightweight agent tool server with SSRF-guarded web fetch", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the stdio tool server (downloads and indexes documentation first)
    Serve {
        /// Skip the documentation download; search_documentation serves an
        /// empty index
        #[arg(long)]
        no_index: bool,
    },
    /// List the tools the server exposes
    Tools,
    /// Run the URL safety check and print the verdict
    CheckUrl {
        /// URL to check
        url: String,
    },
    /// Fetch a webpage through the safety gate and print the result
    Fetch {
        /// URL to fetch
        url: String,
        /// Request timeout in seconds
        #[arg(short, long)]
        timeout: Option<u64>,
    },
    /// Build the documentation index and run a search against it
    Search {
        /// Search query
        query: String,
        /// Maximum number of results
        #[arg(short, long)]
        limit: Option<usize>,
    },
}

/// Parse arguments and dispatch to the command handlers.
pub async fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    init_logging();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { no_index } => serve::cmd_serve(no_index).await?,
        Commands::Tools => tools::cmd_tools().await?,
        Commands::CheckUrl { url } => tools::cmd_check_url(&url).await?,
        Commands::Fetch { url, timeout } => tools::cmd_fetch(&url, timeout).await?,
        Commands::Search { query, limit } => tools::cmd_search(&query, limit).await?,
    }

    Ok(())
}

/// Initialize the global tracing subscriber.
///
/// Events go to stderr: stdout belongs to the stdio transport and must
/// carry nothing but frames. `RUST_LOG` overrides the default level.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .compact()
        .init();
}
