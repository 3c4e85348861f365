//! Configuration type definitions for Toolserve
//!
//! All types implement serde traits for JSON serialization and have sensible
//! defaults, so a missing or partial config file always yields a runnable
//! configuration.

use serde::{Deserialize, Serialize};

/// Main configuration struct for Toolserve
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Outbound network policy (allowlist, reader proxy, fetch timeout)
    pub network: NetworkConfig,
    /// Documentation index configuration (archive source, result shaping)
    pub docs: DocsConfig,
}

/// Outbound network policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Hostnames exempted from IP-based safety checks. Exact,
    /// case-sensitive matches. Empty by default: no hostname is exempt.
    pub allowlist: Vec<String>,
    /// Reader proxy prepended to fetched URLs to get markdown back.
    pub reader_base_url: String,
    /// Default per-request timeout for webpage fetches, in seconds.
    pub fetch_timeout_secs: u64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            allowlist: Vec::new(),
            reader_base_url: "https://r.jina.ai".to_string(),
            fetch_timeout_secs: 30,
        }
    }
}

/// Documentation index configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DocsConfig {
    /// Zip archive the documentation set is downloaded from at startup.
    pub archive_url: String,
    /// Timeout for the archive download, in seconds.
    pub download_timeout_secs: u64,
    /// Number of results `search_documentation` returns.
    pub max_results: usize,
    /// Per-result snippet size in bytes; keeps responses bounded.
    pub snippet_chars: usize,
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            archive_url: "https://github.com/jlowin/fastmcp/archive/refs/heads/main.zip"
                .to_string(),
            download_timeout_secs: 60,
            max_results: 5,
            snippet_chars: 1500,
        }
    }
}
