//! Toolserve — lightweight agent tool server
//!
//! Exposes a small set of callable tools (arithmetic, SSRF-guarded webpage
//! fetch, documentation search) over a line-delimited JSON-RPC stdio
//! transport. The security-relevant piece is [`net::UrlGuard`], which vets
//! every caller-supplied URL before any outbound request is made.

pub mod config;
pub mod error;
pub mod index;
pub mod net;
pub mod server;
pub mod tools;

pub use config::Config;
pub use error::{Result, ToolserveError};
pub use net::{UrlGuard, Verdict};
