//! SSRF guard for caller-supplied URLs.
//!
//! Given an arbitrary URL string, [`UrlGuard::validate`] decides whether it
//! is safe to resolve and fetch: the hostname is extracted, checked against
//! the configured allowlist and the localhost aliases, resolved through the
//! system resolver, and every resolved address is classified against the
//! blocked ranges in [`crate::net::classify`]. The guard never fails — every
//! outcome is a [`Verdict`], and every rejection carries a human-readable
//! reason that callers surface directly.

use std::collections::HashSet;
use std::net::IpAddr;

use reqwest::Url;
use tokio::net::lookup_host;
use tracing::debug;

use super::classify;

/// Hostname aliases blocked before resolution is even attempted; `localhost`
/// resolution behaviour varies by system configuration.
const LOCALHOST_NAMES: [&str; 2] = ["localhost", "localhost.localdomain"];

/// Outcome of a URL safety check.
///
/// A rejection carries the reason it was rejected; reason strings are part
/// of the observable contract (the fetch tool returns them verbatim), not
/// just internal diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// The URL may be fetched.
    Safe,
    /// The URL must not be fetched, with the reason why.
    Unsafe(String),
}

impl Verdict {
    /// Returns `true` for [`Verdict::Safe`].
    pub fn is_safe(&self) -> bool {
        matches!(self, Verdict::Safe)
    }

    /// The rejection reason, or `None` when safe.
    pub fn reason(&self) -> Option<&str> {
        match self {
            Verdict::Safe => None,
            Verdict::Unsafe(reason) => Some(reason),
        }
    }
}

/// Validates outbound URLs before they are fetched on a caller's behalf.
///
/// The allowlist is fixed at construction and read-only during checks;
/// concurrent `validate` calls need no coordination.
///
/// # Example
///
/// ```rust
/// use toolserve::net::UrlGuard;
///
/// # tokio_test::block_on(async {
/// let guard = UrlGuard::new();
/// assert!(!guard.validate("http://127.0.0.1/admin").await.is_safe());
/// assert!(guard.validate("https://8.8.8.8/").await.is_safe());
/// # });
/// ```
#[derive(Debug, Clone, Default)]
pub struct UrlGuard {
    allowlist: HashSet<String>,
}

impl UrlGuard {
    /// Create a guard with an empty allowlist (no hostname is exempt).
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a guard that exempts the given hostnames from resolution-based
    /// checks. Matching is exact and case-sensitive; localhost aliasing is
    /// deliberately looser (see `validate`).
    pub fn with_allowlist<I>(hosts: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self {
            allowlist: hosts.into_iter().map(Into::into).collect(),
        }
    }

    /// The configured allowlist.
    pub fn allowlist(&self) -> &HashSet<String> {
        &self.allowlist
    }

    /// Decide whether `url` is safe to fetch.
    ///
    /// Checks run in order and short-circuit on the first failure:
    /// hostname extraction, allowlist bypass, localhost aliases, hostname
    /// resolution (fail closed), then per-address range classification.
    /// One blocked address among many poisons the whole URL — the full
    /// resolved set must be clean.
    pub async fn validate(&self, url: &str) -> Verdict {
        let parsed = match Url::parse(url) {
            Ok(parsed) => parsed,
            Err(_) => return Verdict::Unsafe("unable to extract hostname from URL".to_string()),
        };
        let host = match parsed.host_str() {
            Some(host) => host,
            None => return Verdict::Unsafe("unable to extract hostname from URL".to_string()),
        };

        // `Url::host_str` keeps the brackets around IPv6 literals
        // (e.g. "[::1]"); strip them so the hostname is in the same bare
        // form operators write in allowlist config and `IpAddr` parses.
        let hostname = host
            .strip_prefix('[')
            .and_then(|h| h.strip_suffix(']'))
            .unwrap_or(host);

        // Allow-listed hosts bypass resolution entirely: a pinned internal
        // endpoint may legitimately resolve to a private address.
        if !self.allowlist.is_empty() && self.allowlist.contains(hostname) {
            debug!(host = %hostname, "allow-listed host, skipping address checks");
            return Verdict::Safe;
        }

        if LOCALHOST_NAMES.contains(&hostname.to_ascii_lowercase().as_str()) {
            return Verdict::Unsafe("access to localhost is not permitted".to_string());
        }

        // IP literals carry their own address; hostnames go through the
        // resolver, failing closed when the destination cannot be determined.
        let addresses = if let Ok(ip) = hostname.parse::<IpAddr>() {
            HashSet::from([ip])
        } else {
            match resolve(hostname).await {
                Ok(addresses) if !addresses.is_empty() => addresses,
                _ => {
                    return Verdict::Unsafe(format!("unable to resolve hostname '{hostname}'"));
                }
            }
        };

        if let Some(reason) = first_rejection(&addresses) {
            debug!(host = %hostname, reason = %reason, "blocked URL");
            return Verdict::Unsafe(reason);
        }

        Verdict::Safe
    }
}

/// Inspect a resolved address set; one blocked address poisons the whole
/// set, so an attacker cannot hide an internal address behind a public one.
fn first_rejection(addresses: &HashSet<IpAddr>) -> Option<String> {
    addresses.iter().find_map(|ip| classify::rejection(*ip))
}

/// Resolve a hostname to its full deduplicated address set (v4 and v6
/// together). The port is irrelevant — resolution only.
async fn resolve(host: &str) -> std::io::Result<HashSet<IpAddr>> {
    let addrs = lookup_host((host, 0u16)).await?;
    Ok(addrs.map(|sa| sa.ip()).collect())
}
