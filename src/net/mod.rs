//! Outbound network safety.
//!
//! - [`UrlGuard`]: vets caller-supplied URLs before any outbound request is
//!   made on their behalf (SSRF protection).
//! - [`classify`]: explicit IP range classification for both address
//!   families, used by the guard and reusable on its own.

pub mod classify;
mod guard;

pub use guard::{UrlGuard, Verdict};
