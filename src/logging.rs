//! Tracing setup for the helper binaries.
//!
//! The library only emits events; installing a subscriber is left to the
//! binaries, which call [`init_tracing`] before doing any work.

use anyhow::{Result, anyhow};
use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is unset: warnings from everything, info
/// from this crate.
pub const DEFAULT_DIRECTIVES: &str = "warn,zaakcatalogus=info";

/// Install a stderr `fmt` subscriber filtered by `RUST_LOG`.
///
/// Fails if a global subscriber is already installed.
pub fn init_tracing() -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|err| anyhow!("installing tracing subscriber: {err}"))
}
