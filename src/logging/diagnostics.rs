//! Diagnostic side channel
//!
//! The logger reports its own problems (directory fallback, open failures,
//! unknown levels) through `tracing`. Binaries install this stderr
//! subscriber; library users may bring their own.

use anyhow::{Context, Result};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Filter used when `RUST_LOG` is unset
pub const DEFAULT_DIAGNOSTIC_FILTER: &str = "daylog=info";

/// Install a stderr subscriber for the logger's own diagnostics
pub fn init_diagnostics() -> Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| DEFAULT_DIAGNOSTIC_FILTER.into());

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .try_init()
        .context("Failed to install diagnostic subscriber")
}
