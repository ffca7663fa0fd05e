//! Command implementations.

use anyhow::Context;
use tracing::debug;

use ahumeter_core::config::Config;
use ahumeter_core::store::Store;

pub mod info;
pub mod ingest;
pub mod reset;
pub mod top;

/// Open the counter store at the configured (or default) path.
///
/// The file itself is created lazily by the store; this only resolves
/// where it lives.
pub fn open_store(config: &Config) -> anyhow::Result<Store> {
    let path = config
        .counter_file()
        .context("failed to resolve counter file path")?;
    debug!(path = %path, "opening counter store");
    Ok(Store::new(path))
}
