//! # Snapshot Store
//!
//! Load/save helpers for the registry snapshot file. The snapshot is a
//! pretty-printed JSON serialization of the whole [`Registry`], shared
//! with the API server's `CREDCHAIN_STATE` persistence.

use std::path::Path;

use anyhow::{bail, Context, Result};

use credchain_core::AccountAddress;
use credchain_registry::Registry;

/// Load the registry from a snapshot file.
pub fn load_registry(path: &Path) -> Result<Registry> {
    let json = std::fs::read_to_string(path).with_context(|| {
        format!(
            "cannot read registry state at {} (run `credchain init` first?)",
            path.display()
        )
    })?;
    let registry = serde_json::from_str(&json)
        .with_context(|| format!("malformed registry state at {}", path.display()))?;
    Ok(registry)
}

/// Save the registry to a snapshot file.
pub fn save_registry(path: &Path, registry: &Registry) -> Result<()> {
    let json = serde_json::to_string_pretty(registry)?;
    std::fs::write(path, json)
        .with_context(|| format!("cannot write registry state at {}", path.display()))?;
    Ok(())
}

/// Create a fresh registry snapshot administered by `admin`.
///
/// Refuses to overwrite an existing snapshot unless `force` is set.
pub fn init_registry(path: &Path, admin: AccountAddress, force: bool) -> Result<Registry> {
    if path.exists() && !force {
        bail!(
            "registry state already exists at {} (use --force to overwrite)",
            path.display()
        );
    }
    let registry = Registry::new(admin);
    save_registry(path, &registry)?;
    Ok(registry)
}
