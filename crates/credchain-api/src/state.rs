//! # Application State
//!
//! Shared state for the Axum application, passed to all route handlers
//! via the `State` extractor.
//!
//! The registry lives behind a single `parking_lot::RwLock`, so every
//! mutating handler performs its whole check-and-mutate under one write
//! lock and readers observe a consistent snapshot. The lock is
//! synchronous (never held across `.await` points) and non-poisonable.

use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use credchain_registry::Registry;

/// Runtime configuration for the API process.
#[derive(Debug, Default)]
pub struct ApiConfig {
    /// Where to persist the registry snapshot after each successful
    /// mutation. `None` keeps the registry in memory only.
    pub snapshot_path: Option<PathBuf>,
}

/// Shared application state. Cheap to clone; all clones share the one
/// registry.
#[derive(Clone)]
pub struct AppState {
    registry: Arc<RwLock<Registry>>,
    config: Arc<ApiConfig>,
}

impl AppState {
    /// Create application state around an existing registry.
    pub fn new(registry: Registry, config: ApiConfig) -> Self {
        Self {
            registry: Arc::new(RwLock::new(registry)),
            config: Arc::new(config),
        }
    }

    /// Acquire a read guard on the registry.
    pub fn registry(&self) -> RwLockReadGuard<'_, Registry> {
        self.registry.read()
    }

    /// Acquire a write guard on the registry. Callers must drop the
    /// guard before calling [`AppState::persist`].
    pub fn registry_mut(&self) -> RwLockWriteGuard<'_, Registry> {
        self.registry.write()
    }

    /// Persist the current registry snapshot, if a path is configured.
    ///
    /// Best-effort: a failed write is logged and does not fail the
    /// request whose mutation already committed in memory.
    pub fn persist(&self) {
        let Some(path) = &self.config.snapshot_path else {
            return;
        };
        let serialized = {
            let registry = self.registry.read();
            serde_json::to_string_pretty(&*registry)
        };
        match serialized {
            Ok(json) => {
                if let Err(e) = std::fs::write(path, json) {
                    tracing::warn!(path = %path.display(), error = %e, "snapshot write failed");
                }
            }
            Err(e) => tracing::warn!(error = %e, "snapshot serialization failed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use credchain_core::AccountAddress;

    fn admin() -> AccountAddress {
        AccountAddress::new("0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266").unwrap()
    }

    #[test]
    fn clones_share_the_registry() {
        let state = AppState::new(Registry::new(admin()), ApiConfig::default());
        let clone = state.clone();

        let issuer = AccountAddress::new("0x3c44cdddb6a900fa2b585dd299e03d12fa4293bc").unwrap();
        state
            .registry_mut()
            .set_issuer_status(&admin(), issuer.clone(), true, "Test Institution")
            .unwrap();

        assert!(clone.registry().is_whitelisted(&issuer));
    }

    #[test]
    fn persist_writes_a_loadable_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("registry.json");
        let state = AppState::new(
            Registry::new(admin()),
            ApiConfig {
                snapshot_path: Some(path.clone()),
            },
        );

        state.persist();

        let json = std::fs::read_to_string(&path).unwrap();
        let restored: Registry = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.admin(), &admin());
    }

    #[test]
    fn persist_without_path_is_a_no_op() {
        let state = AppState::new(Registry::new(admin()), ApiConfig::default());
        state.persist();
    }
}
