// Process-wide configuration store registry
// Author: kelexine (https://github.com/kelexine)
//
// Exactly one ConfigurationStore serves a process. The host installs it once at
// startup and hands clones of the Arc to its collaborators. `current` exists
// for code that cannot be given the store directly.

use super::ConfigurationStore;
use crate::error::{Result, SettingsError};
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::debug;

static STORE: Lazy<RwLock<Option<Arc<ConfigurationStore>>>> = Lazy::new(|| RwLock::new(None));

/// Installs `store` as the process-wide instance.
///
/// Fails if a store is already installed; call [`teardown`] first.
pub fn install(store: Arc<ConfigurationStore>) -> Result<()> {
    let mut slot = STORE.write();
    if slot.is_some() {
        return Err(SettingsError::Internal(
            "a configuration store is already installed".to_string(),
        ));
    }
    debug!("Installed process-wide configuration store");
    *slot = Some(store);
    Ok(())
}

/// The installed store, if any.
pub fn current() -> Option<Arc<ConfigurationStore>> {
    STORE.read().clone()
}

/// Removes the installed store and returns it.
pub fn teardown() -> Option<Arc<ConfigurationStore>> {
    let store = STORE.write().take();
    if store.is_some() {
        debug!("Removed process-wide configuration store");
    }
    store
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::MapEnvironment;
    use crate::persistence::MemoryBackend;

    // Single test: the registry is global state shared by the whole test binary.
    #[test]
    fn test_install_current_teardown() {
        let store = Arc::new(ConfigurationStore::open(
            Arc::new(MapEnvironment::new()),
            Arc::new(MemoryBackend::new()),
        ));

        assert!(current().is_none());
        install(Arc::clone(&store)).unwrap();
        assert!(Arc::ptr_eq(&current().unwrap(), &store));

        let again = install(Arc::clone(&store));
        assert!(matches!(again, Err(SettingsError::Internal(_))));

        let removed = teardown().unwrap();
        assert!(Arc::ptr_eq(&removed, &store));
        assert!(current().is_none());
        assert!(teardown().is_none());
    }
}
