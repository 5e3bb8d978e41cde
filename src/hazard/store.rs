//! Versioned, lock-protected hazard state.

use std::sync::{PoisonError, RwLock};
use thiserror::Error;

use crate::hazard::types::{HazardMap, HazardSnapshot};
use crate::observability::metrics;

/// Errors from hazard store mutations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HazardError {
    /// The store has not been seeded yet.
    #[error("hazard state is not initialized")]
    Uninitialized,

    /// A named-member operation was attempted on the beacon category.
    #[error("{0:?} does not hold named members")]
    NotNamedCategory(crate::hazard::types::HazardCategory),
}

#[derive(Debug, Default)]
struct Inner {
    map: Option<HazardMap>,
    version: u64,
}

/// The single owner of mutable hazard state.
///
/// All reads copy out under the lock and all writes go through [`HazardStore::mutate`],
/// which bumps the version. The lock is never held across an await point.
#[derive(Debug, Default)]
pub struct HazardStore {
    inner: RwLock<Inner>,
}

impl HazardStore {
    /// A store with no state yet. Mutations fail until [`HazardStore::initialize`].
    pub fn uninitialized() -> Self {
        Self::default()
    }

    /// A store seeded with `map`, at version 0.
    pub fn new(map: HazardMap) -> Self {
        let store = Self::uninitialized();
        store.initialize(map);
        store
    }

    /// Install the seed state. Does not bump the version.
    pub fn initialize(&self, map: HazardMap) {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        inner.map = Some(map);
        tracing::debug!(version = inner.version, "Hazard state initialized");
    }

    pub fn is_initialized(&self) -> bool {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .map
            .is_some()
    }

    /// Deep copy of the current state and its version.
    ///
    /// An uninitialized store reads as an empty map.
    pub fn read(&self) -> HazardSnapshot {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        HazardSnapshot {
            map: inner.map.clone().unwrap_or_default(),
            version: inner.version,
        }
    }

    pub fn version(&self) -> u64 {
        self.inner.read().unwrap_or_else(PoisonError::into_inner).version
    }

    /// Apply `f` to the live state under the write lock and bump the version.
    ///
    /// Returns the closure's result together with the new version.
    pub fn mutate<R>(&self, f: impl FnOnce(&mut HazardMap) -> R) -> Result<(R, u64), HazardError> {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let map = inner.map.as_mut().ok_or(HazardError::Uninitialized)?;
        let out = f(map);
        inner.version += 1;
        let version = inner.version;
        drop(inner);

        metrics::set_hazard_version(version);
        Ok((out, version))
    }
}
