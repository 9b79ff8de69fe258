//! `ConfigHandle` — shared, swappable configuration snapshots.
//!
//! Readers never see a half-updated config: the handle stores an
//! `Arc<StormConfig>` and mutation replaces that `Arc` wholesale under a
//! short write lock.  A reader clones the `Arc` once and keeps evaluating
//! against that snapshot even if an administrator swaps the config
//! mid-tick.

use std::sync::{Arc, PoisonError, RwLock};

use tracing::info;

use crate::{ConfigWarning, FieldConfig, StormConfig};

/// Cheap-to-clone handle; every clone observes the same current snapshot.
#[derive(Clone, Debug)]
pub struct ConfigHandle {
    inner: Arc<RwLock<Arc<StormConfig>>>,
}

impl ConfigHandle {
    /// Validate `config` and wrap it.  Corrections are returned and logged.
    pub fn new(config: StormConfig) -> (Self, Vec<ConfigWarning>) {
        let (config, warnings) = config.validated();
        let handle = Self { inner: Arc::new(RwLock::new(Arc::new(config))) };
        (handle, warnings)
    }

    /// The current snapshot.  Hold it for as long as a consistent view is
    /// needed (one tick, one batch of placement queries, …).
    pub fn snapshot(&self) -> Arc<StormConfig> {
        let guard = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Run `f` against the current snapshot without cloning the `Arc`.
    #[inline]
    pub fn with<R>(&self, f: impl FnOnce(&StormConfig) -> R) -> R {
        let guard = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        f(&guard)
    }

    /// Validate and install a whole new document.  Returns the corrections.
    pub fn replace(&self, config: StormConfig) -> Vec<ConfigWarning> {
        let (config, warnings) = config.validated();
        self.install(config);
        warnings
    }

    /// Validate `field` and install it in place of the current field section.
    ///
    /// The other sections are carried over from the snapshot current at the
    /// time of the swap; the write lock is held across read-modify-write so
    /// concurrent replacements cannot interleave.
    pub fn replace_field(&self, field: FieldConfig) -> Vec<ConfigWarning> {
        let (field, warnings) = field.validated();
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let mut next = **guard;
        next.field = field;
        *guard = Arc::new(next);
        info!(
            inner = field.inner_radius,
            outer = field.outer_radius,
            drain = field.drain_rate_per_second,
            "field config replaced",
        );
        warnings
    }

    fn install(&self, config: StormConfig) {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Arc::new(config);
        info!("storm config replaced");
    }
}
