//! Calibration cache with at-most-one in-flight calibration per key.
//!
//! Posteriors live in an in-memory `moka` cache in front of the on-disk
//! artifacts. Concurrent requests for one key share a single initialisation;
//! a failed or panicking initialisation stores nothing.

use super::artifact::ArtifactLayout;
use super::engine::{run_calibration, SamplingEngine};
use super::error::CalibrationError;
use super::fingerprint::CacheKey;
use crate::binding::CalibratedModel;
use crate::compute::PosteriorStore;
use crate::config::CacheConfig;
use moka::sync::Cache;
use std::sync::Arc;
use tracing::{info, warn};

pub struct CalibrationCache {
    layout: ArtifactLayout,
    fingerprint_len: usize,
    posteriors: Cache<CacheKey, Arc<PosteriorStore>>,
}

impl CalibrationCache {
    pub fn new(config: &CacheConfig) -> Self {
        Self {
            layout: ArtifactLayout::new(config.results_dir.clone()),
            fingerprint_len: config.fingerprint_len,
            posteriors: Cache::new(config.max_in_memory),
        }
    }

    pub fn layout(&self) -> &ArtifactLayout { &self.layout }

    /// Key under which `binding` is cached, honouring the configured fingerprint length.
    pub fn key_for(&self, binding: &CalibratedModel) -> CacheKey {
        binding.cache_key_with_len(self.fingerprint_len)
    }

    /// Returns the calibration for `binding`, running `engine` only when neither
    /// memory nor disk holds one. Concurrent calls for one key share a single run
    /// and receive the same outcome.
    ///
    /// If the run panics, the panic reaches only the caller that ran it; one of
    /// the waiting callers then retries.
    pub fn get_or_calibrate<E: SamplingEngine>(
        &self,
        binding: &CalibratedModel,
        engine: &E,
    ) -> Result<Arc<PosteriorStore>, CalibrationError> {
        let key = self.key_for(binding);
        self.posteriors
            .try_get_with(key.clone(), || self.load_or_run(&key, binding, engine))
            .map_err(|e| (*e).clone())
    }

    fn load_or_run<E: SamplingEngine>(
        &self,
        key: &CacheKey,
        binding: &CalibratedModel,
        engine: &E,
    ) -> Result<Arc<PosteriorStore>, CalibrationError> {
        if let Some(store) = self.layout.load(key)? {
            info!(%key, "reusing persisted calibration");
            return Ok(Arc::new(store));
        }

        info!(%key, "calibrating");
        let store = run_calibration(binding, key, engine).map_err(|e| {
            warn!(%key, error = %e, "calibration failed");
            e
        })?;
        let path = self.layout.persist(key, &store)?;
        info!(%key, path = %path.display(), arrays = store.len(), "calibration persisted");
        Ok(Arc::new(store))
    }
}
