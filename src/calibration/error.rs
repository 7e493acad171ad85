//! Defines the error types for the calibration module.
use super::fingerprint::CacheKey;
use crate::analysis::ScheduleError;
use crate::store::StoreError;
use std::path::PathBuf;
use thiserror::Error;

/// Failure reported by an external sampling engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct SamplerError(pub String);

impl SamplerError {
    pub fn new(reason: impl Into<String>) -> Self { Self(reason.into()) }
}

/// Outcome of a failed calibration. Cloneable so that every caller waiting on
/// the same key receives the same failure.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalibrationError {
    #[error("Cannot resolve variables for calibration '{key}': {source}")]
    Resolve { key: CacheKey, source: StoreError },
    #[error("Cannot schedule calibration '{key}': {source}")]
    Schedule { key: CacheKey, source: ScheduleError },
    #[error("Sampling engine failed for '{key}': {source}")]
    SamplerFailure { key: CacheKey, source: SamplerError },
    #[error("Artifact {path:?} for '{key}': {reason}")]
    Artifact { key: CacheKey, path: PathBuf, reason: String },
}

impl CalibrationError {
    pub fn key(&self) -> &CacheKey {
        match self {
            CalibrationError::Resolve { key, .. }
            | CalibrationError::Schedule { key, .. }
            | CalibrationError::SamplerFailure { key, .. }
            | CalibrationError::Artifact { key, .. } => key,
        }
    }
}
