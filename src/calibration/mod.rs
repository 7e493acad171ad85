//! Calibration: driving the sampling engine and caching its posterior by
//! model structure and dataset.
pub mod artifact;
pub mod cache;
pub mod engine;
pub mod error;
pub mod fingerprint;

pub use artifact::ArtifactLayout;
pub use cache::CalibrationCache;
pub use engine::{build_model, run_calibration, Dependency, GenerationStep, SamplingEngine, SamplingSession};
pub use error::{CalibrationError, SamplerError};
pub use fingerprint::{structure_fingerprint, CacheKey, DEFAULT_FINGERPRINT_LEN};
