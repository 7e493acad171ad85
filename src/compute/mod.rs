//! Posterior sample storage and impact composition.
pub mod impact;
pub mod samples;

pub use impact::{compose, compose_path, compose_paths, Impact, ImpactComponent, ImpactSummary};
pub use samples::{ImpactError, PosteriorStore, SampleArray};
