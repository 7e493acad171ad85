//! Core of a causal impact model: relations between typed variables, their
//! resolution against a dataset, generation scheduling, path enumeration,
//! impact composition, flow normalization and a calibration cache keyed by
//! model structure.

pub mod analysis;
pub mod binding;
pub mod calibration;
pub mod compute;
pub mod config;
pub mod data;
pub mod display;
pub mod error;
pub mod store;

pub use binding::CalibratedModel;
pub use calibration::{CacheKey, CalibrationCache, SamplingEngine, SamplingSession};
pub use config::Config;
pub use error::{Error, Result};
pub use store::{Endpoint, Model, Variable, VariableGroup, VariableKind};
