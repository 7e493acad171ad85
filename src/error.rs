//! Crate-level error aggregating every area's failures.
use crate::analysis::ScheduleError;
use crate::calibration::CalibrationError;
use crate::compute::ImpactError;
use crate::config::ConfigError;
use crate::data::DataError;
use crate::store::StoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Schedule(#[from] ScheduleError),
    #[error(transparent)]
    Impact(#[from] ImpactError),
    #[error(transparent)]
    Data(#[from] DataError),
    #[error(transparent)]
    Calibration(#[from] CalibrationError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
