//! OD-subsystem error type.

use thiserror::Error;

use gd_core::ZoneId;

/// Errors produced by `gd-od`.
#[derive(Debug, Error)]
pub enum OdError {
    #[error("cannot build an OD matrix over zero zones")]
    NoZones,

    #[error("negative distance {distance} for zone pair {o} -> {d}")]
    NegativeDistance { o: ZoneId, d: ZoneId, distance: f64 },
}

pub type OdResult<T> = Result<T, OdError>;
