//! Demand-subsystem error type.

use thiserror::Error;

use gd_core::GdError;

/// Errors produced by `gd-demand`.
#[derive(Debug, Error)]
pub enum DemandError {
    #[error("negative {kind} rate {rate} for building type {building:?}")]
    NegativeRate { building: String, kind: &'static str, rate: f64 },

    #[error(transparent)]
    Core(#[from] GdError),
}

pub type DemandResult<T> = Result<T, DemandError>;
