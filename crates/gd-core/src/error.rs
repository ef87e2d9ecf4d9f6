//! Workspace base error type.
//!
//! Sub-crates define their own error enums and wrap `GdError` as one variant
//! via `#[from]`, keeping geometry and parse failures in one place.

use thiserror::Error;

/// The top-level error type for `gd-core`.
#[derive(Debug, Error)]
pub enum GdError {
    #[error("WKT parse error: {0}")]
    Wkt(String),

    #[error("unknown distance unit {0:?}: expected \"km\", \"meter\", or \"mile\"")]
    UnknownUnit(String),

    #[error("unknown travel mode {0:?}: expected \"auto\", \"bike\", or \"walk\"")]
    UnknownMode(String),

    #[error("invalid trip purpose {0}: expected 1, 2, or 3")]
    InvalidTripPurpose(u8),

    #[error("degenerate polygon: {0}")]
    DegeneratePolygon(String),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `gd-core`.
pub type GdResult<T> = Result<T, GdError>;
