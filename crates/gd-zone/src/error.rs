//! Zone-subsystem error type.

use thiserror::Error;

use gd_core::{GdError, ZoneId};

/// Errors produced by `gd-zone`.  All of them are fatal input errors.
#[derive(Debug, Error)]
pub enum ZoneError {
    #[error("both grid resolution (num_x_blocks/num_y_blocks) and cell size (cell_width/cell_height) were given; supply exactly one")]
    AmbiguousZoning,

    #[error("no zoning given: supply num_x_blocks/num_y_blocks, cell_width/cell_height, or a zone table")]
    MissingZoning,

    #[error("invalid grid specification: {0}")]
    InvalidGrid(String),

    #[error("cannot build a grid: no non-boundary nodes to take the extent from")]
    EmptyExtent,

    #[error("zone {0} mixes polygon and centroid fields")]
    ConflictingZoneFields(ZoneId),

    #[error("zone {0} has neither a polygon geometry nor a centroid")]
    NoZoneFields(ZoneId),

    #[error("zone table is empty")]
    EmptyZoneTable,

    #[error("duplicate zone id {0}")]
    DuplicateZone(ZoneId),

    #[error(transparent)]
    Core(#[from] GdError),
}

pub type ZoneResult<T> = Result<T, ZoneError>;
