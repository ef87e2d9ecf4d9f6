//! Run configuration.
//!
//! Typically loaded from a TOML file:
//!
//! ```toml
//! trip_purpose = 1
//! seed = 42
//! mode = "auto"
//!
//! [zoning]
//! num_x_blocks = 10
//! num_y_blocks = 10
//!
//! [departure]
//! base_hour = 7
//! min_minute = 1
//! max_minute = 60
//! ```
//!
//! Every field has a default; an empty file is a valid configuration apart
//! from the grid size, which is only required when zones come from the grid.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use gd_core::{DepartureWindow, DistanceUnit, FrictionCoefficients, TravelMode, TripPurpose};
use gd_demand::NodeRates;
use gd_zone::{ZoneResult, ZoningSpec};

use crate::{PipelineError, PipelineResult};

// ── ZoningOptions ─────────────────────────────────────────────────────────────

/// Raw grid options as written by the user.
///
/// Either `num_x_blocks`/`num_y_blocks` or `cell_width`/`cell_height` must
/// be given, never both.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ZoningOptions {
    pub num_x_blocks: Option<usize>,
    pub num_y_blocks: Option<usize>,
    pub cell_width: Option<f64>,
    pub cell_height: Option<f64>,
    /// Unit of `cell_width`/`cell_height`.
    pub unit: DistanceUnit,
    /// Surround the grid with gate zones for boundary nodes.
    pub gates: bool,
}

impl Default for ZoningOptions {
    fn default() -> Self {
        Self {
            num_x_blocks: None,
            num_y_blocks: None,
            cell_width: None,
            cell_height: None,
            unit: DistanceUnit::Km,
            gates: true,
        }
    }
}

impl ZoningOptions {
    pub fn blocks(num_x: usize, num_y: usize) -> Self {
        Self { num_x_blocks: Some(num_x), num_y_blocks: Some(num_y), ..Self::default() }
    }

    pub fn cell_size(width: f64, height: f64, unit: DistanceUnit) -> Self {
        Self { cell_width: Some(width), cell_height: Some(height), unit, ..Self::default() }
    }

    pub fn spec(&self) -> ZoneResult<ZoningSpec> {
        ZoningSpec::from_options(
            self.num_x_blocks,
            self.num_y_blocks,
            self.cell_width,
            self.cell_height,
            self.unit,
        )
    }
}

// ── DemandConfig ──────────────────────────────────────────────────────────────

/// Top-level pipeline configuration.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DemandConfig {
    pub zoning: ZoningOptions,

    /// 1 = home-based work, 2 = home-based other, 3 = non-home-based.
    pub trip_purpose: u8,

    /// Overrides the purpose's default friction coefficients.
    pub friction: Option<FrictionCoefficients>,

    pub node_rates: NodeRates,

    pub departure: DepartureWindow,

    pub mode: TravelMode,

    /// Master RNG seed.  The same seed always produces identical agents.
    pub seed: u64,

    /// Worker thread count passed to Rayon.  `None` uses all logical cores.
    pub num_threads: Option<usize>,

    /// Build zones from the nodes' `zone_id` column when no zone table is
    /// given, and keep those assignments during synchronisation.
    pub use_zone_id: bool,

    /// Unit of OD distances (and therefore of the friction function input).
    pub distance_unit: DistanceUnit,

    /// POI areas above this are zeroed on load.
    pub poi_area_cap: f64,

    /// Explicit trip-rate table; wins over a discovered `trip_rate.csv`.
    pub trip_rate_file: Option<PathBuf>,

    /// Explicit accessibility table; wins over a discovered `accessibility.csv`.
    pub accessibility_file: Option<PathBuf>,
}

impl Default for DemandConfig {
    fn default() -> Self {
        Self {
            zoning: ZoningOptions::default(),
            trip_purpose: 1,
            friction: None,
            node_rates: NodeRates::default(),
            departure: DepartureWindow::default(),
            mode: TravelMode::default(),
            seed: 0,
            num_threads: None,
            use_zone_id: false,
            distance_unit: DistanceUnit::Km,
            poi_area_cap: 90_000.0,
            trip_rate_file: None,
            accessibility_file: None,
        }
    }
}

impl DemandConfig {
    pub fn from_toml_str(s: &str) -> PipelineResult<Self> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> PipelineResult<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|source| PipelineError::ConfigIo { path: path.to_path_buf(), source })?;
        Self::from_toml_str(&text)
    }

    /// Check the options that do not depend on the input data.
    pub fn validate(&self) -> PipelineResult<()> {
        self.purpose()?;
        if self.num_threads == Some(0) {
            return Err(PipelineError::Config("num_threads must be at least 1".into()));
        }
        if self.departure.min_minute > self.departure.max_minute {
            return Err(PipelineError::Config(format!(
                "departure window is empty: min_minute {} > max_minute {}",
                self.departure.min_minute, self.departure.max_minute
            )));
        }
        if self.departure.base_hour > 23 {
            return Err(PipelineError::Config(format!("base_hour {} is not an hour of day", self.departure.base_hour)));
        }
        if !(self.poi_area_cap > 0.0) {
            return Err(PipelineError::Config("poi_area_cap must be positive".into()));
        }
        Ok(())
    }

    pub fn purpose(&self) -> PipelineResult<TripPurpose> {
        Ok(TripPurpose::from_code(self.trip_purpose)?)
    }

    /// Explicit coefficients if given, otherwise the purpose defaults.
    pub fn friction(&self) -> PipelineResult<FrictionCoefficients> {
        match self.friction {
            Some(f) => Ok(f),
            None => Ok(self.purpose()?.friction()),
        }
    }
}
