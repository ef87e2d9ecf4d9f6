//! Fluent builder for constructing a [`DemandPipeline`].

use gd_core::{Node, Poi};
use gd_demand::TripRateTable;
use gd_io::{InputFiles, PoiOptions};
use gd_od::AccessibilityRecord;
use gd_zone::{ZoneError, ZoneRecord};

use crate::{DemandConfig, DemandPipeline, PipelineResult, ZoneSource};

/// Fluent builder for [`DemandPipeline`].
///
/// # Required inputs
///
/// - [`DemandConfig`]
/// - the nodes and POIs
///
/// # Optional inputs
///
/// | Method                 | Default                                        |
/// |------------------------|------------------------------------------------|
/// | `.zones(v)`            | grid zones (or node `zone_id` zones)           |
/// | `.trip_rates(t)`       | the built-in rate table                        |
/// | `.accessibility(v)`    | computed great-circle distances only           |
///
/// # Zone source
///
/// An external zone table always wins.  Without one, `use_zone_id` builds
/// zones from the nodes' `zone_id` column if any node has one; otherwise the
/// grid options must describe a grid.
pub struct PipelineBuilder {
    config: DemandConfig,
    nodes: Vec<Node>,
    pois: Vec<Poi>,
    zones: Option<Vec<ZoneRecord>>,
    rate_table: Option<TripRateTable>,
    overrides: Vec<AccessibilityRecord>,
}

impl PipelineBuilder {
    pub fn new(config: DemandConfig, nodes: Vec<Node>, pois: Vec<Poi>) -> Self {
        Self { config, nodes, pois, zones: None, rate_table: None, overrides: Vec::new() }
    }

    /// Read every table named by `files`.  Explicit `trip_rate_file` and
    /// `accessibility_file` settings in `config` win over discovered files.
    pub fn from_inputs(config: DemandConfig, files: &InputFiles) -> PipelineResult<Self> {
        let files = files
            .clone()
            .with_trip_rate(config.trip_rate_file.clone())
            .with_accessibility(config.accessibility_file.clone());
        let poi_opts = PoiOptions { area_cap: config.poi_area_cap, ..PoiOptions::default() };

        let nodes = gd_io::load_nodes(&files.node)?;
        let pois = gd_io::load_pois(&files.poi, &poi_opts)?;
        let mut builder = Self::new(config, nodes, pois);

        if let Some(path) = &files.zone {
            builder = builder.zones(gd_io::load_zones(path)?);
        }
        if let Some(path) = &files.trip_rate {
            builder = builder.trip_rates(gd_io::load_trip_rates(path)?);
        }
        if let Some(path) = &files.accessibility {
            builder = builder.accessibility(gd_io::load_accessibility(path)?);
        }
        Ok(builder)
    }

    /// Use an external zone table instead of grid zones.
    pub fn zones(mut self, records: Vec<ZoneRecord>) -> Self {
        self.zones = Some(records);
        self
    }

    /// Use an external trip-rate table instead of the built-in one.
    pub fn trip_rates(mut self, table: TripRateTable) -> Self {
        self.rate_table = Some(table);
        self
    }

    /// Distances that replace the computed ones for matching zone pairs.
    pub fn accessibility(mut self, records: Vec<AccessibilityRecord>) -> Self {
        self.overrides = records;
        self
    }

    /// Validate the configuration, pick the zone source and return a
    /// pipeline ready to run.
    pub fn build(self) -> PipelineResult<DemandPipeline> {
        self.config.validate()?;
        let purpose = self.config.purpose()?;

        // Conflicting grid options are fatal even when the grid is unused.
        let grid = match self.config.zoning.spec() {
            Ok(spec) => Some(spec),
            Err(ZoneError::MissingZoning) => None,
            Err(e) => return Err(e.into()),
        };

        let source = if let Some(records) = self.zones {
            if grid.is_some() {
                log::warn!("zone table given: grid options are ignored");
            }
            ZoneSource::Records(records)
        } else if self.config.use_zone_id && self.nodes.iter().any(|n| n.preassigned_zone.is_some()) {
            ZoneSource::NodeZoneIds
        } else {
            if self.config.use_zone_id {
                log::warn!("use_zone_id is set but no node carries a zone_id; falling back to the grid");
            }
            let spec = grid.ok_or(ZoneError::MissingZoning)?;
            ZoneSource::Grid { spec, gates: self.config.zoning.gates }
        };
        log::debug!("zone source: {}", match &source {
            ZoneSource::Grid { .. } => "grid",
            ZoneSource::Records(_) => "zone table",
            ZoneSource::NodeZoneIds => "node zone_id",
        });

        let mut pipeline = DemandPipeline::new(self.config, purpose, source, self.nodes, self.pois);
        pipeline.rate_table = self.rate_table;
        pipeline.overrides = self.overrides;
        Ok(pipeline)
    }
}
