//! The `DemandPipeline` state object and its stages.

use std::collections::BTreeSet;

use gd_agent::{Agent, AgentSampler};
use gd_core::{Node, Poi, TripPurpose};
use gd_demand::{TripRateGenerator, TripRateTable, ZoneAggregator, assign_node_rates};
use gd_od::{AccessibilityRecord, DistanceMatrixBuilder, GravityModel, OdMatrix};
use gd_output::OutputWriter;
use gd_zone::{
    GeometrySynchronizer, GridBuilder, ZoneRecord, ZoneSet, ZoningSpec, zones_from_node_ids, zones_from_records,
};

use crate::{DemandConfig, Diagnostics, PipelineError, PipelineObserver, PipelineResult, Stage};

/// Where the zones come from.
#[derive(Clone, Debug, PartialEq)]
pub enum ZoneSource {
    /// Regular grid over the extent of the non-boundary nodes.
    Grid { spec: ZoningSpec, gates: bool },
    /// External zone table.
    Records(Vec<ZoneRecord>),
    /// One centroid zone per node `zone_id`.
    NodeZoneIds,
}

/// All pipeline state, advanced one stage at a time.
///
/// Create via [`PipelineBuilder`][crate::PipelineBuilder].  Stage methods may
/// be called individually (each checks that its prerequisites have run) or
/// all at once with [`run`](Self::run).  Re-running a stage discards the
/// results of every later stage.
pub struct DemandPipeline {
    pub(crate) config: DemandConfig,
    pub(crate) purpose: TripPurpose,
    pub(crate) source: ZoneSource,
    pub(crate) rate_table: Option<TripRateTable>,
    pub(crate) overrides: Vec<AccessibilityRecord>,

    pub nodes: Vec<Node>,
    pub pois: Vec<Poi>,
    pub zones: ZoneSet,
    pub matrix: Option<OdMatrix>,
    pub agents: Vec<Agent>,
    pub diagnostics: Diagnostics,

    done: BTreeSet<Stage>,
}

impl DemandPipeline {
    pub(crate) fn new(
        config: DemandConfig,
        purpose: TripPurpose,
        source: ZoneSource,
        nodes: Vec<Node>,
        pois: Vec<Poi>,
    ) -> Self {
        Self {
            config,
            purpose,
            source,
            rate_table: None,
            overrides: Vec::new(),
            nodes,
            pois,
            zones: ZoneSet::default(),
            matrix: None,
            agents: Vec::new(),
            diagnostics: Diagnostics::default(),
            done: BTreeSet::new(),
        }
    }

    pub fn config(&self) -> &DemandConfig {
        &self.config
    }

    pub fn zone_source(&self) -> &ZoneSource {
        &self.source
    }

    pub fn is_done(&self, stage: Stage) -> bool {
        self.done.contains(&stage)
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Run every stage in order.
    ///
    /// With the `parallel` feature the stages execute inside a Rayon pool
    /// of `config.num_threads` workers.
    pub fn run<O: PipelineObserver>(&mut self, observer: &mut O) -> PipelineResult<()> {
        #[cfg(feature = "parallel")]
        {
            let mut builder = rayon::ThreadPoolBuilder::new();
            if let Some(n) = self.config.num_threads {
                builder = builder.num_threads(n);
            }
            let pool = builder.build().map_err(|e| PipelineError::ThreadPool(e.to_string()))?;
            log::debug!("worker pool: {} threads", pool.current_num_threads());
            pool.install(|| self.run_stages(observer))
        }

        #[cfg(not(feature = "parallel"))]
        {
            if self.config.num_threads.is_some_and(|n| n > 1) {
                log::debug!("num_threads ignored: built without the `parallel` feature");
            }
            self.run_stages(observer)
        }
    }

    fn run_stages<O: PipelineObserver>(&mut self, observer: &mut O) -> PipelineResult<()> {
        for stage in Stage::ALL {
            observer.on_stage_start(stage);
            self.run_stage(stage)?;
            observer.on_stage_end(stage, &self.diagnostics);
        }
        observer.on_pipeline_end(&self.diagnostics);
        Ok(())
    }

    /// Run a single stage by name.
    pub fn run_stage(&mut self, stage: Stage) -> PipelineResult<()> {
        match stage {
            Stage::Zoning => self.build_zones(),
            Stage::Sync => self.sync_geometry(),
            Stage::TripRates => self.generate_trip_rates(),
            Stage::NodeRates => self.assign_node_rates(),
            Stage::Aggregate => self.aggregate_zones(),
            Stage::Distance => self.compute_distances(),
            Stage::Gravity => self.run_gravity(),
            Stage::Agents => self.sample_agents(),
        }
    }

    /// Write every result table.  Tables of stages that have not run are
    /// skipped.
    pub fn write<W: OutputWriter>(&self, writer: &mut W) -> PipelineResult<()> {
        writer.write_nodes(&self.nodes)?;
        writer.write_pois(&self.pois)?;
        if self.is_done(Stage::Zoning) {
            writer.write_zones(&self.zones)?;
        }
        if let Some(matrix) = &self.matrix {
            writer.write_od_distances(matrix)?;
            if self.is_done(Stage::Gravity) {
                writer.write_demand(matrix)?;
            }
        }
        if self.is_done(Stage::Agents) {
            writer.write_agents(&self.agents)?;
        }
        writer.finish()?;
        Ok(())
    }

    // ── Stage bookkeeping ─────────────────────────────────────────────────

    fn require(&self, stage: Stage, needs: &[Stage]) -> PipelineResult<()> {
        match needs.iter().find(|s| !self.done.contains(s)) {
            Some(&missing) => Err(PipelineError::StageOrder { stage, needs: missing }),
            None => Ok(()),
        }
    }

    /// Mark `stage` complete and forget everything downstream of it.
    fn complete(&mut self, stage: Stage) {
        self.done.retain(|s| *s < stage);
        self.done.insert(stage);
    }

    // ── Stages ────────────────────────────────────────────────────────────

    pub fn build_zones(&mut self) -> PipelineResult<()> {
        self.zones = match &self.source {
            ZoneSource::Grid { spec, gates } => GridBuilder::new(*spec).gates(*gates).build(&self.nodes)?,
            ZoneSource::Records(records) => zones_from_records(records.clone())?,
            ZoneSource::NodeZoneIds => zones_from_node_ids(&self.nodes)?,
        };
        self.matrix = None;
        self.agents.clear();

        self.diagnostics.zones = self.zones.len();
        self.diagnostics.gates = self.zones.gate_count();
        log::info!("{} zones ({} gates)", self.zones.len(), self.zones.gate_count());
        self.complete(Stage::Zoning);
        Ok(())
    }

    pub fn sync_geometry(&mut self) -> PipelineResult<()> {
        self.require(Stage::Sync, &[Stage::Zoning])?;
        let report = GeometrySynchronizer::new()
            .honor_preassigned(self.config.use_zone_id)
            .sync(&mut self.zones, &mut self.nodes, &mut self.pois);

        let d = &mut self.diagnostics;
        d.nodes_unassigned = report.nodes_unassigned;
        d.pois_unassigned = report.pois_unassigned;
        d.nodes_preassigned = report.nodes_preassigned;
        d.nodes_to_gates = report.nodes_to_gates;
        self.complete(Stage::Sync);
        Ok(())
    }

    pub fn generate_trip_rates(&mut self) -> PipelineResult<()> {
        let generator = match &self.rate_table {
            Some(table) => TripRateGenerator::with_table(table.clone(), self.purpose),
            None => TripRateGenerator::with_defaults(self.purpose),
        };
        let report = generator.apply(&mut self.pois);

        self.diagnostics.production_rates_unmatched = report.production_unmatched;
        self.diagnostics.attraction_rates_unmatched = report.attraction_unmatched;
        self.complete(Stage::TripRates);
        Ok(())
    }

    pub fn assign_node_rates(&mut self) -> PipelineResult<()> {
        self.require(Stage::NodeRates, &[Stage::TripRates])?;
        assign_node_rates(&mut self.nodes, &self.pois, &self.config.node_rates);
        self.complete(Stage::NodeRates);
        Ok(())
    }

    pub fn aggregate_zones(&mut self) -> PipelineResult<()> {
        self.require(Stage::Aggregate, &[Stage::Sync, Stage::NodeRates])?;
        let report = ZoneAggregator::new().aggregate(&mut self.zones, &self.nodes, &self.pois);

        self.diagnostics.total_production = report.total_production;
        self.diagnostics.total_attraction = report.total_attraction;
        self.complete(Stage::Aggregate);
        Ok(())
    }

    pub fn compute_distances(&mut self) -> PipelineResult<()> {
        self.require(Stage::Distance, &[Stage::Zoning])?;
        let mut matrix = DistanceMatrixBuilder::new(self.config.distance_unit).build(&self.zones)?;
        let overridden = if self.overrides.is_empty() { 0 } else { matrix.apply_overrides(&self.overrides)? };

        self.diagnostics.od_distances_overridden = overridden;
        self.matrix = Some(matrix);
        self.complete(Stage::Distance);
        Ok(())
    }

    pub fn run_gravity(&mut self) -> PipelineResult<()> {
        self.require(Stage::Gravity, &[Stage::Aggregate, Stage::Distance])?;
        let model = GravityModel::new(self.config.friction()?);
        let matrix = self
            .matrix
            .as_mut()
            .ok_or(PipelineError::StageOrder { stage: Stage::Gravity, needs: Stage::Distance })?;
        let report = model.distribute(&self.zones, matrix);

        self.diagnostics.total_volume = report.total_volume;
        self.diagnostics.origins_without_destinations = report.origins_without_destinations;
        self.complete(Stage::Gravity);
        Ok(())
    }

    pub fn sample_agents(&mut self) -> PipelineResult<()> {
        self.require(Stage::Agents, &[Stage::Gravity])?;
        let matrix = self
            .matrix
            .as_ref()
            .ok_or(PipelineError::StageOrder { stage: Stage::Agents, needs: Stage::Distance })?;
        let (agents, report) = AgentSampler::new(self.config.seed)
            .window(self.config.departure.clone())
            .mode(self.config.mode)
            .sample(matrix, &self.zones, &self.nodes)?;

        self.diagnostics.od_pairs_skipped = report.pairs_skipped;
        self.diagnostics.agents_skipped = report.agents_skipped;
        self.diagnostics.total_agents = agents.len();
        self.agents = agents;
        self.complete(Stage::Agents);
        Ok(())
    }
}
