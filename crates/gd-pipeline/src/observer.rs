//! Pipeline observer trait for progress reporting.

use std::fmt;
use std::time::Instant;

use crate::Diagnostics;

/// One step of the pipeline, in execution order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    Zoning,
    Sync,
    TripRates,
    NodeRates,
    Aggregate,
    Distance,
    Gravity,
    Agents,
}

impl Stage {
    pub const ALL: [Stage; 8] = [
        Stage::Zoning,
        Stage::Sync,
        Stage::TripRates,
        Stage::NodeRates,
        Stage::Aggregate,
        Stage::Distance,
        Stage::Gravity,
        Stage::Agents,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Stage::Zoning => "zoning",
            Stage::Sync => "sync",
            Stage::TripRates => "trip-rates",
            Stage::NodeRates => "node-rates",
            Stage::Aggregate => "aggregate",
            Stage::Distance => "distance",
            Stage::Gravity => "gravity",
            Stage::Agents => "agents",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Callbacks invoked by [`DemandPipeline::run`][crate::DemandPipeline::run].
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
pub trait PipelineObserver: Send {
    fn on_stage_start(&mut self, _stage: Stage) {}

    /// `diagnostics` includes the counters the stage just filled.
    fn on_stage_end(&mut self, _stage: Stage, _diagnostics: &Diagnostics) {}

    fn on_pipeline_end(&mut self, _diagnostics: &Diagnostics) {}
}

/// A [`PipelineObserver`] that does nothing.
pub struct NoopObserver;

impl PipelineObserver for NoopObserver {}

/// Logs each stage with its wall-clock time, and the diagnostics at the end.
#[derive(Default)]
pub struct LogObserver {
    started: Option<Instant>,
}

impl PipelineObserver for LogObserver {
    fn on_stage_start(&mut self, stage: Stage) {
        log::info!("{stage}: start");
        self.started = Some(Instant::now());
    }

    fn on_stage_end(&mut self, stage: Stage, _diagnostics: &Diagnostics) {
        let ms = self.started.take().map_or(0, |t| t.elapsed().as_millis());
        log::info!("{stage}: done in {ms} ms");
    }

    fn on_pipeline_end(&mut self, diagnostics: &Diagnostics) {
        for line in diagnostics.to_string().lines() {
            log::info!("{line}");
        }
        if diagnostics.has_gaps() {
            log::warn!("run finished with data-quality gaps; see counts above");
        }
    }
}
