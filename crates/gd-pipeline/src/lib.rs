//! `gd-pipeline`: end-to-end travel-demand synthesis.
//!
//! # Stages
//!
//! ```text
//!   ① Zoning       grid cells + gates, external TAZ table, or node zone_id
//!   ② Sync         assign every node and POI to at most one zone
//!   ③ TripRates    POI production/attraction rates for the trip purpose
//!   ④ NodeRates    node production/attraction by activity class
//!   ⑤ Aggregate    zone production/attraction totals
//!   ⑥ Distance     zone-to-zone distance matrix (+ accessibility overrides)
//!   ⑦ Gravity      OD volumes
//!   ⑧ Agents       one agent per unit of (ceiled) OD volume
//! ```
//!
//! Each stage is a method on [`DemandPipeline`] and refuses to run before the
//! stages it depends on.  [`DemandPipeline::run`] runs them all in order and
//! reports progress to a [`PipelineObserver`].
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                        |
//! |------------|---------------------------------------------------------------|
//! | `parallel` | Map steps run on a Rayon pool of `config.num_threads` workers. |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use gd_io::InputFiles;
//! use gd_pipeline::{DemandConfig, LogObserver, PipelineBuilder};
//!
//! let config = DemandConfig::load(Path::new("grid2demand.toml"))?;
//! let files = InputFiles::discover(Path::new("./data"))?;
//! let mut pipeline = PipelineBuilder::from_inputs(config, &files)?.build()?;
//! pipeline.run(&mut LogObserver::default())?;
//! ```

pub mod builder;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod observer;
pub mod pipeline;

#[cfg(test)]
mod tests;

pub use builder::PipelineBuilder;
pub use config::{DemandConfig, ZoningOptions};
pub use diagnostics::Diagnostics;
pub use error::{PipelineError, PipelineResult};
pub use observer::{LogObserver, NoopObserver, PipelineObserver, Stage};
pub use pipeline::{DemandPipeline, ZoneSource};
