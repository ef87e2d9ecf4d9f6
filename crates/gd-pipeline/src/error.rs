use std::path::PathBuf;

use thiserror::Error;

use gd_agent::AgentError;
use gd_core::GdError;
use gd_demand::DemandError;
use gd_io::LoadError;
use gd_od::OdError;
use gd_output::OutputError;
use gd_zone::ZoneError;

use crate::Stage;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("cannot read config {}: {source}", path.display())]
    ConfigIo { path: PathBuf, source: std::io::Error },

    #[error("invalid TOML config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("stage {stage} needs {needs} to run first")]
    StageOrder { stage: Stage, needs: Stage },

    #[error("cannot build worker pool: {0}")]
    ThreadPool(String),

    #[error(transparent)]
    Core(#[from] GdError),

    #[error(transparent)]
    Zone(#[from] ZoneError),

    #[error(transparent)]
    Demand(#[from] DemandError),

    #[error(transparent)]
    Od(#[from] OdError),

    #[error(transparent)]
    Agent(#[from] AgentError),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Output(#[from] OutputError),
}

pub type PipelineResult<T> = Result<T, PipelineError>;
