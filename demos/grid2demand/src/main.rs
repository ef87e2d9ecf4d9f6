//! grid2demand: synthesize zone-to-zone travel demand and individual agents
//! from a node/POI network extract.
//!
//! ```text
//! grid2demand ./data --num-x-blocks 10 --num-y-blocks 10 --seed 42
//! grid2demand ./data --config run.toml --output-dir ./out
//! ```
//!
//! `./data` must contain `node.csv` and `poi.csv`; `zone.csv`,
//! `trip_rate.csv` and `accessibility.csv` are used when present.
//! Command-line options override the config file.  Logging honours
//! `RUST_LOG` (default `info`).

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;

use gd_core::{DistanceUnit, TravelMode};
use gd_io::InputFiles;
use gd_output::CsvWriter;
use gd_pipeline::{DemandConfig, LogObserver, PipelineBuilder};

#[derive(Parser, Debug, Clone)]
#[command(name = "grid2demand", version, about = "Grid-based travel demand synthesis")]
struct Args {
    /// Directory holding node.csv, poi.csv and the optional tables.
    #[arg(default_value = ".")]
    input_dir: PathBuf,

    /// Where to write the result tables (default: <input_dir>/output).
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// TOML run configuration.
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    num_x_blocks: Option<usize>,

    #[arg(long)]
    num_y_blocks: Option<usize>,

    #[arg(long)]
    cell_width: Option<f64>,

    #[arg(long)]
    cell_height: Option<f64>,

    /// Unit of --cell-width/--cell-height: km, meter or mile.
    #[arg(long)]
    unit: Option<DistanceUnit>,

    /// Do not create gate zones around the grid.
    #[arg(long, default_value_t = false)]
    no_gates: bool,

    /// 1 = home-based work, 2 = home-based other, 3 = non-home-based.
    #[arg(long)]
    trip_purpose: Option<u8>,

    /// auto, bike or walk.
    #[arg(long)]
    mode: Option<TravelMode>,

    #[arg(long)]
    seed: Option<u64>,

    /// Worker threads (default: all logical cores).
    #[arg(long)]
    threads: Option<usize>,

    /// Build zones from the zone_id column of node.csv.
    #[arg(long, default_value_t = false)]
    use_zone_id: bool,

    #[arg(long)]
    trip_rate_file: Option<PathBuf>,

    #[arg(long)]
    accessibility_file: Option<PathBuf>,
}

impl Args {
    /// Config file (or defaults) with command-line overrides applied.
    fn demand_config(&self) -> Result<DemandConfig> {
        let mut config = match &self.config {
            Some(path) => DemandConfig::load(path).with_context(|| format!("loading {}", path.display()))?,
            None => DemandConfig::default(),
        };

        let zoning = &mut config.zoning;
        zoning.num_x_blocks = self.num_x_blocks.or(zoning.num_x_blocks);
        zoning.num_y_blocks = self.num_y_blocks.or(zoning.num_y_blocks);
        zoning.cell_width = self.cell_width.or(zoning.cell_width);
        zoning.cell_height = self.cell_height.or(zoning.cell_height);
        if let Some(unit) = self.unit {
            zoning.unit = unit;
        }
        if self.no_gates {
            zoning.gates = false;
        }

        if let Some(p) = self.trip_purpose {
            config.trip_purpose = p;
        }
        if let Some(m) = self.mode {
            config.mode = m;
        }
        if let Some(s) = self.seed {
            config.seed = s;
        }
        config.num_threads = self.threads.or(config.num_threads);
        config.use_zone_id |= self.use_zone_id;
        config.trip_rate_file = self.trip_rate_file.clone().or(config.trip_rate_file);
        config.accessibility_file = self.accessibility_file.clone().or(config.accessibility_file);

        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    let t0 = Instant::now();

    let config = args.demand_config()?;
    let files = InputFiles::discover(&args.input_dir)?;
    log::info!("reading inputs from {}", args.input_dir.display());

    let mut pipeline = PipelineBuilder::from_inputs(config, &files)?.build()?;
    pipeline.run(&mut LogObserver::default())?;

    let mut writer = match &args.output_dir {
        Some(dir) => CsvWriter::new(dir),
        None => CsvWriter::beside_inputs(&args.input_dir),
    }
    .context("creating the output directory")?;
    pipeline.write(&mut writer)?;

    log::info!(
        "{} agents, {:.2} total volume; wrote {} in {:.2}s",
        pipeline.agents.len(),
        pipeline.diagnostics.total_volume,
        writer.dir().display(),
        t0.elapsed().as_secs_f64()
    );
    Ok(())
}
