//! The `OutputWriter` trait.

use gd_agent::Agent;
use gd_core::{Node, Poi};
use gd_od::OdMatrix;
use gd_zone::ZoneSet;

use crate::OutputResult;

/// A sink for the pipeline's result tables.  Each table is written once.
pub trait OutputWriter {
    fn write_nodes(&mut self, nodes: &[Node]) -> OutputResult<()>;

    fn write_pois(&mut self, pois: &[Poi]) -> OutputResult<()>;

    fn write_zones(&mut self, zones: &ZoneSet) -> OutputResult<()>;

    /// Distance for every ordered zone pair.
    fn write_od_distances(&mut self, matrix: &OdMatrix) -> OutputResult<()>;

    /// Volume for every pair with non-zero volume.
    fn write_demand(&mut self, matrix: &OdMatrix) -> OutputResult<()>;

    fn write_agents(&mut self, agents: &[Agent]) -> OutputResult<()>;

    /// Flush everything written so far.
    ///
    /// Idempotent: safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
