//! Agent sampling.
//!
//! OD pairs are visited in matrix order.  A pair with volume `v > 0` yields
//! `ceil(v)` agents, each with an origin and destination node drawn
//! uniformly from the member nodes of its zones and a departure time drawn
//! from the window.  All draws come from one RNG seeded from the configured
//! seed, so a fixed seed reproduces the agent table exactly.

use std::collections::HashMap;

use gd_core::{AgentId, DemandRng, DepartureWindow, LineString, Node, NodeId, Point, TravelMode};
use gd_od::OdMatrix;
use gd_zone::ZoneSet;

use crate::{Agent, AgentError, AgentResult};

/// Counts from one sampling pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SampleReport {
    pub pairs_with_volume: usize,
    /// Pairs whose origin or destination zone has no member nodes.
    pub pairs_skipped: usize,
    /// Agents those skipped pairs would have produced.
    pub agents_skipped: usize,
    pub agents: usize,
}

/// Draws [`Agent`]s from an OD volume matrix.
#[derive(Clone, Debug)]
pub struct AgentSampler {
    window: DepartureWindow,
    mode: TravelMode,
    seed: u64,
}

impl AgentSampler {
    pub fn new(seed: u64) -> Self {
        Self { window: DepartureWindow::default(), mode: TravelMode::default(), seed }
    }

    pub fn window(mut self, window: DepartureWindow) -> Self {
        self.window = window;
        self
    }

    pub fn mode(mut self, mode: TravelMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sample agents for every pair with positive volume.
    ///
    /// `zones` supplies the member-node lists (after synchronisation) and
    /// `nodes` their coordinates.
    pub fn sample(&self, matrix: &OdMatrix, zones: &ZoneSet, nodes: &[Node]) -> AgentResult<(Vec<Agent>, SampleReport)> {
        if self.window.min_minute > self.window.max_minute {
            return Err(AgentError::EmptyWindow { min: self.window.min_minute, max: self.window.max_minute });
        }

        let coords: HashMap<NodeId, Point> = nodes.iter().map(|n| (n.id, n.point)).collect();
        let members = |id| zones.get(id).map_or(&[][..], |z| z.node_ids.as_slice());
        let point_of = |zone, node: NodeId| {
            coords
                .get(&node)
                .copied()
                .ok_or(AgentError::UnknownMemberNode { zone, node })
        };

        let mut rng = DemandRng::new(self.seed);
        let mut agents = Vec::new();
        let mut report = SampleReport::default();

        for rec in matrix.iter().filter(|r| r.volume > 0.0) {
            report.pairs_with_volume += 1;
            let count = rec.volume.ceil() as usize;

            let (o_members, d_members) = (members(rec.o_zone_id), members(rec.d_zone_id));
            if o_members.is_empty() || d_members.is_empty() {
                report.pairs_skipped += 1;
                report.agents_skipped += count;
                continue;
            }

            for _ in 0..count {
                // Both lists are non-empty, so `choose` always yields.
                let (Some(&o_node), Some(&d_node)) = (rng.choose(o_members), rng.choose(d_members)) else {
                    continue;
                };
                let geometry = LineString::segment(point_of(rec.o_zone_id, o_node)?, point_of(rec.d_zone_id, d_node)?);
                agents.push(Agent {
                    id: AgentId(agents.len() as u64 + 1),
                    mode: self.mode,
                    o_zone_id: rec.o_zone_id,
                    d_zone_id: rec.d_zone_id,
                    o_node_id: o_node,
                    d_node_id: d_node,
                    geometry,
                    departure_time: self.window.sample(&mut rng),
                });
            }
        }

        report.agents = agents.len();
        if report.pairs_skipped > 0 {
            log::warn!(
                "{} OD pairs ({} agents) skipped: origin or destination zone has no member nodes",
                report.pairs_skipped,
                report.agents_skipped
            );
        }
        log::info!("sampled {} agents from {} OD pairs", report.agents, report.pairs_with_volume);
        Ok((agents, report))
    }
}
