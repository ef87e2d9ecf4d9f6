//! Run-level counters for soft data-quality gaps and totals.

use std::fmt;

/// Everything a finished (or partially finished) run reports.
///
/// Counters are filled by the stage that produces them and stay zero until
/// that stage has run.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Diagnostics {
    pub zones: usize,
    pub gates: usize,

    pub nodes_unassigned: usize,
    pub pois_unassigned: usize,
    pub nodes_preassigned: usize,
    pub nodes_to_gates: usize,

    pub production_rates_unmatched: usize,
    pub attraction_rates_unmatched: usize,

    pub od_distances_overridden: usize,
    pub origins_without_destinations: usize,
    pub od_pairs_skipped: usize,
    pub agents_skipped: usize,

    pub total_production: f64,
    pub total_attraction: f64,
    pub total_volume: f64,
    pub total_agents: usize,
}

impl Diagnostics {
    /// `true` if any soft gap was recorded.
    pub fn has_gaps(&self) -> bool {
        self.nodes_unassigned > 0
            || self.pois_unassigned > 0
            || self.production_rates_unmatched > 0
            || self.attraction_rates_unmatched > 0
            || self.origins_without_destinations > 0
            || self.od_pairs_skipped > 0
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "zones:                 {} ({} gates)", self.zones, self.gates)?;
        writeln!(f, "unassigned nodes/POIs: {} / {}", self.nodes_unassigned, self.pois_unassigned)?;
        writeln!(
            f,
            "unmatched rates:       {} production, {} attraction",
            self.production_rates_unmatched, self.attraction_rates_unmatched
        )?;
        writeln!(f, "overridden distances:  {}", self.od_distances_overridden)?;
        writeln!(f, "dead-end origins:      {}", self.origins_without_destinations)?;
        writeln!(f, "skipped OD pairs:      {} ({} agents)", self.od_pairs_skipped, self.agents_skipped)?;
        writeln!(
            f,
            "production/attraction: {:.2} / {:.2}",
            self.total_production, self.total_attraction
        )?;
        write!(f, "volume/agents:         {:.2} / {}", self.total_volume, self.total_agents)
    }
}
