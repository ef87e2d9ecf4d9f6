//! Zone-level production and attraction.

use std::collections::HashMap;

use gd_core::{ActivityType, Node, NodeId, Poi, PoiId};
use gd_zone::ZoneSet;

/// Totals from one aggregation pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AggregateReport {
    pub total_production: f64,
    pub total_attraction: f64,
    /// Zones that ended up with no production and no attraction.
    pub empty_zones: usize,
}

/// Sums member production/attraction into each zone.
///
/// Only residential and boundary nodes contribute directly; POI nodes are
/// counted through their POI so a footprint is never counted twice.
/// Entities with no zone contribute nothing.
#[derive(Clone, Debug, Default)]
pub struct ZoneAggregator;

impl ZoneAggregator {
    pub fn new() -> Self {
        Self
    }

    pub fn aggregate(&self, zones: &mut ZoneSet, nodes: &[Node], pois: &[Poi]) -> AggregateReport {
        let nodes_by_id: HashMap<NodeId, &Node> = nodes.iter().map(|n| (n.id, n)).collect();
        let pois_by_id: HashMap<PoiId, &Poi> = pois.iter().map(|p| (p.id, p)).collect();

        let mut report = AggregateReport::default();
        for zone in zones.iter_mut() {
            let (mut production, mut attraction) = (0.0, 0.0);

            for node in zone.node_ids.iter().filter_map(|id| nodes_by_id.get(id)) {
                if node.is_boundary() || node.activity == ActivityType::Residential {
                    production += node.production;
                    attraction += node.attraction;
                }
            }
            for poi in zone.poi_ids.iter().filter_map(|id| pois_by_id.get(id)) {
                production += poi.production();
                attraction += poi.attraction();
            }

            zone.production = production;
            zone.attraction = attraction;
            report.total_production += production;
            report.total_attraction += attraction;
            if production == 0.0 && attraction == 0.0 {
                report.empty_zones += 1;
            }
        }

        log::info!(
            "zone totals: production {:.2}, attraction {:.2} ({} empty zones)",
            report.total_production,
            report.total_attraction,
            report.empty_zones
        );
        report
    }
}
