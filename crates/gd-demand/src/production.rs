//! Node-level production and attraction.

use std::collections::HashMap;

use gd_core::{ActivityType, Node, Poi, PoiId};

/// Fixed per-node rates by activity class.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NodeRates {
    pub residential_production: f64,
    pub residential_attraction: f64,
    /// Boundary nodes stand in for all traffic crossing the study-area edge.
    pub boundary_production: f64,
    pub boundary_attraction: f64,
    pub other_production: f64,
    pub other_attraction: f64,
}

impl Default for NodeRates {
    fn default() -> Self {
        Self {
            residential_production: 10.0,
            residential_attraction: 10.0,
            boundary_production: 1_000.0,
            boundary_attraction: 1_000.0,
            other_production: 50.0,
            other_attraction: 50.0,
        }
    }
}

/// Set `production`/`attraction` on every node.
///
/// Boundary nodes (flag or activity) get the boundary rates, residential
/// nodes the residential rates, POI nodes the contribution of their POI
/// (`rate × area / 1000`, zero if the POI is unknown) and everything else the
/// "other" rates.
pub fn assign_node_rates(nodes: &mut [Node], pois: &[Poi], rates: &NodeRates) {
    let by_id: HashMap<PoiId, &Poi> = pois.iter().map(|p| (p.id, p)).collect();
    let mut orphan_poi_nodes = 0usize;

    for node in nodes.iter_mut() {
        let (production, attraction) = if node.is_boundary() {
            (rates.boundary_production, rates.boundary_attraction)
        } else {
            match node.activity {
                ActivityType::Residential => (rates.residential_production, rates.residential_attraction),
                ActivityType::Poi => match node.poi_id.and_then(|id| by_id.get(&id)) {
                    Some(poi) => (poi.production(), poi.attraction()),
                    None => {
                        orphan_poi_nodes += 1;
                        (0.0, 0.0)
                    }
                },
                ActivityType::Boundary | ActivityType::Other => {
                    (rates.other_production, rates.other_attraction)
                }
            }
        };
        node.production = production;
        node.attraction = attraction;
    }

    if orphan_poi_nodes > 0 {
        log::warn!("{orphan_poi_nodes} POI nodes reference no known POI; their production is 0");
    }
}
