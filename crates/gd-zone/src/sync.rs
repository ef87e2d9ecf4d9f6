//! Node/POI → zone synchronisation.
//!
//! # Map, then reduce
//!
//! 1. **Map** (optionally parallel): every entity is located independently
//!    against a read-only [`ZoneIndex`]; each worker returns
//!    `Option<ZoneId>` for its entity and touches nothing else.
//! 2. **Reduce** (sequential, controller only): results are applied in
//!    entity order: the entity's `zone_id` is set and its id is appended to
//!    the zone's member list.
//!
//! Because only the reduce step mutates, no locks are needed, and member
//! lists come out in input order whether or not the map step ran in
//! parallel.
//!
//! # Matching rules
//!
//! - Boundary nodes go to the nearest gate when the zone set has gates.
//! - With the pre-assigned option on, a node whose input `zone_id` names an
//!   existing zone keeps it.
//! - Polygon zones: the first zone (in `ZoneSet` order) whose polygon
//!   contains the point, boundary included.  No match leaves the entity
//!   unassigned.
//! - Centroid zones: the nearest non-gate centroid.

use std::collections::HashSet;

use rstar::{AABB, PointDistance, RTree, RTreeObject};

use gd_core::{Node, Poi, Point, ZoneId};

use crate::ZoneSet;

// ── R-tree entries ────────────────────────────────────────────────────────────

/// Bounding box of a polygon zone; `pos` is the zone's position in the set.
struct AreaEntry {
    envelope: AABB<[f64; 2]>,
    pos: usize,
}

impl RTreeObject for AreaEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}

/// Centroid of a point-like zone.
struct CentroidEntry {
    point: [f64; 2],
    id: ZoneId,
}

impl RTreeObject for CentroidEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for CentroidEntry {
    /// Squared planar distance in coordinate space.  Only the ranking is used.
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

// ── ZoneIndex ─────────────────────────────────────────────────────────────────

/// Read-only spatial index over a [`ZoneSet`], shared by all workers.
pub struct ZoneIndex<'a> {
    zones: &'a ZoneSet,
    areas: RTree<AreaEntry>,
    centroids: RTree<CentroidEntry>,
    gates: RTree<CentroidEntry>,
}

impl<'a> ZoneIndex<'a> {
    pub fn new(zones: &'a ZoneSet) -> Self {
        let mut areas = Vec::new();
        let mut centroids = Vec::new();
        let mut gates = Vec::new();

        for (pos, z) in zones.iter().enumerate() {
            if z.is_gate() {
                gates.push(CentroidEntry { point: z.centroid.to_array(), id: z.id });
            } else if z.polygon().is_some() {
                areas.push(AreaEntry {
                    envelope: AABB::from_corners(
                        [z.bounds.x_min, z.bounds.y_min],
                        [z.bounds.x_max, z.bounds.y_max],
                    ),
                    pos,
                });
            } else {
                centroids.push(CentroidEntry { point: z.centroid.to_array(), id: z.id });
            }
        }

        Self {
            zones,
            areas: RTree::bulk_load(areas),
            centroids: RTree::bulk_load(centroids),
            gates: RTree::bulk_load(gates),
        }
    }

    /// Zone for an ordinary (non-boundary) point.
    pub fn locate(&self, p: Point) -> Option<ZoneId> {
        if self.areas.size() > 0 {
            let query = AABB::from_point(p.to_array());
            self.areas
                .locate_in_envelope_intersecting(&query)
                .map(|e| e.pos)
                .filter(|&pos| {
                    self.zones.as_slice()[pos]
                        .polygon()
                        .is_some_and(|poly| poly.contains(p))
                })
                .min()
                .map(|pos| self.zones.as_slice()[pos].id)
        } else {
            self.centroids.nearest_neighbor(&p.to_array()).map(|e| e.id)
        }
    }

    /// Nearest gate zone, if the set has any.
    pub fn nearest_gate(&self, p: Point) -> Option<ZoneId> {
        self.gates.nearest_neighbor(&p.to_array()).map(|e| e.id)
    }

    pub fn has_gates(&self) -> bool {
        self.gates.size() > 0
    }
}

// ── GeometrySynchronizer ──────────────────────────────────────────────────────

/// Counts from one synchronisation pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub nodes_assigned: usize,
    pub nodes_unassigned: usize,
    /// Nodes that kept an input `zone_id`.
    pub nodes_preassigned: usize,
    /// Boundary nodes routed to a gate.
    pub nodes_to_gates: usize,
    pub pois_assigned: usize,
    pub pois_unassigned: usize,
}

/// Assigns every node and POI to at most one zone.
#[derive(Clone, Debug, Default)]
pub struct GeometrySynchronizer {
    honor_preassigned: bool,
}

/// How a node was placed; only used for the report.
#[derive(Copy, Clone)]
enum Placement {
    Preassigned(ZoneId),
    Gate(ZoneId),
    Matched(ZoneId),
    Unassigned,
}

impl Placement {
    fn zone(self) -> Option<ZoneId> {
        match self {
            Placement::Preassigned(z) | Placement::Gate(z) | Placement::Matched(z) => Some(z),
            Placement::Unassigned => None,
        }
    }
}

impl GeometrySynchronizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep a node's input `zone_id` when it names a zone in the set.
    pub fn honor_preassigned(mut self, enabled: bool) -> Self {
        self.honor_preassigned = enabled;
        self
    }

    fn place_node(&self, index: &ZoneIndex<'_>, node: &Node) -> Placement {
        if self.honor_preassigned {
            if let Some(z) = node.preassigned_zone.filter(|z| index.zones.contains(*z)) {
                return Placement::Preassigned(z);
            }
        }
        if node.is_boundary() && index.has_gates() {
            return index.nearest_gate(node.point).map_or(Placement::Unassigned, Placement::Gate);
        }
        index.locate(node.point).map_or(Placement::Unassigned, Placement::Matched)
    }

    /// Run the map step for nodes and POIs, then apply the results.
    ///
    /// Existing memberships and zone aggregates are cleared first, so
    /// re-running on the same inputs gives the same result.  Duplicate entity
    /// ids are appended to a zone only once.
    pub fn sync(&self, zones: &mut ZoneSet, nodes: &mut [Node], pois: &mut [Poi]) -> SyncReport {
        // ── Map ───────────────────────────────────────────────────────────
        let (node_hits, poi_hits) = {
            let index = ZoneIndex::new(zones);
            (self.map_nodes(&index, nodes), self.map_pois(&index, pois))
        };

        // ── Reduce ────────────────────────────────────────────────────────
        zones.clear_members();
        let mut report = SyncReport::default();

        let mut seen = HashSet::with_capacity(nodes.len());
        for (node, placement) in nodes.iter_mut().zip(node_hits) {
            match placement {
                Placement::Preassigned(_) => report.nodes_preassigned += 1,
                Placement::Gate(_) => report.nodes_to_gates += 1,
                Placement::Matched(_) | Placement::Unassigned => {}
            }
            node.zone_id = placement.zone();
            match node.zone_id.and_then(|z| zones.get_mut(z)) {
                Some(zone) => {
                    report.nodes_assigned += 1;
                    if seen.insert(node.id) {
                        zone.node_ids.push(node.id);
                    }
                }
                None => report.nodes_unassigned += 1,
            }
        }

        let mut seen = HashSet::with_capacity(pois.len());
        for (poi, hit) in pois.iter_mut().zip(poi_hits) {
            poi.zone_id = hit;
            match hit.and_then(|z| zones.get_mut(z)) {
                Some(zone) => {
                    report.pois_assigned += 1;
                    if seen.insert(poi.id) {
                        zone.poi_ids.push(poi.id);
                    }
                }
                None => report.pois_unassigned += 1,
            }
        }

        if report.nodes_unassigned > 0 || report.pois_unassigned > 0 {
            log::warn!(
                "{} nodes and {} POIs lie outside every zone and stay unassigned",
                report.nodes_unassigned,
                report.pois_unassigned
            );
        }
        log::debug!("{report:?}");
        report
    }

    #[cfg(not(feature = "parallel"))]
    fn map_nodes(&self, index: &ZoneIndex<'_>, nodes: &[Node]) -> Vec<Placement> {
        nodes.iter().map(|n| self.place_node(index, n)).collect()
    }

    #[cfg(feature = "parallel")]
    fn map_nodes(&self, index: &ZoneIndex<'_>, nodes: &[Node]) -> Vec<Placement> {
        use rayon::prelude::*;
        nodes.par_iter().map(|n| self.place_node(index, n)).collect()
    }

    #[cfg(not(feature = "parallel"))]
    fn map_pois(&self, index: &ZoneIndex<'_>, pois: &[Poi]) -> Vec<Option<ZoneId>> {
        pois.iter().map(|p| index.locate(p.centroid)).collect()
    }

    #[cfg(feature = "parallel")]
    fn map_pois(&self, index: &ZoneIndex<'_>, pois: &[Poi]) -> Vec<Option<ZoneId>> {
        use rayon::prelude::*;
        pois.par_iter().map(|p| index.locate(p.centroid)).collect()
    }
}
