//! Zone records and the ordered zone table.
//!
//! # Ordering
//!
//! `ZoneSet` is a `Vec<Zone>` plus an id → position map.  Iteration order is
//! the construction order (row-major cells, then gates, for a grid; file
//! order for TAZ tables) and is part of the contract: OD matrices, output
//! tables and "first containing zone wins" matching all follow it.

use std::collections::BTreeMap;

use gd_core::{Bounds, NodeId, PoiId, Point, Polygon, ZoneId};

use crate::{ZoneError, ZoneResult};

// ── Zone ──────────────────────────────────────────────────────────────────────

/// What role a zone plays in the model.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ZoneKind {
    /// A rectangular grid cell.
    Cell,
    /// A degenerate point zone outside the grid hosting boundary nodes.
    Gate,
    /// An externally supplied zone (TAZ file or node `zone_id`).
    External,
}

impl ZoneKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ZoneKind::Cell => "cell",
            ZoneKind::Gate => "gate",
            ZoneKind::External => "external",
        }
    }
}

/// Spatial footprint of a zone.
#[derive(Clone, Debug, PartialEq)]
pub enum ZoneShape {
    Area(Polygon),
    /// A bare centroid; entities are matched by proximity.
    Centroid,
}

/// An analysis zone.
#[derive(Clone, Debug, PartialEq)]
pub struct Zone {
    pub id: ZoneId,
    pub name: String,
    pub kind: ZoneKind,
    pub shape: ZoneShape,
    pub centroid: Point,
    pub bounds: Bounds,

    /// Member nodes, in entity order.  Filled by the synchroniser.
    pub node_ids: Vec<NodeId>,
    /// Member POIs, in entity order.  Filled by the synchroniser.
    pub poi_ids: Vec<PoiId>,

    pub production: f64,
    pub attraction: f64,
}

impl Zone {
    /// A zone covering `polygon`.  Centroid and bounds are derived from it.
    pub fn from_polygon(id: ZoneId, name: String, kind: ZoneKind, polygon: Polygon) -> ZoneResult<Self> {
        let bounds = polygon.bounds().ok_or(ZoneError::NoZoneFields(id))?;
        let centroid = polygon.centroid().unwrap_or_else(|| bounds.center());
        Ok(Self {
            id,
            name,
            kind,
            shape: ZoneShape::Area(polygon),
            centroid,
            bounds,
            node_ids: Vec::new(),
            poi_ids: Vec::new(),
            production: 0.0,
            attraction: 0.0,
        })
    }

    /// A point-like zone at `centroid`.
    pub fn from_centroid(id: ZoneId, name: String, kind: ZoneKind, centroid: Point) -> Self {
        Self {
            id,
            name,
            kind,
            shape: ZoneShape::Centroid,
            centroid,
            bounds: Bounds::from_point(centroid),
            node_ids: Vec::new(),
            poi_ids: Vec::new(),
            production: 0.0,
            attraction: 0.0,
        }
    }

    #[inline]
    pub fn polygon(&self) -> Option<&Polygon> {
        match &self.shape {
            ZoneShape::Area(p) => Some(p),
            ZoneShape::Centroid => None,
        }
    }

    #[inline]
    pub fn is_gate(&self) -> bool {
        self.kind == ZoneKind::Gate
    }

    /// Drop memberships and aggregates; geometry is untouched.
    pub fn clear_members(&mut self) {
        self.node_ids.clear();
        self.poi_ids.clear();
        self.production = 0.0;
        self.attraction = 0.0;
    }
}

// ── ZoneSet ───────────────────────────────────────────────────────────────────

/// Ordered, id-indexed zone table.
#[derive(Clone, Debug, Default)]
pub struct ZoneSet {
    zones: Vec<Zone>,
    index: BTreeMap<ZoneId, usize>,
}

impl ZoneSet {
    /// Build from zones in their final order.  Duplicate ids are rejected.
    pub fn new(zones: Vec<Zone>) -> ZoneResult<Self> {
        let mut index = BTreeMap::new();
        for (i, z) in zones.iter().enumerate() {
            if index.insert(z.id, i).is_some() {
                return Err(ZoneError::DuplicateZone(z.id));
            }
        }
        Ok(Self { zones, index })
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Zone> {
        self.zones.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Zone> {
        self.zones.iter_mut()
    }

    pub fn as_slice(&self) -> &[Zone] {
        &self.zones
    }

    #[inline]
    pub fn contains(&self, id: ZoneId) -> bool {
        self.index.contains_key(&id)
    }

    /// Position of `id` in iteration order.
    #[inline]
    pub fn position(&self, id: ZoneId) -> Option<usize> {
        self.index.get(&id).copied()
    }

    pub fn get(&self, id: ZoneId) -> Option<&Zone> {
        self.position(id).map(|i| &self.zones[i])
    }

    pub fn get_mut(&mut self, id: ZoneId) -> Option<&mut Zone> {
        self.position(id).map(move |i| &mut self.zones[i])
    }

    /// `true` if any zone is matched by containment rather than proximity.
    pub fn has_polygons(&self) -> bool {
        self.zones.iter().any(|z| z.polygon().is_some())
    }

    pub fn gate_count(&self) -> usize {
        self.zones.iter().filter(|z| z.is_gate()).count()
    }

    pub fn clear_members(&mut self) {
        self.zones.iter_mut().for_each(Zone::clear_members);
    }
}

impl<'a> IntoIterator for &'a ZoneSet {
    type Item = &'a Zone;
    type IntoIter = std::slice::Iter<'a, Zone>;

    fn into_iter(self) -> Self::IntoIter {
        self.zones.iter()
    }
}
