//! Externally supplied zones.
//!
//! Two sources are supported:
//!
//! - a zone table (TAZ file), where every row carries either a polygon
//!   `geometry` or a centroid (`x_coord`/`y_coord`, or a `POINT` geometry);
//! - the nodes themselves, when they carry a pre-assigned `zone_id`.

use std::collections::BTreeMap;

use gd_core::wkt::Geometry;
use gd_core::{ExtraFields, Node, Point, ZoneId};

use crate::{Zone, ZoneError, ZoneKind, ZoneResult, ZoneSet};

/// Two centroids closer than this (in coordinate units) are the same point.
const CENTROID_TOLERANCE: f64 = 1e-9;

/// One row of an external zone table.
#[derive(Clone, Debug, PartialEq)]
pub struct ZoneRecord {
    pub id: ZoneId,
    pub name: Option<String>,
    /// Parsed `geometry` column.
    pub geometry: Option<Geometry>,
    /// `x_coord`/`y_coord` columns.
    pub centroid: Option<Point>,
    pub extra: ExtraFields,
}

/// How a single record defines its zone.
enum Footprint {
    Polygon,
    Point(Point),
}

fn footprint(rec: &ZoneRecord) -> ZoneResult<Footprint> {
    match (&rec.geometry, rec.centroid) {
        (Some(Geometry::Polygon(_)), Some(_)) => Err(ZoneError::ConflictingZoneFields(rec.id)),
        (Some(Geometry::Polygon(_)), None) => Ok(Footprint::Polygon),
        (Some(Geometry::Point(p)), Some(c)) => {
            if p.planar_distance_2(c).sqrt() <= CENTROID_TOLERANCE {
                Ok(Footprint::Point(*p))
            } else {
                Err(ZoneError::ConflictingZoneFields(rec.id))
            }
        }
        (Some(Geometry::Point(p)), None) => Ok(Footprint::Point(*p)),
        (None, Some(c)) => Ok(Footprint::Point(c)),
        (None, None) => Err(ZoneError::NoZoneFields(rec.id)),
    }
}

/// Build zones from an external table, preserving row order.
///
/// All rows must agree: either every row is a polygon zone, or every row is
/// a centroid zone.  A mix is [`ZoneError::ConflictingZoneFields`], naming
/// the first row that disagrees with the first row.
pub fn zones_from_records(records: Vec<ZoneRecord>) -> ZoneResult<ZoneSet> {
    if records.is_empty() {
        return Err(ZoneError::EmptyZoneTable);
    }

    let mut polygon_mode = None;
    let mut zones = Vec::with_capacity(records.len());

    for rec in records {
        let fp = footprint(&rec)?;
        let is_polygon = matches!(fp, Footprint::Polygon);
        match polygon_mode {
            None => polygon_mode = Some(is_polygon),
            Some(mode) if mode != is_polygon => {
                return Err(ZoneError::ConflictingZoneFields(rec.id));
            }
            Some(_) => {}
        }

        let name = rec.name.unwrap_or_else(|| rec.id.raw().to_string());
        let zone = match (fp, rec.geometry) {
            (Footprint::Polygon, Some(Geometry::Polygon(poly))) => {
                Zone::from_polygon(rec.id, name, ZoneKind::External, poly)?
            }
            (Footprint::Point(p), _) => Zone::from_centroid(rec.id, name, ZoneKind::External, p),
            (Footprint::Polygon, _) => return Err(ZoneError::NoZoneFields(rec.id)),
        };
        zones.push(zone);
    }

    let set = ZoneSet::new(zones)?;
    log::debug!(
        "{} external zones ({})",
        set.len(),
        if set.has_polygons() { "polygons" } else { "centroids" }
    );
    Ok(set)
}

/// One centroid zone per distinct pre-assigned node `zone_id`, in ascending
/// id order, placed at the first such node's coordinates.
///
/// Returns an empty set when no node carries a zone id.
pub fn zones_from_node_ids(nodes: &[Node]) -> ZoneResult<ZoneSet> {
    let mut first_seen: BTreeMap<ZoneId, Point> = BTreeMap::new();
    for node in nodes {
        if let Some(z) = node.preassigned_zone {
            first_seen.entry(z).or_insert(node.point);
        }
    }
    let zones = first_seen
        .into_iter()
        .map(|(id, p)| Zone::from_centroid(id, id.raw().to_string(), ZoneKind::External, p))
        .collect();
    ZoneSet::new(zones)
}
