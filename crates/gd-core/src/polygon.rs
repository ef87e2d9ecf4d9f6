//! Area geometry for zones and POI footprints.
//!
//! `Polygon` wraps a `geo::MultiPolygon<f64>` so that single polygons and
//! multi-part TAZ boundaries share one type.  The predicates themselves come
//! from `geo`; this module only adapts them to the workspace's `Point` and
//! `Bounds` types.

use ::geo::{Area, BoundingRect, Centroid, Intersects, MapCoords};

use crate::{Bounds, DistanceUnit, GdError, GdResult, Point};

/// A (multi-)polygon in the same coordinate space as nodes and POIs.
#[derive(Clone, Debug, PartialEq)]
pub struct Polygon {
    inner: ::geo::MultiPolygon<f64>,
}

impl Polygon {
    /// Build from one exterior ring and any number of holes.
    ///
    /// Rings need not be explicitly closed.  Fewer than three distinct
    /// vertices is an error.
    pub fn new(exterior: Vec<Point>, holes: Vec<Vec<Point>>) -> GdResult<Self> {
        Self::from_parts(vec![(exterior, holes)])
    }

    /// Build a multi-part polygon; each part is `(exterior, holes)`.
    pub fn from_parts(parts: Vec<(Vec<Point>, Vec<Vec<Point>>)>) -> GdResult<Self> {
        if parts.is_empty() {
            return Err(GdError::DegeneratePolygon("no parts".into()));
        }
        let mut polys = Vec::with_capacity(parts.len());
        for (exterior, holes) in parts {
            if exterior.len() < 3 {
                return Err(GdError::DegeneratePolygon(format!(
                    "exterior ring has {} vertices, need at least 3",
                    exterior.len()
                )));
            }
            let ring = |pts: Vec<Point>| -> ::geo::LineString<f64> {
                pts.into_iter().map(::geo::Coord::from).collect()
            };
            polys.push(::geo::Polygon::new(
                ring(exterior),
                holes.into_iter().map(ring).collect(),
            ));
        }
        Ok(Self { inner: ::geo::MultiPolygon(polys) })
    }

    /// Axis-aligned rectangle covering `b`, wound counter-clockwise from the
    /// lower-left corner.
    pub fn rectangle(b: Bounds) -> Self {
        let rect = ::geo::Rect::new(
            ::geo::coord! { x: b.x_min, y: b.y_min },
            ::geo::coord! { x: b.x_max, y: b.y_max },
        );
        Self { inner: ::geo::MultiPolygon(vec![rect.to_polygon()]) }
    }

    /// `true` if `p` lies inside or on the boundary.
    ///
    /// Boundary points count as contained so that an entity sitting exactly
    /// on a shared edge still matches one of the adjacent zones.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.inner.intersects(&::geo::Point::new(p.x, p.y))
    }

    /// Area-weighted centroid; `None` only for zero-area input.
    pub fn centroid(&self) -> Option<Point> {
        self.inner.centroid().map(Point::from)
    }

    pub fn bounds(&self) -> Option<Bounds> {
        self.inner.bounding_rect().map(|r| Bounds {
            x_min: r.min().x,
            x_max: r.max().x,
            y_min: r.min().y,
            y_max: r.max().y,
        })
    }

    /// Planar area in coordinate units squared.
    pub fn planar_area(&self) -> f64 {
        self.inner.unsigned_area()
    }

    /// Area in square `unit`s for lon/lat input.
    ///
    /// Vertices are projected onto a local equirectangular plane centred on
    /// the polygon's centroid before the planar area is taken, which is
    /// accurate for building-scale footprints.
    pub fn projected_area(&self, unit: DistanceUnit) -> f64 {
        let Some(origin) = self.centroid() else {
            return 0.0;
        };
        let k = unit.earth_radius() * std::f64::consts::PI / 180.0;
        let cos_lat = origin.y.to_radians().cos();
        self.inner
            .map_coords(|c| ::geo::coord! {
                x: (c.x - origin.x) * cos_lat * k,
                y: (c.y - origin.y) * k,
            })
            .unsigned_area()
    }

    /// Parts as `(exterior, holes)` vertex lists, for WKT output.
    pub fn parts(&self) -> Vec<(Vec<Point>, Vec<Vec<Point>>)> {
        let ring = |ls: &::geo::LineString<f64>| -> Vec<Point> {
            ls.coords().map(|c| Point::new(c.x, c.y)).collect()
        };
        self.inner
            .0
            .iter()
            .map(|p| (ring(p.exterior()), p.interiors().iter().map(&ring).collect()))
            .collect()
    }
}
