//! Planar coordinate types and great-circle distance.
//!
//! Coordinates are `f64` `(x, y)` pairs.  When a distance in physical units
//! is needed, `x` is read as longitude and `y` as latitude in degrees, the
//! convention every node/POI/zone table in the workspace follows.

use std::fmt;

use crate::DistanceUnit;

// ── Point ─────────────────────────────────────────────────────────────────────

/// A 2-D coordinate (`x` = longitude, `y` = latitude for geographic input).
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Haversine great-circle distance expressed in `unit`.
    ///
    /// Assumes a spherical Earth; accuracy is well within what a zone-level
    /// gravity model can resolve.
    pub fn distance(self, other: Point, unit: DistanceUnit) -> f64 {
        let d_lat = (other.y - self.y).to_radians();
        let d_lon = (other.x - self.x).to_radians();

        let lat1 = self.y.to_radians();
        let lat2 = other.y.to_radians();

        let a = (d_lat * 0.5).sin().powi(2)
            + lat1.cos() * lat2.cos() * (d_lon * 0.5).sin().powi(2);

        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        unit.earth_radius() * c
    }

    /// Squared planar distance in coordinate space.  Used for nearest-
    /// centroid ranking, where only the ordering matters.
    #[inline]
    pub fn planar_distance_2(self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    #[inline]
    pub fn to_array(self) -> [f64; 2] {
        [self.x, self.y]
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "POINT ({} {})", self.x, self.y)
    }
}

impl From<Point> for ::geo::Coord<f64> {
    fn from(p: Point) -> Self {
        ::geo::coord! { x: p.x, y: p.y }
    }
}

impl From<::geo::Point<f64>> for Point {
    fn from(p: ::geo::Point<f64>) -> Self {
        Point::new(p.x(), p.y())
    }
}

// ── Bounds ────────────────────────────────────────────────────────────────────

/// Axis-aligned bounding box.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Bounds {
    /// A degenerate box around a single point.
    pub fn from_point(p: Point) -> Self {
        Self { x_min: p.x, x_max: p.x, y_min: p.y, y_max: p.y }
    }

    /// Smallest box covering every point; `None` for an empty iterator.
    pub fn covering<I: IntoIterator<Item = Point>>(points: I) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        Some(iter.fold(Bounds::from_point(first), |mut b, p| {
            b.x_min = b.x_min.min(p.x);
            b.x_max = b.x_max.max(p.x);
            b.y_min = b.y_min.min(p.y);
            b.y_max = b.y_max.max(p.y);
            b
        }))
    }

    /// Grow the box by `eps` on every side.
    pub fn expand(self, eps: f64) -> Self {
        Self {
            x_min: self.x_min - eps,
            x_max: self.x_max + eps,
            y_min: self.y_min - eps,
            y_max: self.y_max + eps,
        }
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    #[inline]
    pub fn center(&self) -> Point {
        Point::new((self.x_min + self.x_max) * 0.5, (self.y_min + self.y_max) * 0.5)
    }

    /// Inclusive containment check.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x_min && p.x <= self.x_max && p.y >= self.y_min && p.y <= self.y_max
    }
}

// ── LineString ────────────────────────────────────────────────────────────────

/// A polyline; OD records and agents carry a two-point segment.
#[derive(Clone, Debug, PartialEq)]
pub struct LineString(pub Vec<Point>);

impl LineString {
    /// Straight segment from `a` to `b`.
    pub fn segment(a: Point, b: Point) -> Self {
        LineString(vec![a, b])
    }

    pub fn points(&self) -> &[Point] {
        &self.0
    }
}

impl fmt::Display for LineString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("LINESTRING(")?;
        for (i, p) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{} {}", p.x, p.y)?;
        }
        f.write_str(")")
    }
}
