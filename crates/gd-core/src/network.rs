//! Network entity records: nodes and points of interest.
//!
//! Both records have a fixed core schema plus an open [`ExtraFields`] map
//! carrying any additional input columns verbatim, so downstream writers can
//! pass them through without the core needing to know about them.
//!
//! Mutable fields (`zone_id`, `production`, `attraction`, `trip_rate`) are
//! written only by the pipeline stages that own them: zone synchronisation
//! and trip generation.

use std::collections::BTreeMap;
use std::fmt;

use crate::{NodeId, PoiId, Point, Polygon, ZoneId};

/// Additional named input columns, kept in column-name order.
pub type ExtraFields = BTreeMap<String, String>;

/// POI rates are expressed per this many units of footprint area.
pub const RATE_AREA_BASIS: f64 = 1_000.0;

// ── ActivityType ──────────────────────────────────────────────────────────────

/// Land-use classification of a node (`activity_type` column).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum ActivityType {
    Residential,
    Poi,
    Boundary,
    /// Anything else the network extractor emitted (`motorway`, `""`, …).
    #[default]
    Other,
}

impl ActivityType {
    /// Classify an `activity_type` cell.  Unknown values map to `Other`.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "residential" => ActivityType::Residential,
            "poi" => ActivityType::Poi,
            "boundary" => ActivityType::Boundary,
            _ => ActivityType::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityType::Residential => "residential",
            ActivityType::Poi => "poi",
            ActivityType::Boundary => "boundary",
            ActivityType::Other => "other",
        }
    }
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Node ──────────────────────────────────────────────────────────────────────

/// A network node.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub point: Point,
    pub poi_id: Option<PoiId>,
    /// Original `activity_type` text, kept for output.
    pub activity_label: String,
    pub activity: ActivityType,
    /// `is_boundary` column (1 = the node sits on the study-area edge).
    pub boundary_flag: bool,
    /// `zone_id` column from input, if present and non-empty.
    pub preassigned_zone: Option<ZoneId>,

    pub zone_id: Option<ZoneId>,
    pub production: f64,
    pub attraction: f64,

    pub extra: ExtraFields,
}

impl Node {
    /// Node with only the required columns filled in.
    pub fn new(id: NodeId, point: Point) -> Self {
        Self {
            id,
            point,
            poi_id: None,
            activity_label: String::new(),
            activity: ActivityType::Other,
            boundary_flag: false,
            preassigned_zone: None,
            zone_id: None,
            production: 0.0,
            attraction: 0.0,
            extra: ExtraFields::new(),
        }
    }

    pub fn with_activity(mut self, label: &str) -> Self {
        self.activity = ActivityType::parse(label);
        self.activity_label = label.to_owned();
        self
    }

    pub fn with_boundary_flag(mut self, flag: bool) -> Self {
        self.boundary_flag = flag;
        self
    }

    /// A node on the edge of the modelled area: either flagged in the input
    /// or classified with activity type `boundary`.
    #[inline]
    pub fn is_boundary(&self) -> bool {
        self.boundary_flag || self.activity == ActivityType::Boundary
    }
}

// ── TripRate ──────────────────────────────────────────────────────────────────

/// Production/attraction rates assigned to a POI for one trip purpose.
#[derive(Clone, Debug, PartialEq)]
pub struct TripRate {
    pub purpose: u8,
    /// Trips per [`RATE_AREA_BASIS`] units of footprint area.
    pub production_rate: f64,
    pub attraction_rate: f64,
    pub unit_of_measure: String,
    /// `false` when the rate came from the hard-coded fallback.
    pub production_matched: bool,
    pub attraction_matched: bool,
}

impl Default for TripRate {
    fn default() -> Self {
        Self {
            purpose: 1,
            production_rate: 0.0,
            attraction_rate: 0.0,
            unit_of_measure: "1,000 Sq. Ft. GFA".to_owned(),
            production_matched: false,
            attraction_matched: false,
        }
    }
}

// ── Poi ───────────────────────────────────────────────────────────────────────

/// A point of interest (building footprint).
#[derive(Clone, Debug, PartialEq)]
pub struct Poi {
    pub id: PoiId,
    pub centroid: Point,
    pub footprint: Option<Polygon>,
    /// Land-use type (`building` column).
    pub building: String,
    /// Footprint area, never negative.
    pub area: f64,

    pub trip_rate: TripRate,
    pub zone_id: Option<ZoneId>,

    pub extra: ExtraFields,
}

impl Poi {
    pub fn new(id: PoiId, centroid: Point, building: &str, area: f64) -> Self {
        Self {
            id,
            centroid,
            footprint: None,
            building: building.to_owned(),
            area: area.max(0.0),
            trip_rate: TripRate::default(),
            zone_id: None,
            extra: ExtraFields::new(),
        }
    }

    /// `production_rate × area / 1000`.
    #[inline]
    pub fn production(&self) -> f64 {
        self.trip_rate.production_rate * self.area / RATE_AREA_BASIS
    }

    /// `attraction_rate × area / 1000`.
    #[inline]
    pub fn attraction(&self) -> f64 {
        self.trip_rate.attraction_rate * self.area / RATE_AREA_BASIS
    }
}
