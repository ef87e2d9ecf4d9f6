//! POI trip rates.
//!
//! Rates are trips per 1,000 units of footprint area, looked up by the POI's
//! `building` type and the selected [`TripPurpose`].  A type that is absent
//! from the table, or present without a value for the purpose, falls back to
//! [`DEFAULT_FALLBACK_RATE`] and is flagged unmatched.

use std::collections::BTreeMap;

use gd_core::{Poi, TripPurpose, TripRate};

use crate::{DemandError, DemandResult};

/// Rate used when no table entry exists.
pub const DEFAULT_FALLBACK_RATE: f64 = 0.1;

/// Unit in which every built-in rate is expressed.
pub const DEFAULT_UNIT: &str = "1,000 Sq. Ft. GFA";

/// Built-in home-based-work production rates.
const DEFAULT_PRODUCTION: &[(&str, f64)] = &[
    ("library", 8.16),
    ("university", 1.17),
    ("office", 2.04),
    ("arts_centre", 0.18),
    ("university;yes", 1.17),
    ("bank", 12.13),
    ("childcare", 11.12),
    ("school", 2.04),
    ("public", 4.79),
    ("post_office", 11.21),
    ("pharmacy", 10.29),
    ("yes", 1.15),
];

/// Built-in home-based-work attraction rates.
const DEFAULT_ATTRACTION: &[(&str, f64)] = &[
    ("parking", 2.39),
    ("apartments", 0.48),
    ("motorcycle_parking", 2.39),
    ("theatre", 6.17),
    ("restaurant", 7.80),
    ("cafe", 36.31),
    ("bar", 7.80),
    ("bicycle_parking", 2.39),
    ("residential", 0.48),
    ("commercial", 3.81),
    ("house", 0.48),
    ("stadium", 0.47),
    ("retail", 6.84),
    ("fast_food", 14.13),
    ("yes", 1.15),
];

// ── TripRateTable ─────────────────────────────────────────────────────────────

/// Rates for one building type, indexed by purpose code − 1.
#[derive(Clone, Debug, PartialEq)]
pub struct RateEntry {
    pub unit_of_measure: String,
    pub production: [Option<f64>; 3],
    pub attraction: [Option<f64>; 3],
}

impl Default for RateEntry {
    fn default() -> Self {
        Self {
            unit_of_measure: DEFAULT_UNIT.to_owned(),
            production: [None; 3],
            attraction: [None; 3],
        }
    }
}

/// Building type → rates.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TripRateTable {
    entries: BTreeMap<String, RateEntry>,
}

impl TripRateTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in table.  It only has home-based-work values.
    pub fn builtin() -> Self {
        let mut table = Self::new();
        for &(building, rate) in DEFAULT_PRODUCTION {
            table.entries.entry(building.to_owned()).or_default().production[0] = Some(rate);
        }
        for &(building, rate) in DEFAULT_ATTRACTION {
            table.entries.entry(building.to_owned()).or_default().attraction[0] = Some(rate);
        }
        table
    }

    /// Add or replace the entry for `building`.  Later inserts win.
    pub fn insert(&mut self, building: &str, entry: RateEntry) -> DemandResult<()> {
        let negative = |kind: &'static str, rates: &[Option<f64>; 3]| {
            rates.iter().flatten().find(|r| **r < 0.0).map(|&rate| DemandError::NegativeRate {
                building: building.to_owned(),
                kind,
                rate,
            })
        };
        if let Some(err) = negative("production", &entry.production) {
            return Err(err);
        }
        if let Some(err) = negative("attraction", &entry.attraction) {
            return Err(err);
        }
        self.entries.insert(building.to_owned(), entry);
        Ok(())
    }

    pub fn get(&self, building: &str) -> Option<&RateEntry> {
        self.entries.get(building)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ── TripRateGenerator ─────────────────────────────────────────────────────────

/// Matched/unmatched counts from one rate pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RateReport {
    pub production_matched: usize,
    pub production_unmatched: usize,
    pub attraction_matched: usize,
    pub attraction_unmatched: usize,
}

/// Assigns a [`TripRate`] to every POI.
#[derive(Clone, Debug)]
pub struct TripRateGenerator {
    table: TripRateTable,
    purpose: TripPurpose,
    fallback_rate: f64,
}

impl TripRateGenerator {
    /// Use the built-in table.
    pub fn with_defaults(purpose: TripPurpose) -> Self {
        Self::with_table(TripRateTable::builtin(), purpose)
    }

    /// Use an externally supplied table instead of the built-in one.
    pub fn with_table(table: TripRateTable, purpose: TripPurpose) -> Self {
        Self { table, purpose, fallback_rate: DEFAULT_FALLBACK_RATE }
    }

    pub fn fallback_rate(mut self, rate: f64) -> Self {
        self.fallback_rate = rate;
        self
    }

    pub fn purpose(&self) -> TripPurpose {
        self.purpose
    }

    /// Rate record for a building type.
    pub fn rate_for(&self, building: &str) -> TripRate {
        let slot = self.purpose.code() as usize - 1;
        let entry = self.table.get(building);
        let production = entry.and_then(|e| e.production[slot]);
        let attraction = entry.and_then(|e| e.attraction[slot]);

        TripRate {
            purpose: self.purpose.code(),
            production_rate: production.unwrap_or(self.fallback_rate),
            attraction_rate: attraction.unwrap_or(self.fallback_rate),
            unit_of_measure: entry.map_or(DEFAULT_UNIT, |e| e.unit_of_measure.as_str()).to_owned(),
            production_matched: production.is_some(),
            attraction_matched: attraction.is_some(),
        }
    }

    /// Set `trip_rate` on every POI.
    pub fn apply(&self, pois: &mut [Poi]) -> RateReport {
        let mut report = RateReport::default();
        for poi in pois.iter_mut() {
            poi.trip_rate = self.rate_for(&poi.building);
            if poi.trip_rate.production_matched {
                report.production_matched += 1;
            } else {
                report.production_unmatched += 1;
            }
            if poi.trip_rate.attraction_matched {
                report.attraction_matched += 1;
            } else {
                report.attraction_unmatched += 1;
            }
        }

        if report.production_unmatched > 0 || report.attraction_unmatched > 0 {
            log::warn!(
                "{} POIs use the fallback production rate and {} the fallback attraction rate ({})",
                report.production_unmatched,
                report.attraction_unmatched,
                self.fallback_rate
            );
        }
        report
    }
}
