//! All-pairs zone distance matrix.
//!
//! # Layout
//!
//! Records are stored row-major in `ZoneSet` order: the record for origin
//! position `i` and destination position `j` lives at `i * n + j`.  There is
//! exactly one record per ordered pair, self-pairs included.  Each row is a
//! contiguous slice, which is what the gravity model's per-origin
//! normalisation walks.

use std::collections::BTreeMap;

use gd_core::{DistanceUnit, LineString, ZoneId};
use gd_zone::{Zone, ZoneSet};

use crate::{OdError, OdResult};

// ── OdRecord ──────────────────────────────────────────────────────────────────

/// One ordered zone pair.
#[derive(Clone, Debug, PartialEq)]
pub struct OdRecord {
    pub o_zone_id: ZoneId,
    pub o_zone_name: String,
    pub d_zone_id: ZoneId,
    pub d_zone_name: String,
    /// Centroid-to-centroid great-circle distance (or an override), in the
    /// matrix unit.  0 for self-pairs.
    pub distance: f64,
    /// Set by the gravity model.
    pub friction: f64,
    /// Set by the gravity model.
    pub volume: f64,
    /// Centroid-to-centroid segment.
    pub geometry: LineString,
}

impl OdRecord {
    #[inline]
    pub fn is_self_pair(&self) -> bool {
        self.o_zone_id == self.d_zone_id
    }
}

/// One row of an external accessibility/OD distance table.
#[derive(Clone, Debug, PartialEq)]
pub struct AccessibilityRecord {
    pub o_zone_id: ZoneId,
    pub d_zone_id: ZoneId,
    pub distance: f64,
}

// ── OdMatrix ──────────────────────────────────────────────────────────────────

/// Dense `n × n` OD matrix over a zone set.
#[derive(Clone, Debug)]
pub struct OdMatrix {
    records: Vec<OdRecord>,
    zone_ids: Vec<ZoneId>,
    index: BTreeMap<ZoneId, usize>,
    unit: DistanceUnit,
}

impl OdMatrix {
    /// Number of zones (rows).
    pub fn zone_count(&self) -> usize {
        self.zone_ids.len()
    }

    /// Number of records (`zone_count²`).
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn unit(&self) -> DistanceUnit {
        self.unit
    }

    pub fn zone_ids(&self) -> &[ZoneId] {
        &self.zone_ids
    }

    pub fn iter(&self) -> std::slice::Iter<'_, OdRecord> {
        self.records.iter()
    }

    pub fn records(&self) -> &[OdRecord] {
        &self.records
    }

    fn position(&self, id: ZoneId) -> Option<usize> {
        self.index.get(&id).copied()
    }

    pub fn get(&self, o: ZoneId, d: ZoneId) -> Option<&OdRecord> {
        let n = self.zone_count();
        Some(&self.records[self.position(o)? * n + self.position(d)?])
    }

    pub fn get_mut(&mut self, o: ZoneId, d: ZoneId) -> Option<&mut OdRecord> {
        let n = self.zone_count();
        let idx = self.position(o)? * n + self.position(d)?;
        Some(&mut self.records[idx])
    }

    /// All records with origin at position `row`.
    pub fn row(&self, row: usize) -> &[OdRecord] {
        let n = self.zone_count();
        &self.records[row * n..(row + 1) * n]
    }

    /// Mutable row slices, one per origin, in zone order.
    pub fn rows_mut(&mut self) -> std::slice::ChunksMut<'_, OdRecord> {
        let n = self.zone_count().max(1);
        self.records.chunks_mut(n)
    }

    /// Replace computed distances with externally supplied ones.
    ///
    /// Self-pairs and pairs naming an unknown zone are skipped.  Returns the
    /// number of records overridden.
    pub fn apply_overrides(&mut self, overrides: &[AccessibilityRecord]) -> OdResult<usize> {
        let mut applied = 0;
        for ov in overrides {
            if ov.distance < 0.0 {
                return Err(OdError::NegativeDistance { o: ov.o_zone_id, d: ov.d_zone_id, distance: ov.distance });
            }
            if ov.o_zone_id == ov.d_zone_id {
                continue;
            }
            if let Some(rec) = self.get_mut(ov.o_zone_id, ov.d_zone_id) {
                rec.distance = ov.distance;
                applied += 1;
            }
        }
        if applied < overrides.len() {
            log::debug!("{} of {} accessibility rows did not match a zone pair", overrides.len() - applied, overrides.len());
        }
        Ok(applied)
    }
}

// ── DistanceMatrixBuilder ─────────────────────────────────────────────────────

/// Computes every centroid-to-centroid distance.
#[derive(Clone, Debug, Default)]
pub struct DistanceMatrixBuilder {
    unit: DistanceUnit,
}

impl DistanceMatrixBuilder {
    pub fn new(unit: DistanceUnit) -> Self {
        Self { unit }
    }

    fn record(&self, o: &Zone, d: &Zone) -> OdRecord {
        let distance = if o.id == d.id { 0.0 } else { o.centroid.distance(d.centroid, self.unit) };
        OdRecord {
            o_zone_id: o.id,
            o_zone_name: o.name.clone(),
            d_zone_id: d.id,
            d_zone_name: d.name.clone(),
            distance,
            friction: 0.0,
            volume: 0.0,
            geometry: LineString::segment(o.centroid, d.centroid),
        }
    }

    pub fn build(&self, zones: &ZoneSet) -> OdResult<OdMatrix> {
        if zones.is_empty() {
            return Err(OdError::NoZones);
        }
        let z = zones.as_slice();
        let n = z.len();

        #[cfg(not(feature = "parallel"))]
        let records: Vec<OdRecord> = (0..n * n).map(|k| self.record(&z[k / n], &z[k % n])).collect();

        #[cfg(feature = "parallel")]
        let records: Vec<OdRecord> = {
            use rayon::prelude::*;
            (0..n * n).into_par_iter().map(|k| self.record(&z[k / n], &z[k % n])).collect()
        };

        log::debug!("distance matrix: {n} zones, {} pairs ({})", records.len(), self.unit);
        let zone_ids: Vec<ZoneId> = z.iter().map(|zone| zone.id).collect();
        let index = zone_ids.iter().enumerate().map(|(i, &id)| (id, i)).collect();
        Ok(OdMatrix { records, zone_ids, index, unit: self.unit })
    }
}
