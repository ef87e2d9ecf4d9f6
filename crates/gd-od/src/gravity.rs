//! Production-constrained gravity model.
//!
//! For each ordered pair:
//!
//! ```text
//! friction(o,d) = α · dist^β · e^(γ·dist)        (0 when dist == 0)
//! volume(o,d)   = P(o) · A(d) · friction(o,d) / max(Σ_d' A(d') · friction(o,d'), 1e-6)
//! ```
//!
//! Barring the floor, every origin row sums to that origin's production.

use gd_core::FrictionCoefficients;
use gd_zone::ZoneSet;

use crate::OdMatrix;

/// Lower bound on the per-origin normalising denominator.
pub const DENOMINATOR_FLOOR: f64 = 1e-6;

/// Counts from one distribution pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GravityReport {
    pub total_production: f64,
    pub total_volume: f64,
    /// Origins with production but no reachable attraction; their
    /// production is not distributed.
    pub origins_without_destinations: usize,
}

/// Distributes zone production over destinations.
#[derive(Clone, Debug)]
pub struct GravityModel {
    coefficients: FrictionCoefficients,
}

impl GravityModel {
    pub fn new(coefficients: FrictionCoefficients) -> Self {
        Self { coefficients }
    }

    /// Fill `friction` and `volume` on every record.  Distances are read in
    /// the matrix's unit.
    ///
    /// `zones` must be the set the matrix was built from.
    pub fn distribute(&self, zones: &ZoneSet, matrix: &mut OdMatrix) -> GravityReport {
        let zs = zones.as_slice();
        let mut report = GravityReport::default();

        for (o, row) in matrix.rows_mut().enumerate() {
            let production = zs.get(o).map_or(0.0, |z| z.production);
            report.total_production += production;

            let mut denominator = 0.0;
            for (d, rec) in row.iter_mut().enumerate() {
                rec.friction = if rec.is_self_pair() { 0.0 } else { self.coefficients.friction(rec.distance) };
                denominator += zs.get(d).map_or(0.0, |z| z.attraction) * rec.friction;
            }
            if production > 0.0 && denominator < DENOMINATOR_FLOOR {
                report.origins_without_destinations += 1;
            }
            let denominator = denominator.max(DENOMINATOR_FLOOR);

            for (d, rec) in row.iter_mut().enumerate() {
                let attraction = zs.get(d).map_or(0.0, |z| z.attraction);
                rec.volume = production * attraction * rec.friction / denominator;
                report.total_volume += rec.volume;
            }
        }

        if report.origins_without_destinations > 0 {
            log::warn!(
                "{} origin zones have production but no reachable attraction",
                report.origins_without_destinations
            );
        }
        log::info!(
            "gravity model: production {:.2} distributed as volume {:.2}",
            report.total_production,
            report.total_volume
        );
        report
    }
}
