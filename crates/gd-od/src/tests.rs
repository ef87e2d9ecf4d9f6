//! Unit tests for gd-od.

#[cfg(test)]
fn point_zones(specs: &[(u64, &str, f64, f64, f64, f64)]) -> gd_zone::ZoneSet {
    use gd_core::{Point, ZoneId};
    use gd_zone::{Zone, ZoneKind, ZoneSet};

    let zones = specs
        .iter()
        .map(|&(id, name, x, y, production, attraction)| {
            let mut z = Zone::from_centroid(ZoneId(id), name.to_owned(), ZoneKind::External, Point::new(x, y));
            z.production = production;
            z.attraction = attraction;
            z
        })
        .collect();
    ZoneSet::new(zones).unwrap()
}

#[cfg(test)]
mod matrix {
    use approx::assert_relative_eq;
    use gd_core::{DistanceUnit, ZoneId};
    use gd_zone::ZoneSet;

    use super::point_zones;
    use crate::{AccessibilityRecord, DistanceMatrixBuilder, OdError};

    #[test]
    fn one_record_per_ordered_pair() {
        let zones = point_zones(&[
            (1, "a", 0.0, 0.0, 0.0, 0.0),
            (2, "b", 0.0, 1.0, 0.0, 0.0),
            (3, "c", 1.0, 0.0, 0.0, 0.0),
        ]);
        let m = DistanceMatrixBuilder::new(DistanceUnit::Km).build(&zones).unwrap();
        assert_eq!(m.len(), 9);
        assert_eq!(m.zone_count(), 3);

        for rec in m.iter() {
            if rec.is_self_pair() {
                assert_eq!(rec.distance, 0.0);
            } else {
                assert!(rec.distance > 100.0);
            }
        }
        let ab = m.get(ZoneId(1), ZoneId(2)).unwrap();
        assert_relative_eq!(ab.distance, 111.195, max_relative = 1e-3);
        assert_eq!(ab.o_zone_name, "a");
        assert_eq!(ab.d_zone_name, "b");
        assert_eq!(ab.geometry.to_string(), "LINESTRING(0 0,0 1)");
        assert_eq!(m.get(ZoneId(2), ZoneId(1)).unwrap().distance, ab.distance);

        // Row-major in zone order.
        assert_eq!(m.row(1)[2].d_zone_id, ZoneId(3));
        assert_eq!(m.row(1)[2].o_zone_id, ZoneId(2));
    }

    #[test]
    fn overrides_skip_self_pairs_and_unknown_zones() {
        let zones = point_zones(&[(1, "a", 0.0, 0.0, 0.0, 0.0), (2, "b", 0.0, 1.0, 0.0, 0.0)]);
        let mut m = DistanceMatrixBuilder::new(DistanceUnit::Km).build(&zones).unwrap();
        let applied = m
            .apply_overrides(&[
                AccessibilityRecord { o_zone_id: ZoneId(1), d_zone_id: ZoneId(2), distance: 5.0 },
                AccessibilityRecord { o_zone_id: ZoneId(1), d_zone_id: ZoneId(1), distance: 7.0 },
                AccessibilityRecord { o_zone_id: ZoneId(1), d_zone_id: ZoneId(99), distance: 7.0 },
            ])
            .unwrap();
        assert_eq!(applied, 1);
        assert_eq!(m.get(ZoneId(1), ZoneId(2)).unwrap().distance, 5.0);
        assert_eq!(m.get(ZoneId(1), ZoneId(1)).unwrap().distance, 0.0);
        // Not covered: keeps the computed value.
        assert!(m.get(ZoneId(2), ZoneId(1)).unwrap().distance > 100.0);

        let bad = m.apply_overrides(&[AccessibilityRecord { o_zone_id: ZoneId(1), d_zone_id: ZoneId(2), distance: -1.0 }]);
        assert!(matches!(bad, Err(OdError::NegativeDistance { .. })));
    }

    #[test]
    fn empty_zone_set() {
        let zones = ZoneSet::default();
        assert!(matches!(DistanceMatrixBuilder::default().build(&zones), Err(OdError::NoZones)));
    }
}

#[cfg(test)]
mod gravity {
    use approx::assert_relative_eq;
    use gd_core::{DistanceUnit, TripPurpose, ZoneId};

    use super::point_zones;
    use crate::{AccessibilityRecord, DistanceMatrixBuilder, GravityModel};

    #[test]
    fn two_zone_example() {
        let zones = point_zones(&[(1, "A", 0.0, 0.0, 100.0, 0.0), (2, "B", 0.0, 0.05, 0.0, 100.0)]);
        let mut m = DistanceMatrixBuilder::new(DistanceUnit::Km).build(&zones).unwrap();
        m.apply_overrides(&[
            AccessibilityRecord { o_zone_id: ZoneId(1), d_zone_id: ZoneId(2), distance: 10.0 },
            AccessibilityRecord { o_zone_id: ZoneId(2), d_zone_id: ZoneId(1), distance: 10.0 },
        ])
        .unwrap();

        let model = GravityModel::new(TripPurpose::HomeBasedWork.friction());
        let report = model.distribute(&zones, &mut m);

        let ab = m.get(ZoneId(1), ZoneId(2)).unwrap();
        assert!(ab.friction > 0.0);
        assert_relative_eq!(ab.volume, 100.0, max_relative = 1e-9);
        assert_eq!(m.get(ZoneId(2), ZoneId(1)).unwrap().volume, 0.0);
        assert_relative_eq!(report.total_volume, 100.0, max_relative = 1e-9);
        assert_eq!(report.origins_without_destinations, 0);
    }

    #[test]
    fn self_pairs_carry_nothing() {
        let zones = point_zones(&[(1, "A", 0.0, 0.0, 50.0, 50.0), (2, "B", 0.1, 0.0, 50.0, 50.0)]);
        let mut m = DistanceMatrixBuilder::new(DistanceUnit::Km).build(&zones).unwrap();
        GravityModel::new(TripPurpose::HomeBasedOther.friction()).distribute(&zones, &mut m);
        for rec in m.iter().filter(|r| r.is_self_pair()) {
            assert_eq!(rec.friction, 0.0);
            assert_eq!(rec.volume, 0.0);
        }
    }

    #[test]
    fn production_is_conserved_per_origin() {
        let zones = point_zones(&[
            (1, "A", 0.00, 0.00, 120.0, 10.0),
            (2, "B", 0.02, 0.00, 30.0, 80.0),
            (3, "C", 0.00, 0.03, 0.0, 25.0),
            (4, "D", 0.04, 0.05, 75.5, 0.0),
            (5, "E", 0.01, 0.07, 10.0, 300.0),
        ]);
        let mut m = DistanceMatrixBuilder::new(DistanceUnit::Km).build(&zones).unwrap();
        GravityModel::new(TripPurpose::NonHomeBased.friction()).distribute(&zones, &mut m);

        for (i, zone) in zones.iter().enumerate() {
            let row_sum: f64 = m.row(i).iter().map(|r| r.volume).sum();
            if zone.production > 0.0 {
                assert_relative_eq!(row_sum, zone.production, max_relative = 1e-3);
            } else {
                assert_eq!(row_sum, 0.0);
            }
        }
    }

    #[test]
    fn origin_without_destinations_is_reported() {
        // B's only possible destination is A, which attracts nothing.
        let zones = point_zones(&[(1, "A", 0.0, 0.0, 0.0, 0.0), (2, "B", 0.0, 0.1, 40.0, 10.0)]);
        let mut m = DistanceMatrixBuilder::new(DistanceUnit::Km).build(&zones).unwrap();
        let report = GravityModel::new(TripPurpose::HomeBasedWork.friction()).distribute(&zones, &mut m);
        assert_eq!(report.origins_without_destinations, 1);
        assert_eq!(report.total_volume, 0.0);
        assert!(m.iter().all(|r| r.volume.is_finite()));
    }
}
