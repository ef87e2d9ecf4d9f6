//! Unit tests for gd-core primitives.

#[cfg(test)]
mod ids {
    use crate::{AgentId, NodeId, ZoneId};

    #[test]
    fn ordering() {
        assert!(ZoneId(0) < ZoneId(1));
        assert!(NodeId(100) > NodeId(99));
    }

    #[test]
    fn display_and_raw() {
        assert_eq!(AgentId(7).to_string(), "AgentId(7)");
        assert_eq!(NodeId::from(12).raw(), 12);
    }
}

#[cfg(test)]
mod geo {
    use approx::assert_relative_eq;

    use crate::{Bounds, DistanceUnit, LineString, Point};

    #[test]
    fn zero_distance() {
        let p = Point::new(-111.93, 33.42);
        assert!(p.distance(p, DistanceUnit::Km) < 1e-9);
    }

    #[test]
    fn one_degree_latitude() {
        // ~1 degree of latitude ≈ 111.2 km
        let a = Point::new(-88.0, 30.0);
        let b = Point::new(-88.0, 31.0);
        assert_relative_eq!(a.distance(b, DistanceUnit::Km), 111.195, max_relative = 1e-3);
        assert_relative_eq!(a.distance(b, DistanceUnit::Meter), 111_195.0, max_relative = 1e-3);
        assert_relative_eq!(a.distance(b, DistanceUnit::Mile), 69.115, max_relative = 1e-3);
    }

    #[test]
    fn bounds_cover_and_expand() {
        let b = Bounds::covering([Point::new(0.0, 1.0), Point::new(2.0, -1.0)]).unwrap();
        assert_eq!(b, Bounds { x_min: 0.0, x_max: 2.0, y_min: -1.0, y_max: 1.0 });
        assert_eq!(b.center(), Point::new(1.0, 0.0));

        let e = b.expand(0.5);
        assert_eq!(e.width(), 3.0);
        assert!(e.contains(Point::new(-0.5, 1.5)));
        assert!(!e.contains(Point::new(-0.6, 0.0)));

        assert!(Bounds::covering(std::iter::empty()).is_none());
    }

    #[test]
    fn linestring_display() {
        let ls = LineString::segment(Point::new(0.0, 0.5), Point::new(1.0, 2.0));
        assert_eq!(ls.to_string(), "LINESTRING(0 0.5,1 2)");
        assert_eq!(Point::new(1.5, -2.0).to_string(), "POINT (1.5 -2)");
    }
}

#[cfg(test)]
mod polygon {
    use approx::assert_relative_eq;

    use crate::{Bounds, DistanceUnit, Point, Polygon};

    fn unit_square() -> Polygon {
        Polygon::new(
            vec![
                Point::new(0.0, 0.0),
                Point::new(1.0, 0.0),
                Point::new(1.0, 1.0),
                Point::new(0.0, 1.0),
            ],
            vec![],
        )
        .unwrap()
    }

    #[test]
    fn containment_includes_boundary() {
        let sq = unit_square();
        assert!(sq.contains(Point::new(0.5, 0.5)));
        assert!(sq.contains(Point::new(1.0, 0.5)));
        assert!(sq.contains(Point::new(0.0, 0.0)));
        assert!(!sq.contains(Point::new(1.01, 0.5)));
    }

    #[test]
    fn centroid_bounds_area() {
        let sq = unit_square();
        let c = sq.centroid().unwrap();
        assert_relative_eq!(c.x, 0.5);
        assert_relative_eq!(c.y, 0.5);
        assert_eq!(sq.bounds().unwrap(), Bounds { x_min: 0.0, x_max: 1.0, y_min: 0.0, y_max: 1.0 });
        assert_relative_eq!(sq.planar_area(), 1.0);
    }

    #[test]
    fn hole_excluded() {
        let poly = Polygon::new(
            vec![
                Point::new(0.0, 0.0),
                Point::new(4.0, 0.0),
                Point::new(4.0, 4.0),
                Point::new(0.0, 4.0),
            ],
            vec![vec![
                Point::new(1.0, 1.0),
                Point::new(2.0, 1.0),
                Point::new(2.0, 2.0),
                Point::new(1.0, 2.0),
            ]],
        )
        .unwrap();
        assert!(!poly.contains(Point::new(1.5, 1.5)));
        assert!(poly.contains(Point::new(3.0, 3.0)));
        assert_relative_eq!(poly.planar_area(), 15.0);
    }

    #[test]
    fn degenerate_rejected() {
        assert!(Polygon::new(vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0)], vec![]).is_err());
        assert!(Polygon::from_parts(vec![]).is_err());
    }

    #[test]
    fn rectangle_matches_bounds() {
        let b = Bounds { x_min: -1.0, x_max: 1.0, y_min: 2.0, y_max: 5.0 };
        let r = Polygon::rectangle(b);
        assert_eq!(r.bounds().unwrap(), b);
        assert_relative_eq!(r.planar_area(), 6.0);
    }

    #[test]
    fn projected_area_of_small_square() {
        // 0.001° × 0.001° at the equator ≈ 111.19 m × 111.19 m.
        let d = 0.001;
        let sq = Polygon::new(
            vec![Point::new(0.0, 0.0), Point::new(d, 0.0), Point::new(d, d), Point::new(0.0, d)],
            vec![],
        )
        .unwrap();
        let side = 6_371_000.0 * d.to_radians();
        assert_relative_eq!(sq.projected_area(DistanceUnit::Meter), side * side, max_relative = 1e-4);
    }
}

#[cfg(test)]
mod wkt {
    use crate::wkt::{self, Geometry};
    use crate::Point;

    #[test]
    fn point() {
        assert_eq!(wkt::parse_point("POINT (-111.9 33.4)").unwrap(), Point::new(-111.9, 33.4));
        assert_eq!(wkt::parse_point("point(1 2)").unwrap(), Point::new(1.0, 2.0));
    }

    #[test]
    fn polygon_and_multipolygon() {
        let g = wkt::parse("POLYGON ((0 0, 2 0, 2 2, 0 2, 0 0))").unwrap();
        let Geometry::Polygon(p) = g else { panic!("expected polygon") };
        assert!(p.contains(Point::new(1.0, 1.0)));
        assert_eq!(wkt::polygon_to_wkt(&p), "POLYGON ((0 0, 2 0, 2 2, 0 2, 0 0))");

        let g = wkt::parse("MULTIPOLYGON (((0 0, 1 0, 1 1, 0 0)), ((5 5, 6 5, 6 6, 5 5)))").unwrap();
        let Geometry::Polygon(m) = g else { panic!("expected polygon") };
        assert_eq!(m.parts().len(), 2);
        assert!(wkt::polygon_to_wkt(&m).starts_with("MULTIPOLYGON ((("));
    }

    #[test]
    fn malformed_input() {
        assert!(wkt::parse("POINT 1 2").is_err());
        assert!(wkt::parse("POINT (1 2 3)").is_err());
        assert!(wkt::parse("POINT (1 2) junk").is_err());
        assert!(wkt::parse("LINESTRING (0 0, 1 1)").is_err());
        assert!(wkt::parse_point("POLYGON ((0 0, 1 0, 1 1, 0 0))").is_err());
    }

    #[test]
    fn nesting_depth_is_bounded() {
        assert!(wkt::parse("MULTIPOLYGON ((((0 0, 1 0, 1 1, 0 0))))").is_err());

        let deep = format!("POLYGON {}0 0", "(".repeat(100_000));
        let err = wkt::parse(&deep).unwrap_err();
        assert!(err.to_string().contains("nested deeper"), "got {err}");
    }
}

#[cfg(test)]
mod network {
    use approx::assert_relative_eq;

    use crate::{ActivityType, Node, NodeId, Point, Poi, PoiId};

    #[test]
    fn activity_parse() {
        assert_eq!(ActivityType::parse("Residential"), ActivityType::Residential);
        assert_eq!(ActivityType::parse("boundary"), ActivityType::Boundary);
        assert_eq!(ActivityType::parse("motorway"), ActivityType::Other);
    }

    #[test]
    fn boundary_from_flag_or_activity() {
        let n = Node::new(NodeId(1), Point::default());
        assert!(!n.is_boundary());
        assert!(n.clone().with_boundary_flag(true).is_boundary());
        assert!(n.with_activity("boundary").is_boundary());
    }

    #[test]
    fn poi_contribution() {
        let mut poi = Poi::new(PoiId(1), Point::default(), "library", 2000.0);
        poi.trip_rate.production_rate = 8.16;
        poi.trip_rate.attraction_rate = 1.0;
        assert_relative_eq!(poi.production(), 16.32, max_relative = 1e-12);
        assert_relative_eq!(poi.attraction(), 2.0, max_relative = 1e-12);
        assert_eq!(Poi::new(PoiId(2), Point::default(), "x", -5.0).area, 0.0);
    }
}

#[cfg(test)]
mod time {
    use crate::{DemandRng, DepartureTime, DepartureWindow};

    #[test]
    fn format_and_rollover() {
        assert_eq!(DepartureTime::from_offset(7, 5).to_string(), "0705");
        assert_eq!(DepartureTime::from_offset(7, 60).to_string(), "0800");
        assert_eq!(DepartureTime::from_offset(23, 61).to_string(), "0001");
    }

    #[test]
    fn samples_stay_in_window() {
        let window = DepartureWindow::default();
        let mut rng = DemandRng::new(3);
        for _ in 0..1_000 {
            let t = window.sample(&mut rng).minutes_of_day();
            assert!((7 * 60 + 1..=8 * 60).contains(&t), "got {t}");
        }
    }

    #[test]
    fn seeded_sampling_is_reproducible() {
        let window = DepartureWindow::default();
        let mut a = DemandRng::new(42);
        let mut b = DemandRng::new(42);
        let xs: Vec<_> = (0..20).map(|_| window.sample(&mut a)).collect();
        let ys: Vec<_> = (0..20).map(|_| window.sample(&mut b)).collect();
        assert_eq!(xs, ys);
    }
}

#[cfg(test)]
mod units {
    use crate::{DistanceUnit, TravelMode};

    #[test]
    fn parse() {
        assert_eq!("KM".parse::<DistanceUnit>().unwrap(), DistanceUnit::Km);
        assert_eq!("m".parse::<DistanceUnit>().unwrap(), DistanceUnit::Meter);
        assert!("furlong".parse::<DistanceUnit>().is_err());
        assert_eq!("walk".parse::<TravelMode>().unwrap(), TravelMode::Walk);
        assert!("boat".parse::<TravelMode>().is_err());
        assert_eq!(TravelMode::default().to_string(), "auto");

        let codes: Vec<_> = [TravelMode::Auto, TravelMode::Bike, TravelMode::Walk]
            .iter()
            .map(|m| m.agent_code())
            .collect();
        assert_eq!(codes, ["v", "b", "p"]);
    }
}

#[cfg(test)]
mod purpose {
    use approx::assert_relative_eq;

    use crate::{GdError, TripPurpose};

    #[test]
    fn codes() {
        for p in TripPurpose::ALL {
            assert_eq!(TripPurpose::from_code(p.code()).unwrap(), p);
        }
        assert!(matches!(TripPurpose::from_code(4), Err(GdError::InvalidTripPurpose(4))));
        assert_eq!(TripPurpose::HomeBasedWork.to_string(), "home-based-work");
    }

    #[test]
    fn friction_values() {
        let f = TripPurpose::HomeBasedWork.friction();
        assert_eq!(f.friction(0.0), 0.0);
        let expected = 28_507.0 * 10f64.powf(-0.02) * (-1.23f64).exp();
        assert_relative_eq!(f.friction(10.0), expected, max_relative = 1e-12);
        assert!(f.friction(1.0) > f.friction(5.0));
    }
}
