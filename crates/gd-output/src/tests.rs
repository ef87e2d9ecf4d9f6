//! Integration tests for gd-output.

#[cfg(test)]
mod csv_tests {
    use std::path::Path;

    use tempfile::TempDir;

    use gd_agent::Agent;
    use gd_core::{
        AgentId, Bounds, DepartureTime, DistanceUnit, LineString, Node, NodeId, Point, Poi, PoiId, Polygon,
        TravelMode, ZoneId,
    };
    use gd_od::{DistanceMatrixBuilder, OdMatrix};
    use gd_zone::{Zone, ZoneKind, ZoneSet};

    use crate::{CsvWriter, OutputWriter};

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn read(path: &Path) -> (Vec<String>, Vec<csv::StringRecord>) {
        let mut rdr = csv::Reader::from_path(path).unwrap();
        let headers = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        let rows = rdr.records().map(|r| r.unwrap()).collect();
        (headers, rows)
    }

    fn zones() -> ZoneSet {
        let cell = Polygon::rectangle(Bounds { x_min: 0.0, x_max: 1.0, y_min: 0.0, y_max: 1.0 });
        let mut a = Zone::from_polygon(ZoneId(0), "A0".into(), ZoneKind::Cell, cell).unwrap();
        a.node_ids = vec![NodeId(1)];
        a.production = 10.0;
        let b = Zone::from_centroid(ZoneId(1), "gate0".into(), ZoneKind::Gate, Point::new(0.5, 2.0));
        ZoneSet::new(vec![a, b]).unwrap()
    }

    fn matrix(zones: &ZoneSet) -> OdMatrix {
        let mut m = DistanceMatrixBuilder::new(DistanceUnit::Km).build(zones).unwrap();
        m.get_mut(ZoneId(0), ZoneId(1)).unwrap().volume = 2.5;
        m
    }

    #[test]
    fn output_dir_created() {
        let dir = tmp();
        let out = dir.path().join("nested/out");
        let _w = CsvWriter::new(&out).unwrap();
        assert!(out.is_dir());
    }

    #[test]
    fn nodes_carry_extra_columns() {
        let dir = tmp();
        let mut n1 = Node::new(NodeId(1), Point::new(0.5, 0.5)).with_activity("residential");
        n1.zone_id = Some(ZoneId(0));
        n1.production = 10.0;
        n1.extra.insert("osm_highway".into(), "primary".into());
        let n2 = Node::new(NodeId(2), Point::new(9.0, 9.0)).with_boundary_flag(true);

        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_nodes(&[n1, n2]).unwrap();
        w.finish().unwrap();

        let (headers, rows) = read(&dir.path().join("node.csv"));
        assert_eq!(headers.last().map(String::as_str), Some("osm_highway"));
        assert_eq!(headers[..3], ["node_id", "x_coord", "y_coord"]);
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][6], "0"); // zone_id
        assert_eq!(&rows[0][9], "primary");
        assert_eq!(&rows[1][4], "1"); // is_boundary
        assert_eq!(&rows[1][6], ""); // unassigned
        assert_eq!(&rows[1][9], "");
    }

    #[test]
    fn pois_report_rates_and_products() {
        let dir = tmp();
        let mut p = Poi::new(PoiId(17), Point::new(0.5, 0.5), "retail", 2000.0);
        p.trip_rate.production_rate = 3.0;
        p.trip_rate.production_matched = true;

        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_pois(&[p]).unwrap();
        w.finish().unwrap();

        let (headers, rows) = read(&dir.path().join("poi.csv"));
        let col = |name: &str| headers.iter().position(|h| h == name).unwrap();
        assert_eq!(&rows[0][col("centroid")], "POINT (0.5 0.5)");
        assert_eq!(&rows[0][col("production")], "6");
        assert_eq!(&rows[0][col("production_rate_matched")], "1");
        assert_eq!(&rows[0][col("attraction_rate_matched")], "0");
        assert_eq!(&rows[0][col("geometry")], "");
    }

    #[test]
    fn zones_in_set_order() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_zones(&zones()).unwrap();
        w.finish().unwrap();

        let (_, rows) = read(&dir.path().join("zone.csv"));
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][1], "A0");
        assert_eq!(&rows[0][2], "cell");
        assert!(rows[0][6].starts_with("POLYGON (("));
        assert_eq!((&rows[0][3], &rows[0][4]), ("", ""));
        assert_eq!(&rows[0][5], "POINT (0.5 0.5)");
        assert_eq!(&rows[0][7], "1");
        assert_eq!(&rows[1][1], "gate0");
        assert_eq!((&rows[1][3], &rows[1][4]), ("0.5", "2"));
        assert_eq!(&rows[1][6], "");
    }

    #[test]
    fn default_dir_is_below_inputs() {
        let dir = tmp();
        let w = CsvWriter::beside_inputs(dir.path()).unwrap();
        assert_eq!(w.dir(), dir.path().join(crate::DEFAULT_OUTPUT_DIR).as_path());
        assert!(w.dir().is_dir());
    }

    #[test]
    fn demand_omits_zero_volume_pairs() {
        let dir = tmp();
        let zones = zones();
        let m = matrix(&zones);
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_od_distances(&m).unwrap();
        w.write_demand(&m).unwrap();
        w.finish().unwrap();

        let (headers, rows) = read(&dir.path().join("zone_od_dist_table.csv"));
        assert_eq!(headers, ["o_zone_id", "o_zone_name", "d_zone_id", "d_zone_name", "dist_km", "geometry"]);
        assert_eq!(rows.len(), 4);

        let (headers, rows) = read(&dir.path().join("demand.csv"));
        assert_eq!(headers[5], "volume");
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][0], "0");
        assert_eq!(&rows[0][3], "gate0");
        assert_eq!(&rows[0][5], "2.5");
        assert!(rows[0][6].starts_with("LINESTRING("));
    }

    #[test]
    fn agent_rows() {
        let dir = tmp();
        let agent = Agent {
            id: AgentId(1),
            mode: TravelMode::Walk,
            o_zone_id: ZoneId(0),
            d_zone_id: ZoneId(1),
            o_node_id: NodeId(1),
            d_node_id: NodeId(2),
            geometry: LineString::segment(Point::new(0.0, 0.0), Point::new(1.0, 1.0)),
            departure_time: DepartureTime::from_offset(7, 5),
        };
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_agents(&[agent]).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();

        let (_, rows) = read(&dir.path().join("agent.csv"));
        assert_eq!(&rows[0][1], "p");
        assert_eq!(&rows[0][6], "LINESTRING(0 0,1 1)");
        assert_eq!(&rows[0][7], "0705");
    }
}
