//! End-to-end tests for gd-pipeline.

#[cfg(test)]
fn network() -> (Vec<gd_core::Node>, Vec<gd_core::Poi>) {
    use gd_core::{Node, NodeId, Point, Poi, PoiId};

    let residential = [(1, 0.001, 0.001), (2, 0.019, 0.001), (3, 0.001, 0.019), (4, 0.019, 0.019), (5, 0.010, 0.005)];
    let mut nodes: Vec<Node> = residential
        .iter()
        .map(|&(id, x, y)| Node::new(NodeId(id), Point::new(x, y)).with_activity("residential"))
        .collect();

    let mut poi_node = Node::new(NodeId(6), Point::new(0.015, 0.015)).with_activity("poi");
    poi_node.poi_id = Some(PoiId(100));
    nodes.push(poi_node);
    nodes.push(Node::new(NodeId(7), Point::new(0.012, 0.006)).with_activity("motorway"));
    // Outside the extent of the interior nodes: routed to a gate.
    nodes.push(Node::new(NodeId(8), Point::new(0.010, 0.030)).with_boundary_flag(true));

    let pois = vec![
        Poi::new(PoiId(100), Point::new(0.015, 0.015), "retail", 2000.0),
        Poi::new(PoiId(101), Point::new(0.005, 0.015), "office", 3000.0),
    ];
    (nodes, pois)
}

#[cfg(test)]
fn grid_config() -> crate::DemandConfig {
    crate::DemandConfig {
        zoning: crate::ZoningOptions::blocks(2, 2),
        seed: 42,
        ..crate::DemandConfig::default()
    }
}

#[cfg(test)]
fn grid_pipeline() -> crate::DemandPipeline {
    let (nodes, pois) = network();
    crate::PipelineBuilder::new(grid_config(), nodes, pois).build().unwrap()
}

#[cfg(test)]
mod run {
    use approx::assert_relative_eq;
    use gd_core::ZoneId;

    use super::grid_pipeline;
    use crate::{Diagnostics, NoopObserver, PipelineObserver, Stage};

    #[derive(Default)]
    struct Recorder {
        started: Vec<Stage>,
        ended: Vec<Stage>,
        finished: bool,
    }

    impl PipelineObserver for Recorder {
        fn on_stage_start(&mut self, stage: Stage) {
            self.started.push(stage);
        }

        fn on_stage_end(&mut self, stage: Stage, _diagnostics: &Diagnostics) {
            self.ended.push(stage);
        }

        fn on_pipeline_end(&mut self, _diagnostics: &Diagnostics) {
            self.finished = true;
        }
    }

    #[test]
    fn grid_with_gates() {
        let mut p = grid_pipeline();
        p.run(&mut NoopObserver).unwrap();
        let d = &p.diagnostics;

        assert_eq!(d.zones, 4 + 8);
        assert_eq!(d.gates, 8);
        assert_eq!(d.nodes_unassigned, 0);
        assert_eq!(d.pois_unassigned, 0);
        assert_eq!(d.nodes_to_gates, 1);

        let gate = p.nodes.iter().find(|n| n.id.raw() == 8).unwrap().zone_id.unwrap();
        assert!(p.zones.get(gate).unwrap().is_gate());
        assert!(p.zones.iter().take(4).all(|z| !z.is_gate()));
    }

    #[test]
    fn volume_conserves_production() {
        let mut p = grid_pipeline();
        p.run(&mut NoopObserver).unwrap();
        let d = &p.diagnostics;

        assert!(d.total_production > 0.0);
        assert_eq!(d.origins_without_destinations, 0);
        assert_relative_eq!(d.total_volume, d.total_production, max_relative = 1e-6);

        let matrix = p.matrix.as_ref().unwrap();
        for rec in matrix.iter().filter(|r| r.is_self_pair()) {
            assert_eq!(rec.volume, 0.0);
        }
    }

    #[test]
    fn agents_match_ceiled_volume() {
        let mut p = grid_pipeline();
        p.run(&mut NoopObserver).unwrap();

        let matrix = p.matrix.as_ref().unwrap();
        let has_members = |z: ZoneId| !p.zones.get(z).unwrap().node_ids.is_empty();
        let expected: usize = matrix
            .iter()
            .filter(|r| r.volume > 0.0 && has_members(r.o_zone_id) && has_members(r.d_zone_id))
            .map(|r| r.volume.ceil() as usize)
            .sum();

        assert!(expected > 0);
        assert_eq!(p.agents.len(), expected);
        assert_eq!(p.diagnostics.total_agents, expected);

        for a in &p.agents {
            assert!(p.zones.get(a.o_zone_id).unwrap().node_ids.contains(&a.o_node_id));
            assert!(p.zones.get(a.d_zone_id).unwrap().node_ids.contains(&a.d_node_id));
        }
    }

    #[test]
    fn same_seed_same_agents() {
        let mut a = grid_pipeline();
        let mut b = grid_pipeline();
        a.run(&mut NoopObserver).unwrap();
        b.run(&mut NoopObserver).unwrap();
        assert_eq!(a.agents, b.agents);
        assert_eq!(a.diagnostics, b.diagnostics);
    }

    #[test]
    fn observer_sees_every_stage() {
        let mut p = grid_pipeline();
        let mut rec = Recorder::default();
        p.run(&mut rec).unwrap();
        assert_eq!(rec.started, Stage::ALL);
        assert_eq!(rec.ended, Stage::ALL);
        assert!(rec.finished);
    }
}

#[cfg(test)]
mod stages {
    use gd_core::ZoneId;
    use gd_od::AccessibilityRecord;

    use super::{grid_config, grid_pipeline, network};
    use crate::{NoopObserver, PipelineBuilder, PipelineError, Stage};

    #[test]
    fn prerequisites_are_enforced() {
        let mut p = grid_pipeline();
        let err = p.run_gravity().unwrap_err();
        assert!(matches!(err, PipelineError::StageOrder { stage: Stage::Gravity, needs: Stage::Aggregate }));

        let err = p.sync_geometry().unwrap_err();
        assert!(matches!(err, PipelineError::StageOrder { stage: Stage::Sync, needs: Stage::Zoning }));

        p.build_zones().unwrap();
        p.sync_geometry().unwrap();
        let err = p.aggregate_zones().unwrap_err();
        assert!(matches!(err, PipelineError::StageOrder { needs: Stage::NodeRates, .. }));
    }

    #[test]
    fn rerunning_a_stage_discards_downstream_results() {
        let mut p = grid_pipeline();
        p.run(&mut NoopObserver).unwrap();
        assert!(p.is_done(Stage::Agents));

        p.build_zones().unwrap();
        assert!(p.is_done(Stage::Zoning));
        assert!(!p.is_done(Stage::Agents));
        assert!(p.matrix.is_none());
        assert!(p.agents.is_empty());
    }

    #[test]
    fn accessibility_overrides_are_counted() {
        let (nodes, pois) = network();
        let mut p = PipelineBuilder::new(grid_config(), nodes, pois)
            .accessibility(vec![AccessibilityRecord { o_zone_id: ZoneId(0), d_zone_id: ZoneId(1), distance: 5.0 }])
            .build()
            .unwrap();
        p.run(&mut NoopObserver).unwrap();

        assert_eq!(p.diagnostics.od_distances_overridden, 1);
        let m = p.matrix.as_ref().unwrap();
        assert_eq!(m.get(ZoneId(0), ZoneId(1)).unwrap().distance, 5.0);
    }
}

#[cfg(test)]
mod zone_sources {
    use gd_core::wkt::{self, Geometry};
    use gd_core::{NodeId, ZoneId};
    use gd_zone::{ZoneError, ZoneRecord};

    use super::{grid_config, network};
    use crate::{DemandConfig, NoopObserver, PipelineBuilder, PipelineError, ZoneSource, ZoningOptions};

    fn record(id: u64, wkt_text: &str) -> ZoneRecord {
        let geometry: Geometry = wkt::parse(wkt_text).unwrap();
        ZoneRecord { id: ZoneId(id), name: None, geometry: Some(geometry), centroid: None, extra: Default::default() }
    }

    #[test]
    fn zone_table_wins_over_grid() {
        let (nodes, pois) = network();
        let records = vec![
            record(10, "POLYGON ((0 0, 0.01 0, 0.01 0.02, 0 0.02, 0 0))"),
            record(20, "POLYGON ((0.01 0, 0.02 0, 0.02 0.02, 0.01 0.02, 0.01 0))"),
        ];
        let mut p = PipelineBuilder::new(grid_config(), nodes, pois).zones(records).build().unwrap();
        assert!(matches!(p.zone_source(), ZoneSource::Records(_)));
        p.run(&mut NoopObserver).unwrap();

        assert_eq!(p.diagnostics.zones, 2);
        assert_eq!(p.diagnostics.gates, 0);
        // The boundary node lies outside both polygons and there are no gates.
        assert_eq!(p.diagnostics.nodes_unassigned, 1);
        assert_eq!(p.zones.get(ZoneId(10)).unwrap().name, "10");
    }

    #[test]
    fn zones_from_node_zone_ids() {
        let (mut nodes, pois) = network();
        for n in &mut nodes {
            n.preassigned_zone = Some(ZoneId(if n.point.x < 0.01 { 1 } else { 2 }));
        }
        let config = DemandConfig { use_zone_id: true, ..DemandConfig::default() };
        let mut p = PipelineBuilder::new(config, nodes, pois).build().unwrap();
        assert_eq!(p.zone_source(), &ZoneSource::NodeZoneIds);
        p.run(&mut NoopObserver).unwrap();

        assert_eq!(p.zones.len(), 2);
        assert_eq!(p.diagnostics.nodes_preassigned, p.nodes.len());
        let zone_of = |id: u64| p.nodes.iter().find(|n| n.id == NodeId(id)).unwrap().zone_id;
        assert_eq!(zone_of(1), Some(ZoneId(1)));
        assert_eq!(zone_of(2), Some(ZoneId(2)));
    }

    #[test]
    fn grid_options_required_without_zone_table() {
        let (nodes, pois) = network();
        let err = PipelineBuilder::new(DemandConfig::default(), nodes, pois).build().err().unwrap();
        assert!(matches!(err, PipelineError::Zone(ZoneError::MissingZoning)));
    }

    #[test]
    fn ambiguous_grid_options_are_fatal() {
        let (nodes, pois) = network();
        let zoning = ZoningOptions { cell_width: Some(1.0), cell_height: Some(1.0), ..ZoningOptions::blocks(2, 2) };
        let config = DemandConfig { zoning, ..DemandConfig::default() };
        let records = vec![record(1, "POLYGON ((0 0, 1 0, 1 1, 0 1, 0 0))")];
        let err = PipelineBuilder::new(config, nodes, pois).zones(records).build().err().unwrap();
        assert!(matches!(err, PipelineError::Zone(ZoneError::AmbiguousZoning)));
    }
}

#[cfg(test)]
mod config {
    use gd_core::{DistanceUnit, GdError, TravelMode, TripPurpose};

    use crate::{DemandConfig, PipelineError};

    #[test]
    fn toml_with_defaults() {
        let config = DemandConfig::from_toml_str(
            r#"
            trip_purpose = 2
            seed = 7
            mode = "bike"
            distance_unit = "mile"

            [zoning]
            cell_width = 0.5
            cell_height = 0.5
            unit = "km"

            [node_rates]
            residential_production = 5.0
            "#,
        )
        .unwrap();

        assert_eq!(config.purpose().unwrap(), TripPurpose::HomeBasedOther);
        assert_eq!(config.mode, TravelMode::Bike);
        assert_eq!(config.distance_unit, DistanceUnit::Mile);
        assert_eq!(config.node_rates.residential_production, 5.0);
        assert_eq!(config.node_rates.boundary_production, 1000.0);
        assert_eq!(config.departure.base_hour, 7);
        assert_eq!(config.poi_area_cap, 90_000.0);
        assert!(config.zoning.gates);
        assert_eq!(config.friction().unwrap(), TripPurpose::HomeBasedOther.friction());
    }

    #[test]
    fn explicit_friction_overrides_purpose() {
        let config = DemandConfig::from_toml_str("[friction]\nalpha = 1.0\nbeta = 0.0\ngamma = -0.1\n").unwrap();
        let f = config.friction().unwrap();
        assert_eq!((f.alpha, f.beta, f.gamma), (1.0, 0.0, -0.1));
    }

    #[test]
    fn invalid_values_rejected() {
        let err = DemandConfig::from_toml_str("trip_purpose = 4").unwrap_err();
        assert!(matches!(err, PipelineError::Core(GdError::InvalidTripPurpose(4))));

        let err = DemandConfig::from_toml_str("num_threads = 0").unwrap_err();
        assert!(matches!(err, PipelineError::Config(_)));

        let err = DemandConfig::from_toml_str("no_such_option = 1").unwrap_err();
        assert!(matches!(err, PipelineError::Toml(_)));
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.toml");
        std::fs::write(&path, "seed = 3\n[zoning]\nnum_x_blocks = 4\nnum_y_blocks = 3\n").unwrap();
        let config = DemandConfig::load(&path).unwrap();
        assert_eq!(config.seed, 3);
        assert_eq!(config.zoning.num_x_blocks, Some(4));

        let err = DemandConfig::load(&dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, PipelineError::ConfigIo { .. }));
    }
}

#[cfg(test)]
mod files {
    use std::fs;

    use gd_io::InputFiles;
    use gd_output::CsvWriter;

    use super::grid_config;
    use crate::{NoopObserver, PipelineBuilder};

    const NODES: &str = "\
node_id,x_coord,y_coord,activity_type,is_boundary,poi_id
1,0.001,0.001,residential,0,
2,0.019,0.001,residential,0,
3,0.001,0.019,residential,0,
4,0.019,0.019,residential,0,
5,0.015,0.015,poi,0,100
6,0.010,0.030,,1,
";

    const POIS: &str = "\
poi_id,building,centroid,area
100,retail,POINT (0.015 0.015),2000
101,office,POINT (0.005 0.015),3000
";

    #[test]
    fn csv_in_csv_out() {
        let input = tempfile::tempdir().unwrap();
        fs::write(input.path().join("node.csv"), NODES).unwrap();
        fs::write(input.path().join("poi.csv"), POIS).unwrap();
        fs::write(input.path().join("accessibility.csv"), "o_zone_id,d_zone_id,dist_km\n0,3,2.5\n").unwrap();

        let files = InputFiles::discover(input.path()).unwrap();
        let mut p = PipelineBuilder::from_inputs(grid_config(), &files).unwrap().build().unwrap();
        p.run(&mut NoopObserver).unwrap();
        assert_eq!(p.nodes.len(), 6);
        assert_eq!(p.pois.len(), 2);
        assert_eq!(p.diagnostics.od_distances_overridden, 1);

        let out = tempfile::tempdir().unwrap();
        let mut writer = CsvWriter::new(out.path()).unwrap();
        p.write(&mut writer).unwrap();

        for name in ["node.csv", "poi.csv", "zone.csv", "zone_od_dist_table.csv", "demand.csv", "agent.csv"] {
            assert!(out.path().join(name).is_file(), "{name} missing");
        }
        let agents = csv::Reader::from_path(out.path().join("agent.csv")).unwrap().records().count();
        assert_eq!(agents, p.agents.len());
    }

    #[test]
    fn rerun_on_same_input_dir() {
        let input = tempfile::tempdir().unwrap();
        fs::write(input.path().join("node.csv"), NODES).unwrap();
        fs::write(input.path().join("poi.csv"), POIS).unwrap();

        let mut agent_counts = Vec::new();
        for _ in 0..2 {
            let files = InputFiles::discover(input.path()).unwrap();
            assert_eq!(files.zone, None);
            let mut p = PipelineBuilder::from_inputs(grid_config(), &files).unwrap().build().unwrap();
            p.run(&mut NoopObserver).unwrap();
            p.write(&mut CsvWriter::beside_inputs(input.path()).unwrap()).unwrap();
            agent_counts.push(p.agents.len());
        }

        assert_eq!(agent_counts[0], agent_counts[1]);
        assert_eq!(fs::read_to_string(input.path().join("node.csv")).unwrap(), NODES);
        assert!(input.path().join(gd_output::DEFAULT_OUTPUT_DIR).join("zone.csv").is_file());
    }

    #[test]
    fn written_grid_zones_read_back_as_zone_table() {
        let input = tempfile::tempdir().unwrap();
        fs::write(input.path().join("node.csv"), NODES).unwrap();
        fs::write(input.path().join("poi.csv"), POIS).unwrap();

        let mut config = grid_config();
        config.zoning.gates = false;
        let files = InputFiles::discover(input.path()).unwrap();
        let mut p = PipelineBuilder::from_inputs(config, &files).unwrap().build().unwrap();
        p.run(&mut NoopObserver).unwrap();

        let out = tempfile::tempdir().unwrap();
        p.write(&mut CsvWriter::new(out.path()).unwrap()).unwrap();

        let records = gd_io::load_zones(&out.path().join("zone.csv")).unwrap();
        let zones = gd_zone::zones_from_records(records).unwrap();
        assert_eq!(zones.len(), 4);
        assert!(zones.has_polygons());
        let names: Vec<_> = zones.iter().map(|z| z.name.as_str()).collect();
        assert_eq!(names, ["A0", "A1", "B0", "B1"]);
    }

    #[test]
    fn agent_table_uses_one_letter_codes() {
        let input = tempfile::tempdir().unwrap();
        fs::write(input.path().join("node.csv"), NODES).unwrap();
        fs::write(input.path().join("poi.csv"), POIS).unwrap();

        let files = InputFiles::discover(input.path()).unwrap();
        let mut p = PipelineBuilder::from_inputs(grid_config(), &files).unwrap().build().unwrap();
        p.run(&mut NoopObserver).unwrap();
        assert!(!p.agents.is_empty());

        let out = tempfile::tempdir().unwrap();
        p.write(&mut CsvWriter::new(out.path()).unwrap()).unwrap();

        let mut rdr = csv::Reader::from_path(out.path().join("agent.csv")).unwrap();
        for rec in rdr.records() {
            let rec = rec.unwrap();
            assert_eq!(&rec[1], "v");
            assert!(rec[6].starts_with("LINESTRING(") && rec[6].ends_with(')'), "got {}", &rec[6]);
            assert_eq!(rec[6].matches(' ').count(), 2);
        }
    }
}
