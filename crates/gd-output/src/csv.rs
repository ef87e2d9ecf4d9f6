//! CSV output backend.

use std::collections::BTreeSet;
use std::fmt::Display;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

use csv::Writer;

use gd_agent::Agent;
use gd_core::wkt::polygon_to_wkt;
use gd_core::{ExtraFields, Node, Poi};
use gd_od::OdMatrix;
use gd_zone::{ZoneSet, ZoneShape};

use crate::OutputResult;
use crate::writer::OutputWriter;

pub const NODE_FILE: &str = "node.csv";
pub const POI_FILE: &str = "poi.csv";
pub const ZONE_FILE: &str = "zone.csv";
pub const OD_DIST_FILE: &str = "zone_od_dist_table.csv";
pub const DEMAND_FILE: &str = "demand.csv";
pub const AGENT_FILE: &str = "agent.csv";

/// Subdirectory of the input directory used when no output directory is given.
pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// Writes each table to its own CSV file in one directory.
pub struct CsvWriter {
    dir: PathBuf,
    open: Vec<Writer<File>>,
    finished: bool,
}

impl CsvWriter {
    /// Use `dir` for output, creating it if needed.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        fs::create_dir_all(dir)?;
        Ok(Self { dir: dir.to_path_buf(), open: Vec::new(), finished: false })
    }

    /// Use `<input_dir>/output`, so the input tables are never replaced.
    pub fn beside_inputs(input_dir: &Path) -> OutputResult<Self> {
        Self::new(&input_dir.join(DEFAULT_OUTPUT_DIR))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Create `name` and write its header row.
    fn create(&self, name: &str, header: &[String]) -> OutputResult<Writer<File>> {
        let path = self.dir.join(name);
        log::debug!("writing {}", path.display());
        let mut w = Writer::from_path(path)?;
        w.write_record(header)?;
        Ok(w)
    }

    fn keep(&mut self, w: Writer<File>) {
        self.finished = false;
        self.open.push(w);
    }
}

fn opt<T: Display>(v: Option<T>) -> String {
    v.map_or_else(String::new, |v| v.to_string())
}

fn header(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| (*s).to_owned()).collect()
}

/// Sorted union of the extra column names across `maps`.
fn extra_columns<'a>(maps: impl Iterator<Item = &'a ExtraFields>) -> Vec<String> {
    maps.flat_map(|m| m.keys().cloned()).collect::<BTreeSet<_>>().into_iter().collect()
}

fn extra_values(extra: &ExtraFields, columns: &[String]) -> impl Iterator<Item = String> {
    columns.iter().map(|c| extra.get(c).cloned().unwrap_or_default())
}

impl OutputWriter for CsvWriter {
    fn write_nodes(&mut self, nodes: &[Node]) -> OutputResult<()> {
        let extras = extra_columns(nodes.iter().map(|n| &n.extra));
        let mut cols = header(&[
            "node_id",
            "x_coord",
            "y_coord",
            "activity_type",
            "is_boundary",
            "poi_id",
            "zone_id",
            "production",
            "attraction",
        ]);
        cols.extend(extras.iter().cloned());

        let mut w = self.create(NODE_FILE, &cols)?;
        for n in nodes {
            let mut row = vec![
                n.id.raw().to_string(),
                n.point.x.to_string(),
                n.point.y.to_string(),
                n.activity_label.clone(),
                (n.is_boundary() as u8).to_string(),
                opt(n.poi_id.map(|id| id.raw())),
                opt(n.zone_id.map(|id| id.raw())),
                n.production.to_string(),
                n.attraction.to_string(),
            ];
            row.extend(extra_values(&n.extra, &extras));
            w.write_record(&row)?;
        }
        self.keep(w);
        Ok(())
    }

    fn write_pois(&mut self, pois: &[Poi]) -> OutputResult<()> {
        let extras = extra_columns(pois.iter().map(|p| &p.extra));
        let mut cols = header(&[
            "poi_id",
            "building",
            "centroid",
            "area",
            "trip_purpose",
            "production_rate",
            "attraction_rate",
            "unit_of_measure",
            "production_rate_matched",
            "attraction_rate_matched",
            "production",
            "attraction",
            "zone_id",
            "geometry",
        ]);
        cols.extend(extras.iter().cloned());

        let mut w = self.create(POI_FILE, &cols)?;
        for p in pois {
            let rate = &p.trip_rate;
            let mut row = vec![
                p.id.raw().to_string(),
                p.building.clone(),
                p.centroid.to_string(),
                p.area.to_string(),
                rate.purpose.to_string(),
                rate.production_rate.to_string(),
                rate.attraction_rate.to_string(),
                rate.unit_of_measure.clone(),
                (rate.production_matched as u8).to_string(),
                (rate.attraction_matched as u8).to_string(),
                p.production().to_string(),
                p.attraction().to_string(),
                opt(p.zone_id.map(|id| id.raw())),
                p.footprint.as_ref().map(polygon_to_wkt).unwrap_or_default(),
            ];
            row.extend(extra_values(&p.extra, &extras));
            w.write_record(&row)?;
        }
        self.keep(w);
        Ok(())
    }

    fn write_zones(&mut self, zones: &ZoneSet) -> OutputResult<()> {
        let cols = header(&[
            "zone_id",
            "name",
            "kind",
            "x_coord",
            "y_coord",
            "centroid",
            "geometry",
            "node_count",
            "poi_count",
            "production",
            "attraction",
        ]);
        let mut w = self.create(ZONE_FILE, &cols)?;
        for z in zones {
            // Polygon rows leave x_coord/y_coord empty; `centroid` carries the point.
            let (geometry, x, y) = match &z.shape {
                ZoneShape::Area(poly) => (polygon_to_wkt(poly), String::new(), String::new()),
                ZoneShape::Centroid => (String::new(), z.centroid.x.to_string(), z.centroid.y.to_string()),
            };
            w.write_record(&[
                z.id.raw().to_string(),
                z.name.clone(),
                z.kind.as_str().to_owned(),
                x,
                y,
                z.centroid.to_string(),
                geometry,
                z.node_ids.len().to_string(),
                z.poi_ids.len().to_string(),
                z.production.to_string(),
                z.attraction.to_string(),
            ])?;
        }
        self.keep(w);
        Ok(())
    }

    fn write_od_distances(&mut self, matrix: &OdMatrix) -> OutputResult<()> {
        let dist = format!("dist_{}", matrix.unit().as_str());
        let cols = header(&["o_zone_id", "o_zone_name", "d_zone_id", "d_zone_name", dist.as_str(), "geometry"]);
        let mut w = self.create(OD_DIST_FILE, &cols)?;
        for r in matrix.iter() {
            w.write_record(&[
                r.o_zone_id.raw().to_string(),
                r.o_zone_name.clone(),
                r.d_zone_id.raw().to_string(),
                r.d_zone_name.clone(),
                r.distance.to_string(),
                r.geometry.to_string(),
            ])?;
        }
        self.keep(w);
        Ok(())
    }

    fn write_demand(&mut self, matrix: &OdMatrix) -> OutputResult<()> {
        let dist = format!("dist_{}", matrix.unit().as_str());
        let cols = header(&["o_zone_id", "o_zone_name", "d_zone_id", "d_zone_name", dist.as_str(), "volume", "geometry"]);
        let mut w = self.create(DEMAND_FILE, &cols)?;
        let mut rows = 0usize;
        for r in matrix.iter().filter(|r| r.volume != 0.0) {
            w.write_record(&[
                r.o_zone_id.raw().to_string(),
                r.o_zone_name.clone(),
                r.d_zone_id.raw().to_string(),
                r.d_zone_name.clone(),
                r.distance.to_string(),
                r.volume.to_string(),
                r.geometry.to_string(),
            ])?;
            rows += 1;
        }
        log::info!("{DEMAND_FILE}: {rows} OD pairs with volume");
        self.keep(w);
        Ok(())
    }

    fn write_agents(&mut self, agents: &[Agent]) -> OutputResult<()> {
        let cols = header(&[
            "agent_id",
            "agent_type",
            "o_zone_id",
            "d_zone_id",
            "o_node_id",
            "d_node_id",
            "geometry",
            "departure_time",
        ]);
        let mut w = self.create(AGENT_FILE, &cols)?;
        for a in agents {
            w.write_record(&[
                a.id.raw().to_string(),
                a.mode.agent_code().to_owned(),
                a.o_zone_id.raw().to_string(),
                a.d_zone_id.raw().to_string(),
                a.o_node_id.raw().to_string(),
                a.d_node_id.raw().to_string(),
                a.geometry.to_string(),
                a.departure_time.to_string(),
            ])?;
        }
        self.keep(w);
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        for w in &mut self.open {
            w.flush()?;
        }
        log::info!("wrote {} tables to {}", self.open.len(), self.dir.display());
        Ok(())
    }
}
