//! `node.csv` reader.
//!
//! # CSV format
//!
//! ```csv
//! node_id,x_coord,y_coord,activity_type,is_boundary,poi_id,zone_id
//! 1,-111.93,33.42,residential,0,,
//! 2,-111.92,33.42,poi,0,17,
//! 3,-111.95,33.40,boundary,1,,
//! ```
//!
//! `node_id`, `x_coord` and `y_coord` are required; the rest are optional
//! and any further columns are carried in `Node::extra`.

use std::io::Read;
use std::path::Path;

use gd_core::{Node, NodeId, Point, PoiId, ZoneId};

use crate::columns::{Columns, dedupe_by_key};
use crate::error::open;
use crate::LoadResult;

const FILE: &str = "node.csv";

/// Load nodes from a CSV file.
pub fn load_nodes(path: &Path) -> LoadResult<Vec<Node>> {
    load_nodes_reader(open(path)?)
}

/// Like [`load_nodes`] but accepts any `Read` source.
pub fn load_nodes_reader<R: Read>(reader: R) -> LoadResult<Vec<Node>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let cols = Columns::new(FILE, csv_reader.headers()?);

    let id_col = cols.required("node_id")?;
    let x_col = cols.required("x_coord")?;
    let y_col = cols.required("y_coord")?;
    let activity_col = cols.optional("activity_type");
    let boundary_col = cols.optional("is_boundary");
    let poi_col = cols.optional("poi_id");
    let zone_col = cols.optional("zone_id");
    let extras = cols.extras(&[
        Some(id_col),
        Some(x_col),
        Some(y_col),
        activity_col,
        boundary_col,
        poi_col,
        zone_col,
    ]);

    let mut nodes = Vec::new();
    for (i, record) in csv_reader.records().enumerate() {
        let record = record?;
        let row = cols.row(i + 1, &record);

        let point = Point::new(row.f64(x_col)?, row.f64(y_col)?);
        let mut node = Node::new(NodeId(row.id(id_col)?), point)
            .with_activity(row.opt_text(activity_col).unwrap_or(""))
            .with_boundary_flag(row.flag(boundary_col)?);
        node.poi_id = row.opt_id(poi_col)?.map(PoiId);
        node.preassigned_zone = row.opt_id(zone_col)?.map(ZoneId);
        node.extra = row.extra(&extras);
        nodes.push(node);
    }

    let nodes = dedupe_by_key(nodes, |n| n.id, FILE);
    log::info!("{FILE}: {} nodes", nodes.len());
    Ok(nodes)
}
