//! `zone.csv` reader (external TAZ table).
//!
//! # CSV format
//!
//! ```csv
//! zone_id,name,geometry
//! 1,downtown,"POLYGON ((0 0, 1 0, 1 1, 0 1, 0 0))"
//! ```
//!
//! or, for centroid zones:
//!
//! ```csv
//! zone_id,x_coord,y_coord
//! 1,-111.93,33.42
//! ```
//!
//! Only syntax is checked here; whether rows agree on polygon vs centroid
//! is decided by [`gd_zone::zones_from_records`].

use std::io::Read;
use std::path::Path;

use gd_core::{Point, ZoneId, wkt};
use gd_zone::ZoneRecord;

use crate::columns::{Columns, dedupe_by_key};
use crate::error::open;
use crate::{LoadError, LoadResult};

const FILE: &str = "zone.csv";

/// Load zone records from a CSV file.
pub fn load_zones(path: &Path) -> LoadResult<Vec<ZoneRecord>> {
    load_zones_reader(open(path)?)
}

/// Like [`load_zones`] but accepts any `Read` source.
pub fn load_zones_reader<R: Read>(reader: R) -> LoadResult<Vec<ZoneRecord>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let cols = Columns::new(FILE, csv_reader.headers()?);

    let id_col = cols.required("zone_id")?;
    let geometry_col = cols.optional("geometry");
    let x_col = cols.optional("x_coord");
    let y_col = cols.optional("y_coord");
    let name_col = cols.optional("name");

    let has_centroid = x_col.is_some() && y_col.is_some();
    if geometry_col.is_none() && !has_centroid {
        return Err(LoadError::MissingColumn { file: FILE, column: "geometry" });
    }
    let extras = cols.extras(&[Some(id_col), geometry_col, x_col, y_col, name_col]);

    let mut records = Vec::new();
    for (i, record) in csv_reader.records().enumerate() {
        let record = record?;
        let row = cols.row(i + 1, &record);

        let geometry = row
            .opt_text(geometry_col)
            .map(wkt::parse)
            .transpose()
            .map_err(|source| LoadError::Geometry { file: FILE, row: row.number(), source })?;
        let centroid = match (row.opt_f64(x_col)?, row.opt_f64(y_col)?) {
            (Some(x), Some(y)) => Some(Point::new(x, y)),
            _ => None,
        };

        records.push(ZoneRecord {
            id: ZoneId(row.id(id_col)?),
            name: row.opt_text(name_col).map(str::to_owned),
            geometry,
            centroid,
            extra: row.extra(&extras),
        });
    }

    let records = dedupe_by_key(records, |r| r.id, FILE);
    log::info!("{FILE}: {} zones", records.len());
    Ok(records)
}
