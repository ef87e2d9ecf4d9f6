//! `poi.csv` reader.
//!
//! # CSV format
//!
//! ```csv
//! poi_id,building,centroid,area,geometry
//! 17,retail,POINT (-111.92 33.42),2500,
//! 18,office,POINT (-111.91 33.41),,"POLYGON ((-111.911 33.409, ...))"
//! ```
//!
//! `poi_id` and `centroid` are required, and at least one of `area` and
//! `geometry` must be present.  A row with an empty or zero `area` and a
//! polygon `geometry` gets its area from the footprint.

use std::io::Read;
use std::path::Path;

use gd_core::wkt::{self, Geometry};
use gd_core::{DistanceUnit, Poi, PoiId};

use crate::columns::{Columns, dedupe_by_key};
use crate::error::open;
use crate::{LoadError, LoadResult};

const FILE: &str = "poi.csv";

/// Reader knobs for `poi.csv`.
#[derive(Clone, Debug, PartialEq)]
pub struct PoiOptions {
    /// Areas above this are treated as data errors and set to 0.
    pub area_cap: f64,
    /// Linear unit footprint areas are derived in (`Meter` gives m²).
    pub area_unit: DistanceUnit,
}

impl Default for PoiOptions {
    fn default() -> Self {
        Self { area_cap: 90_000.0, area_unit: DistanceUnit::Meter }
    }
}

/// Load POIs from a CSV file.
pub fn load_pois(path: &Path, opts: &PoiOptions) -> LoadResult<Vec<Poi>> {
    load_pois_reader(open(path)?, opts)
}

/// Like [`load_pois`] but accepts any `Read` source.
pub fn load_pois_reader<R: Read>(reader: R, opts: &PoiOptions) -> LoadResult<Vec<Poi>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let cols = Columns::new(FILE, csv_reader.headers()?);

    let id_col = cols.required("poi_id")?;
    let centroid_col = cols.required("centroid")?;
    let area_col = cols.optional("area");
    let geometry_col = cols.optional("geometry");
    if area_col.is_none() && geometry_col.is_none() {
        return Err(LoadError::MissingColumn { file: FILE, column: "area" });
    }
    let building_col = cols.optional("building");
    let extras = cols.extras(&[Some(id_col), Some(centroid_col), area_col, geometry_col, building_col]);

    let mut pois = Vec::new();
    let mut capped = 0usize;
    for (i, record) in csv_reader.records().enumerate() {
        let record = record?;
        let row = cols.row(i + 1, &record);
        let geo_err = |source| LoadError::Geometry { file: FILE, row: row.number(), source };

        let centroid = wkt::parse_point(row.text(centroid_col)).map_err(geo_err)?;
        let footprint = match row.opt_text(geometry_col) {
            Some(text) => match wkt::parse(text).map_err(geo_err)? {
                Geometry::Polygon(p) => Some(p),
                Geometry::Point(_) => None,
            },
            None => None,
        };

        let mut area = row.opt_f64(area_col)?.unwrap_or(0.0);
        if area <= 0.0 {
            area = footprint.as_ref().map_or(0.0, |p| p.projected_area(opts.area_unit));
        }
        if area > opts.area_cap {
            capped += 1;
            area = 0.0;
        }

        let building = row.opt_text(building_col).unwrap_or("");
        let mut poi = Poi::new(PoiId(row.id(id_col)?), centroid, building, area);
        poi.footprint = footprint;
        poi.extra = row.extra(&extras);
        pois.push(poi);
    }

    if capped > 0 {
        log::warn!("{FILE}: {capped} POIs exceed the area cap of {} and were zeroed", opts.area_cap);
    }
    let pois = dedupe_by_key(pois, |p| p.id, FILE);
    log::info!("{FILE}: {} POIs", pois.len());
    Ok(pois)
}
