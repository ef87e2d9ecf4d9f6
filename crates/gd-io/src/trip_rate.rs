//! `trip_rate.csv` reader.
//!
//! # CSV format
//!
//! ```csv
//! building,unit_of_measure,trip_purpose,production_rate1,attraction_rate1,production_rate2,attraction_rate2
//! retail,"1,000 Sq. Ft. GFA",1,3.2,6.84,,
//! ```
//!
//! Rate columns are optional per purpose; a blank cell means "no rate for
//! this purpose" and the generator falls back for it.  Several rows for the
//! same building merge, later non-blank cells winning.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use gd_demand::TripRateTable;

use crate::LoadResult;
use crate::error::open;

#[derive(Debug, Deserialize)]
struct RateRow {
    building: String,
    #[serde(default)]
    unit_of_measure: Option<String>,
    #[serde(default)]
    production_rate1: Option<f64>,
    #[serde(default)]
    production_rate2: Option<f64>,
    #[serde(default)]
    production_rate3: Option<f64>,
    #[serde(default)]
    attraction_rate1: Option<f64>,
    #[serde(default)]
    attraction_rate2: Option<f64>,
    #[serde(default)]
    attraction_rate3: Option<f64>,
}

/// Load a trip-rate table from a CSV file.
pub fn load_trip_rates(path: &Path) -> LoadResult<TripRateTable> {
    load_trip_rates_reader(open(path)?)
}

/// Like [`load_trip_rates`] but accepts any `Read` source.
pub fn load_trip_rates_reader<R: Read>(reader: R) -> LoadResult<TripRateTable> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut table = TripRateTable::new();

    for result in csv_reader.deserialize::<RateRow>() {
        let row = result?;
        let building = row.building.trim();
        let mut entry = table.get(building).cloned().unwrap_or_default();

        if let Some(unit) = row.unit_of_measure.filter(|u| !u.trim().is_empty()) {
            entry.unit_of_measure = unit;
        }
        merge(&mut entry.production, [row.production_rate1, row.production_rate2, row.production_rate3]);
        merge(&mut entry.attraction, [row.attraction_rate1, row.attraction_rate2, row.attraction_rate3]);
        table.insert(building, entry)?;
    }

    log::info!("trip_rate.csv: {} building types", table.len());
    Ok(table)
}

fn merge(into: &mut [Option<f64>; 3], from: [Option<f64>; 3]) {
    for (slot, value) in into.iter_mut().zip(from) {
        if value.is_some() {
            *slot = value;
        }
    }
}
