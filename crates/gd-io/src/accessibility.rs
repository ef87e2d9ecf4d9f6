//! `accessibility.csv` reader: externally supplied zone-to-zone distances.
//!
//! # CSV format
//!
//! ```csv
//! o_zone_id,d_zone_id,distance
//! 1,2,10.5
//! ```
//!
//! The distance column may also be named `dist_km`.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use gd_core::ZoneId;
use gd_od::AccessibilityRecord;

use crate::LoadResult;
use crate::error::open;

#[derive(Debug, Deserialize)]
struct AccessRow {
    o_zone_id: u64,
    d_zone_id: u64,
    #[serde(alias = "dist_km")]
    distance: f64,
}

/// Load distance overrides from a CSV file.
pub fn load_accessibility(path: &Path) -> LoadResult<Vec<AccessibilityRecord>> {
    load_accessibility_reader(open(path)?)
}

/// Like [`load_accessibility`] but accepts any `Read` source.
pub fn load_accessibility_reader<R: Read>(reader: R) -> LoadResult<Vec<AccessibilityRecord>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let records = csv_reader
        .deserialize::<AccessRow>()
        .map(|row| {
            let row = row?;
            Ok(AccessibilityRecord {
                o_zone_id: ZoneId(row.o_zone_id),
                d_zone_id: ZoneId(row.d_zone_id),
                distance: row.distance,
            })
        })
        .collect::<LoadResult<Vec<_>>>()?;

    log::info!("accessibility.csv: {} distance overrides", records.len());
    Ok(records)
}
