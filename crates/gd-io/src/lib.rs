//! `gd-io`: readers for the input tables.
//!
//! Every reader comes in two forms: `load_*` takes a path, `load_*_reader`
//! takes any `Read` source (a `std::io::Cursor` in tests).
//!
//! # Crate layout
//!
//! | Module            | Reads                                                 |
//! |-------------------|-------------------------------------------------------|
//! | [`input`]         | `InputFiles`: required/optional file discovery        |
//! | [`node`]          | `node.csv` → `Vec<Node>`                              |
//! | [`poi`]           | `poi.csv` → `Vec<Poi>` (area derivation and cap)      |
//! | [`zone`]          | `zone.csv` → `Vec<ZoneRecord>`                        |
//! | [`trip_rate`]     | `trip_rate.csv` → `TripRateTable`                     |
//! | [`accessibility`] | `accessibility.csv` → `Vec<AccessibilityRecord>`      |
//! | [`error`]         | `LoadError`, `LoadResult<T>`                          |
//!
//! Columns not in a table's core schema are kept in the record's
//! `extra` map.  Rows repeating an id replace the earlier row in place.

pub mod accessibility;
pub mod error;
pub mod input;
pub mod node;
pub mod poi;
pub mod trip_rate;
pub mod zone;

mod columns;


pub use accessibility::{load_accessibility, load_accessibility_reader};
pub use error::{LoadError, LoadResult};
pub use input::InputFiles;
pub use node::{load_nodes, load_nodes_reader};
pub use poi::{PoiOptions, load_pois, load_pois_reader};
pub use trip_rate::{load_trip_rates, load_trip_rates_reader};
pub use zone::{load_zones, load_zones_reader};
