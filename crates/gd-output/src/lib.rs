//! `gd-output`: writers for the tables the demand pipeline produces.
//!
//! | File                       | Contents                                        |
//! |----------------------------|-------------------------------------------------|
//! | `node.csv`                 | nodes with zone, production and attraction      |
//! | `poi.csv`                  | POIs with trip rates and zone                   |
//! | `zone.csv`                 | zones with geometry, members and totals         |
//! | `zone_od_dist_table.csv`   | every ordered zone pair and its distance        |
//! | `demand.csv`               | OD pairs with non-zero volume                   |
//! | `agent.csv`                | one row per sampled agent                       |
//!
//! [`CsvWriter`] implements [`OutputWriter`].  Without an explicit directory
//! the tables go to `<input>/output` ([`DEFAULT_OUTPUT_DIR`]), never next to
//! the input tables they would replace.
//!
//! # Usage
//!
//! ```rust,ignore
//! use gd_output::{CsvWriter, OutputWriter};
//!
//! let mut writer = CsvWriter::new(Path::new("./output"))?;
//! writer.write_demand(&matrix)?;
//! writer.write_agents(&agents)?;
//! writer.finish()?;
//! ```

pub mod csv;
pub mod error;
pub mod writer;

#[cfg(test)]
mod tests;

pub use csv::{CsvWriter, DEFAULT_OUTPUT_DIR};
pub use error::{OutputError, OutputResult};
pub use writer::OutputWriter;
