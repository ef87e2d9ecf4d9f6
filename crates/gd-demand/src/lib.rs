//! `gd-demand`: how much travel each place generates.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                    |
//! |----------------|-------------------------------------------------------------|
//! | [`rates`]      | `TripRateTable`, built-in defaults, `TripRateGenerator`     |
//! | [`production`] | `NodeRates`, `assign_node_rates`                            |
//! | [`aggregate`]  | `ZoneAggregator`, `AggregateReport`                         |
//! | [`error`]      | `DemandError`, `DemandResult<T>`                            |
//!
//! The stages run in that order: POIs get rates, nodes get production and
//! attraction (POI nodes through their POI), and zones sum their members.

pub mod aggregate;
pub mod error;
pub mod production;
pub mod rates;


pub use aggregate::{AggregateReport, ZoneAggregator};
pub use error::{DemandError, DemandResult};
pub use production::{NodeRates, assign_node_rates};
pub use rates::{DEFAULT_FALLBACK_RATE, RateEntry, RateReport, TripRateGenerator, TripRateTable};
