//! `gd-core`: foundational types for the grid2demand workspace.
//!
//! This crate is a dependency of every other `gd-*` crate.  It has no `gd-*`
//! dependencies and keeps external ones small (`geo` for polygon predicates,
//! `rand`, `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`ids`]         | `NodeId`, `PoiId`, `ZoneId`, `AgentId`                    |
//! | [`geo`]         | `Point`, `Bounds`, `LineString`, haversine distance       |
//! | [`polygon`]     | `Polygon` (containment, centroid, bounds, projected area)|
//! | [`wkt`]         | Well-known-text parsing and formatting                    |
//! | [`units`]       | `DistanceUnit`                                            |
//! | [`network`]     | `Node`, `Poi`, `ActivityType`, `TripRate`, `ExtraFields`  |
//! | [`purpose`]     | `TripPurpose`, `FrictionCoefficients`                     |
//! | [`rng`]         | `DemandRng`                                               |
//! | [`time`]        | `DepartureWindow`, `DepartureTime`                        |
//! | [`transport`]   | `TravelMode`                                              |
//! | [`error`]       | `GdError`, `GdResult`                                     |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to config-facing value types.|

pub mod error;
pub mod geo;
pub mod ids;
pub mod network;
pub mod polygon;
pub mod purpose;
pub mod rng;
pub mod time;
pub mod transport;
pub mod units;
pub mod wkt;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{GdError, GdResult};
pub use geo::{Bounds, LineString, Point};
pub use ids::{AgentId, NodeId, PoiId, ZoneId};
pub use network::{ActivityType, ExtraFields, Node, Poi, TripRate};
pub use polygon::Polygon;
pub use purpose::{FrictionCoefficients, TripPurpose};
pub use rng::DemandRng;
pub use time::{DepartureTime, DepartureWindow};
pub use transport::TravelMode;
pub use units::DistanceUnit;
