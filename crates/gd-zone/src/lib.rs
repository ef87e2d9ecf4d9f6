//! `gd-zone`: analysis zones and the spatial join that fills them.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                       |
//! |------------|----------------------------------------------------------------|
//! | [`zone`]   | `Zone`, `ZoneShape`, `ZoneKind`, ordered `ZoneSet`             |
//! | [`grid`]   | `ZoningSpec`, `GridBuilder` (cells + gates), `row_label`       |
//! | [`taz`]    | `ZoneRecord`, `zones_from_records`, `zones_from_node_ids`      |
//! | [`sync`]   | `GeometrySynchronizer`, `ZoneIndex`, `SyncReport`              |
//! | [`error`]  | `ZoneError`, `ZoneResult<T>`                                   |
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                      |
//! |------------|-------------------------------------------------------------|
//! | `parallel` | Matches entities to zones on Rayon's thread pool.           |
//! | `serde`    | Derives `Serialize`/`Deserialize` on `ZoningSpec`.          |

pub mod error;
pub mod grid;
pub mod sync;
pub mod taz;
pub mod zone;


pub use error::{ZoneError, ZoneResult};
pub use grid::{GridBuilder, ZoningSpec, row_label};
pub use sync::{GeometrySynchronizer, SyncReport, ZoneIndex};
pub use taz::{ZoneRecord, zones_from_node_ids, zones_from_records};
pub use zone::{Zone, ZoneKind, ZoneSet, ZoneShape};
