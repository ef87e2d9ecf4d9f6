//! `gd-od`: origin-destination matrices.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                      |
//! |-------------|---------------------------------------------------------------|
//! | [`matrix`]  | `OdRecord`, `OdMatrix`, `DistanceMatrixBuilder`, accessibility overrides |
//! | [`gravity`] | `GravityModel`, `GravityReport`                               |
//! | [`error`]   | `OdError`, `OdResult<T>`                                      |
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                      |
//! |------------|-------------------------------------------------------------|
//! | `parallel` | Computes zone-pair distances on Rayon's thread pool.        |

pub mod error;
pub mod gravity;
pub mod matrix;

#[cfg(test)]
mod tests;

pub use error::{OdError, OdResult};
pub use gravity::{DENOMINATOR_FLOOR, GravityModel, GravityReport};
pub use matrix::{AccessibilityRecord, DistanceMatrixBuilder, OdMatrix, OdRecord};
