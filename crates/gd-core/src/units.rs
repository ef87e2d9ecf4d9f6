//! Linear units used for cell sizes and reported distances.

use std::fmt;
use std::str::FromStr;

use crate::GdError;

/// Unit in which great-circle distances are reported.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DistanceUnit {
    #[default]
    Km,
    Meter,
    Mile,
}

impl DistanceUnit {
    /// Mean Earth radius expressed in this unit.
    pub fn earth_radius(self) -> f64 {
        match self {
            DistanceUnit::Km => 6_371.0,
            DistanceUnit::Meter => 6_371_000.0,
            DistanceUnit::Mile => 3_960.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DistanceUnit::Km => "km",
            DistanceUnit::Meter => "meter",
            DistanceUnit::Mile => "mile",
        }
    }
}

impl FromStr for DistanceUnit {
    type Err = GdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "km" => Ok(DistanceUnit::Km),
            "meter" | "m" => Ok(DistanceUnit::Meter),
            "mile" => Ok(DistanceUnit::Mile),
            other => Err(GdError::UnknownUnit(other.to_owned())),
        }
    }
}

impl fmt::Display for DistanceUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
