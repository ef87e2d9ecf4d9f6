//! Travel mode tag carried by every sampled agent.

use std::fmt;
use std::str::FromStr;

use crate::GdError;

/// The mode an agent is assumed to travel by.  It only labels output rows;
/// the demand model itself is mode-agnostic.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TravelMode {
    /// Private vehicle.
    #[default]
    Auto,
    /// Bicycle.
    Bike,
    /// On foot.
    Walk,
}

impl TravelMode {
    /// Configuration spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            TravelMode::Auto => "auto",
            TravelMode::Bike => "bike",
            TravelMode::Walk => "walk",
        }
    }

    /// One-letter code written to the `agent_type` column of `agent.csv`:
    /// `v` (vehicle), `b` (bike) or `p` (pedestrian).
    pub fn agent_code(self) -> &'static str {
        match self {
            TravelMode::Auto => "v",
            TravelMode::Bike => "b",
            TravelMode::Walk => "p",
        }
    }
}

impl FromStr for TravelMode {
    type Err = GdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" | "car" => Ok(TravelMode::Auto),
            "bike" => Ok(TravelMode::Bike),
            "walk" => Ok(TravelMode::Walk),
            other => Err(GdError::UnknownMode(other.to_owned())),
        }
    }
}

impl fmt::Display for TravelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
