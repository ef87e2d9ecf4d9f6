//! Trip purposes and their gravity-model friction coefficients.

use std::fmt;

use crate::{GdError, GdResult};

/// Coefficients of the friction function `α · d^β · e^(γ·d)`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrictionCoefficients {
    pub alpha: f64,
    pub beta: f64,
    pub gamma: f64,
}

impl FrictionCoefficients {
    /// Friction at distance `d`; zero distance yields 0 so that intra-zone
    /// pairs receive no volume.
    #[inline]
    pub fn friction(&self, d: f64) -> f64 {
        if d == 0.0 {
            0.0
        } else {
            self.alpha * d.powf(self.beta) * (self.gamma * d).exp()
        }
    }
}

/// Trip purpose selector (`trip_purpose` = 1, 2 or 3).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum TripPurpose {
    #[default]
    HomeBasedWork,
    HomeBasedOther,
    NonHomeBased,
}

impl TripPurpose {
    pub const ALL: [TripPurpose; 3] =
        [TripPurpose::HomeBasedWork, TripPurpose::HomeBasedOther, TripPurpose::NonHomeBased];

    /// Parse the numeric selector used in configuration and rate tables.
    pub fn from_code(code: u8) -> GdResult<Self> {
        match code {
            1 => Ok(TripPurpose::HomeBasedWork),
            2 => Ok(TripPurpose::HomeBasedOther),
            3 => Ok(TripPurpose::NonHomeBased),
            other => Err(GdError::InvalidTripPurpose(other)),
        }
    }

    pub fn code(self) -> u8 {
        match self {
            TripPurpose::HomeBasedWork => 1,
            TripPurpose::HomeBasedOther => 2,
            TripPurpose::NonHomeBased => 3,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            TripPurpose::HomeBasedWork => "home-based-work",
            TripPurpose::HomeBasedOther => "home-based-other",
            TripPurpose::NonHomeBased => "non-home-based",
        }
    }

    /// Documented default friction coefficients for this purpose.
    pub fn friction(self) -> FrictionCoefficients {
        let (alpha, beta, gamma) = match self {
            TripPurpose::HomeBasedWork => (28_507.0, -0.02, -0.123),
            TripPurpose::HomeBasedOther => (139_173.0, -1.285, -0.094),
            TripPurpose::NonHomeBased => (219_113.0, -1.332, -0.1),
        };
        FrictionCoefficients { alpha, beta, gamma }
    }
}

impl fmt::Display for TripPurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<u8> for TripPurpose {
    type Error = GdError;

    fn try_from(code: u8) -> GdResult<Self> {
        TripPurpose::from_code(code)
    }
}
