/////////////////////////////////////////////////////////////////////////////////////////////
//
// Implements the inverse distance weight used by Shepard interpolation.
//
// Created on: 16 Nov 2025     Author: Daniel Owen
//
// Copyright (c) 2025, Maptek Pty Ltd. All rights reserved. Licensed under the MIT License.
//
/////////////////////////////////////////////////////////////////////////////////////////////

use crate::{constants::DEFAULT_SHEPARD_POWER, traits::ParameterError};
use serde::{Deserialize, Serialize};

/// Inverse distance weight with `w(r) = 1 / r^P` away from the origin.
#[derive(Clone, Debug, Copy, PartialEq, Serialize, Deserialize)]
pub struct InverseDistanceWeight {
    pub power: f64,
}

impl Default for InverseDistanceWeight {
    fn default() -> Self {
        Self {
            power: DEFAULT_SHEPARD_POWER,
        }
    }
}

impl InverseDistanceWeight {
    #[inline(always)]
    pub fn phi(&self, r: f64) -> f64 {
        match r.abs() < f64::EPSILON {
            true => 0.0,
            false => r.powf(-self.power),
        }
    }

    /// Weight of a point at distance `r` relative to the nearest point at
    /// distance `r_min`, i.e. `(r_min / r)^P`.
    ///
    /// Lies in `(0, 1]`, so weights neither overflow nor all underflow for
    /// large powers.
    #[inline(always)]
    pub fn relative_weight(&self, r: f64, r_min: f64) -> f64 {
        (r_min / r).powf(self.power)
    }

    pub fn validate(&self) -> Result<(), ParameterError> {
        match self.power.is_finite() && self.power > 0.0 {
            true => Ok(()),
            false => Err(ParameterError::new(
                "Shepard",
                format!("power must be finite and positive, got {}", self.power),
            )),
        }
    }
}
