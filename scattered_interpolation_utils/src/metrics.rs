/////////////////////////////////////////////////////////////////////////////////////////////
//
// Implements the standard distance metrics consumed by the interpolation methods.
//
// Created on: 16 Nov 2025     Author: Daniel Owen
//
// Copyright (c) 2025, Maptek Pty Ltd. All rights reserved. Licensed under the MIT License.
//
/////////////////////////////////////////////////////////////////////////////////////////////

use crate::traits::{Metric, ParameterError};
use faer::ColRef;
use serde::{Deserialize, Serialize};

/// Standard euclidean distance. The default metric.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Euclidean;

impl Metric for Euclidean {
    #[inline(always)]
    fn distance(&self, a: ColRef<'_, f64>, b: ColRef<'_, f64>) -> f64 {
        crate::get_distance(a, b)
    }

    #[inline(always)]
    fn axis_lower_bound(&self, axis_difference: f64) -> Option<f64> {
        Some(axis_difference.abs())
    }
}

/// Squared euclidean distance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SqEuclidean;

impl Metric for SqEuclidean {
    #[inline(always)]
    fn distance(&self, a: ColRef<'_, f64>, b: ColRef<'_, f64>) -> f64 {
        crate::get_distance_sq(a, b)
    }

    #[inline(always)]
    fn axis_lower_bound(&self, axis_difference: f64) -> Option<f64> {
        Some(axis_difference * axis_difference)
    }
}

/// Manhattan (L1) distance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Cityblock;

impl Metric for Cityblock {
    #[inline(always)]
    fn distance(&self, a: ColRef<'_, f64>, b: ColRef<'_, f64>) -> f64 {
        a.iter().zip(b.iter()).map(|(x, y)| (x - y).abs()).sum()
    }

    #[inline(always)]
    fn axis_lower_bound(&self, axis_difference: f64) -> Option<f64> {
        Some(axis_difference.abs())
    }
}

/// Infinity-norm distance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Chebyshev;

impl Metric for Chebyshev {
    #[inline(always)]
    fn distance(&self, a: ColRef<'_, f64>, b: ColRef<'_, f64>) -> f64 {
        a.iter()
            .zip(b.iter())
            .map(|(x, y)| (x - y).abs())
            .fold(0.0_f64, f64::max)
    }

    #[inline(always)]
    fn axis_lower_bound(&self, axis_difference: f64) -> Option<f64> {
        Some(axis_difference.abs())
    }
}

/// Minkowski distance of order `p >= 1`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Minkowski {
    pub p: f64,
}

impl Metric for Minkowski {
    #[inline(always)]
    fn distance(&self, a: ColRef<'_, f64>, b: ColRef<'_, f64>) -> f64 {
        let sum: f64 = a
            .iter()
            .zip(b.iter())
            .map(|(x, y)| (x - y).abs().powf(self.p))
            .sum();
        sum.powf(1.0 / self.p)
    }

    #[inline(always)]
    fn axis_lower_bound(&self, axis_difference: f64) -> Option<f64> {
        Some(axis_difference.abs())
    }

    fn validate(&self) -> Result<(), ParameterError> {
        match self.p.is_finite() && self.p >= 1.0 {
            true => Ok(()),
            false => Err(ParameterError::new(
                "Minkowski",
                format!("order must be finite and >= 1, got {}", self.p),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use faer::mat;

    #[test]
    fn distances_between_columns() {
        // Points (0, 0) and (3, -4) stored as columns.
        let points = mat![[0.0, 3.0], [0.0, -4.0f64]];
        let a = points.col(0);
        let b = points.col(1);

        assert_eq!(Euclidean.distance(a, b), 5.0);
        assert_eq!(SqEuclidean.distance(a, b), 25.0);
        assert_eq!(Cityblock.distance(a, b), 7.0);
        assert_eq!(Chebyshev.distance(a, b), 4.0);
        assert!((Minkowski { p: 2.0 }.distance(a, b) - 5.0).abs() < 1e-12);
        assert!((Minkowski { p: 1.0 }.distance(a, b) - 7.0).abs() < 1e-12);
    }

    #[test]
    fn axis_bounds_never_exceed_distance() {
        let points = mat![[0.2, -1.1], [0.7, 0.4], [1.5, 2.0f64]];
        let a = points.col(0);
        let b = points.col(1);
        let metrics: [&dyn Metric; 5] = [
            &Euclidean,
            &SqEuclidean,
            &Cityblock,
            &Chebyshev,
            &Minkowski { p: 3.0 },
        ];

        for metric in metrics {
            let d = metric.distance(a, b);
            for axis in 0..3 {
                let bound = metric.axis_lower_bound(a[axis] - b[axis]).unwrap();
                assert!(bound <= d + 1e-12, "{:?} bound {} > {}", metric, bound, d);
            }
        }
    }

    #[test]
    fn minkowski_validation() {
        assert!(Minkowski { p: 1.0 }.validate().is_ok());
        assert!(Minkowski { p: 0.5 }.validate().is_err());
        assert!(Euclidean.validate().is_ok());
    }
}
