/////////////////////////////////////////////////////////////////////////////////////////////
//
// Implements Shepard (inverse distance weighting) interpolation.
//
// Created on: 16 Nov 2025     Author: Daniel Owen
//
// Copyright (c) 2025, Maptek Pty Ltd. All rights reserved. Licensed under the MIT License.
//
/////////////////////////////////////////////////////////////////////////////////////////////

use crate::{
    common,
    error::Result,
    interpolant_config::InterpolantSettings,
};
use faer::{ColRef, Mat, MatRef};
use log::debug;
use scattered_interpolation_utils::{
    argmin, kernels::InverseDistanceWeight, metrics::Euclidean, Metric,
};
use serde::{Deserialize, Serialize};

/// Inverse distance weighted average of the samples.
///
/// At a query `x` with distances `d_i` to the sample points:
/// - if some `d_i == 0`, the sample of the first such point is returned;
/// - otherwise the result is `sum_i w_i u_i / sum_i w_i` with `w_i = 1 / d_i^P`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShepardInterpolant<M = Euclidean> {
    points: Mat<f64>,
    samples: Mat<f64>,
    weight: InverseDistanceWeight,
    metric: M,
}

impl<M: Metric + Clone> ShepardInterpolant<M> {
    /// Stores the points, samples and metric. No system is solved.
    pub fn fit(
        weight: InverseDistanceWeight,
        points: Mat<f64>,
        samples: Mat<f64>,
        settings: &InterpolantSettings<M>,
    ) -> Result<Self> {
        common::check_points_and_samples(points.as_ref(), samples.as_ref())?;
        weight.validate()?;
        settings.metric.validate()?;

        debug!(
            "Shepard interpolant with power {} over {} points in {} dimension(s)",
            weight.power,
            points.ncols(),
            points.nrows()
        );

        Ok(Self {
            points,
            samples,
            weight,
            metric: settings.metric.clone(),
        })
    }
}

impl<M: Metric> ShepardInterpolant<M> {
    /// Weighted average at a single query point, written into `out`.
    fn evaluate_point(&self, query: ColRef<'_, f64>, distances: &mut [f64], out: &mut [f64]) {
        for (j, d) in distances.iter_mut().enumerate() {
            *d = self.metric.distance(query, self.points.col(j));
        }

        // Exact hits return the first coincident sample.
        if let Some(hit) = distances.iter().position(|&d| d == 0.0) {
            for (c, value) in out.iter_mut().enumerate() {
                *value = self.samples[(hit, c)];
            }
            return;
        }

        // Weights relative to the nearest point lie in (0, 1].
        let nearest = argmin(distances);
        let d_min = distances[nearest];

        out.fill(0.0);
        let mut weight_sum = 0.0;
        for (i, &d) in distances.iter().enumerate() {
            let w = self.weight.relative_weight(d, d_min);
            weight_sum += w;
            for (c, value) in out.iter_mut().enumerate() {
                *value += w * self.samples[(i, c)];
            }
        }

        out.iter_mut().for_each(|value| *value /= weight_sum);
    }

    fn evaluate_block(&self, target_points: MatRef<'_, f64>) -> Mat<f64> {
        let m = self.value_dimensions();
        let mut values = Mat::<f64>::zeros(target_points.ncols(), m);

        let mut distances = vec![0.0; self.points.ncols()];
        let mut row = vec![0.0; m];

        for q in 0..target_points.ncols() {
            self.evaluate_point(target_points.col(q), &mut distances, &mut row);
            for (c, &value) in row.iter().enumerate() {
                values[(q, c)] = value;
            }
        }

        values
    }

    /// Evaluate the interpolant at `target_points` (`n × q`), giving `q × m`
    /// values in query order.
    pub fn evaluate(&self, target_points: MatRef<'_, f64>) -> Result<Mat<f64>> {
        common::check_query_points(target_points, self.dimensions())?;

        Ok(common::evaluate_in_blocks(
            target_points,
            self.value_dimensions(),
            |block| self.evaluate_block(block),
        ))
    }

    pub fn dimensions(&self) -> usize {
        self.points.nrows()
    }

    pub fn value_dimensions(&self) -> usize {
        self.samples.ncols()
    }

    pub fn num_points(&self) -> usize {
        self.points.ncols()
    }

    /// Exponent `P` of the weights.
    pub fn power(&self) -> f64 {
        self.weight.power
    }

    pub fn metric(&self) -> &M {
        &self.metric
    }

    pub(crate) fn check_consistency(&self) -> Result<()> {
        common::check_points_and_samples(self.points.as_ref(), self.samples.as_ref())?;
        self.weight.validate()?;
        self.metric.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InterpolationError;
    use faer::mat;
    use scattered_interpolation_utils::metrics::{Cityblock, Minkowski};

    fn shepard(power: f64, points: Mat<f64>, samples: Mat<f64>) -> ShepardInterpolant {
        ShepardInterpolant::fit(
            InverseDistanceWeight { power },
            points,
            samples,
            &InterpolantSettings::default(),
        )
        .unwrap()
    }

    #[test]
    fn samples_are_returned_at_sample_points() {
        let points = mat![[0.0, 1.0, 0.0, 1.0], [0.0, 0.0, 1.0, 1.0f64]];
        let samples = mat![[1.0, 10.0], [2.0, 20.0], [3.0, 30.0], [4.0, 40.0f64]];
        let idw = shepard(2.0, points.clone(), samples.clone());

        let values = idw.evaluate(points.as_ref()).unwrap();
        assert_eq!(values, samples);
    }

    #[test]
    fn weighted_average_by_hand() {
        // Points at 0 and 3 on a line, query at 1: d = 1 and 2.
        let points = mat![[0.0, 3.0f64]];
        let samples = mat![[1.0], [4.0f64]];
        let idw = shepard(2.0, points, samples);

        let value = idw.evaluate(mat![[1.0f64]].as_ref()).unwrap()[(0, 0)];
        // Weights 1 and 1/4.
        let expected = (1.0 * 1.0 + 0.25 * 4.0) / 1.25;
        assert!((value - expected).abs() < 1e-14);
    }

    #[test]
    fn first_coincident_point_wins() {
        // Points 1 and 2 coincide with different samples.
        let points = mat![[0.0, 0.5, 0.5, 1.0f64]];
        let samples = mat![[0.0], [7.0], [9.0], [1.0f64]];
        let idw = shepard(2.0, points, samples);

        let value = idw.evaluate(mat![[0.5f64]].as_ref()).unwrap();
        assert_eq!(value[(0, 0)], 7.0);
    }

    #[test]
    fn large_powers_stay_finite() {
        let points = mat![[0.0, 10.0, 20.0f64]];
        let samples = mat![[1.0], [2.0], [3.0f64]];
        let idw = shepard(400.0, points, samples);

        let value = idw.evaluate(mat![[12.0f64]].as_ref()).unwrap()[(0, 0)];
        assert!(value.is_finite());
        // The nearest point dominates.
        assert!((value - 2.0).abs() < 1e-12);
    }

    #[test]
    fn values_stay_within_sample_range() {
        let points = crate::generate_random_points(30, 3, Some(4));
        let samples = Mat::from_fn(30, 1, |i, _| (i as f64).sin());
        let idw = ShepardInterpolant::fit(
            InverseDistanceWeight::default(),
            points,
            samples.clone(),
            &InterpolantSettings::builder().metric(Cityblock).build(),
        )
        .unwrap();

        let lo = samples.col(0).iter().copied().fold(f64::INFINITY, f64::min);
        let hi = samples.col(0).iter().copied().fold(f64::NEG_INFINITY, f64::max);

        let queries = crate::generate_random_points(50, 3, Some(5));
        let values = idw.evaluate(queries.as_ref()).unwrap();
        for q in 0..50 {
            assert!(values[(q, 0)] >= lo - 1e-12 && values[(q, 0)] <= hi + 1e-12);
        }
    }

    #[test]
    fn invalid_power_is_rejected() {
        let points = mat![[0.0, 1.0f64]];
        let samples = mat![[0.0], [1.0f64]];
        for power in [0.0, -1.0, f64::NAN] {
            let result = ShepardInterpolant::fit(
                InverseDistanceWeight { power },
                points.clone(),
                samples.clone(),
                &InterpolantSettings::default(),
            );
            assert!(matches!(result, Err(InterpolationError::InvalidOption(_))));
        }
    }

    #[test]
    fn query_dimension_must_match() {
        let idw = shepard(2.0, mat![[0.0, 1.0f64]], mat![[0.0], [1.0f64]]);
        assert!(matches!(
            idw.evaluate(mat![[0.0], [0.0f64]].as_ref()),
            Err(InterpolationError::DimensionMismatch { expected: 1, found: 2, .. })
        ));
    }

    #[test]
    fn consistency_check_covers_the_metric() {
        let idw = ShepardInterpolant {
            points: mat![[0.0, 1.0f64]],
            samples: mat![[0.0], [1.0f64]],
            weight: InverseDistanceWeight { power: 2.0 },
            metric: Minkowski { p: 3.0 },
        };
        assert!(idw.check_consistency().is_ok());

        let bad_metric = ShepardInterpolant {
            metric: Minkowski { p: 0.5 },
            ..idw
        };
        assert!(matches!(
            bad_metric.check_consistency(),
            Err(InterpolationError::InvalidOption(_))
        ));
    }
}
