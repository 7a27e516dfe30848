/////////////////////////////////////////////////////////////////////////////////////////////
//
// Implements the radial basis function interpolant, coefficient management, and solve orchestration.
//
// Created on: 15 Nov 2025     Author: Daniel Owen
//
// Copyright (c) 2025, Maptek Pty Ltd. All rights reserved. Licensed under the MIT License.
//
/////////////////////////////////////////////////////////////////////////////////////////////

use crate::{
    common,
    error::{InterpolationError, Result},
    interpolant_config::{InterpolantSettings, Smoothing},
    linalg,
    polynomials::PolynomialAugmenter,
};

use faer::{Mat, MatRef};
use log::{debug, warn};
use scattered_interpolation_utils::{self, metrics::Euclidean, Metric, RadialBasis, RadialKernel};
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Coefficients of a solved RBF system.
///
/// After fitting, an RBF interpolant produces a set of coefficients
/// that define the contribution of each basis function. These
/// coefficients are stored in this struct and used during evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coefficients {
    /// Coefficients associated with the RBF centers (data points), `k × m`.
    pub point_coefficients: Mat<f64>,

    /// Coefficients associated with the polynomial tail, `p × m`.
    ///
    /// This is `None` when no polynomial component was included in the
    /// system, or `Some(matrix)` otherwise.
    pub poly_coefficients: Option<Mat<f64>>,
}

impl Coefficients {
    /// Splits a `(k + p) × m` solution into radial and polynomial parts.
    pub(crate) fn from_solution(solution: Mat<f64>, num_points: usize) -> Self {
        let basis_size = solution.nrows() - num_points;

        match basis_size {
            0 => Self {
                point_coefficients: solution,
                poly_coefficients: None,
            },
            _ => Self {
                point_coefficients: solution.subrows(0, num_points).to_owned(),
                poly_coefficients: Some(solution.subrows(num_points, basis_size).to_owned()),
            },
        }
    }

    /// The full `(k + p) × m` weight matrix, radial weights first.
    pub fn stacked(&self) -> Mat<f64> {
        let k = self.point_coefficients.nrows();
        let m = self.point_coefficients.ncols();

        match &self.poly_coefficients {
            None => self.point_coefficients.clone(),
            Some(poly) => {
                let mut weights = Mat::<f64>::zeros(k + poly.nrows(), m);
                weights.subrows_mut(0, k).copy_from(&self.point_coefficients);
                weights.subrows_mut(k, poly.nrows()).copy_from(poly);
                weights
            }
        }
    }
}

/// A fitted radial basis function interpolant.
///
/// Center `j` carries kernel `phi_j`. The value at `x` is
///
/// `f(x) = sum_j w_j phi_j(d(x, x_j)) + sum_l λ_l p_l(x)`
///
/// where the polynomial tail `p_l` is present only when a kernel asks for one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RadialBasisInterpolant<M = Euclidean> {
    /// Coordinates of the centers, one per column.
    points: Mat<f64>,

    /// Sample values, one row per center.
    samples: Mat<f64>,

    /// One shared kernel, or one kernel per center.
    kernels: Vec<RadialBasis>,

    metric: M,

    smoothing: Smoothing,

    /// Polynomial tail, if any kernel requires one.
    augmenter: Option<PolynomialAugmenter>,

    /// Solved coefficients for the RBF and polynomial terms.
    coefficients: Coefficients,

    /// Copy of the assembled system, kept on request.
    system_matrix: Option<Mat<f64>>,
}

impl<M: Metric + Clone> RadialBasisInterpolant<M> {
    /// Fits an interpolant to `samples` (`k × m`) at `points` (`n × k`).
    ///
    /// `kernels` holds either one kernel for every point or exactly `k`.
    ///
    /// # Errors
    /// - [`InterpolationError::DimensionMismatch`] when points, samples,
    ///   kernels or smoothing values disagree in count.
    /// - [`InterpolationError::InvalidOption`] for invalid kernel, metric or
    ///   smoothing parameters.
    /// - [`InterpolationError::SingularSystem`] when the assembled system is
    ///   numerically singular, e.g. duplicate points without smoothing.
    ///
    /// A polynomial degree below what a kernel needs for a positive definite
    /// system is logged as a warning and left to the solve.
    pub fn fit(
        kernels: Vec<RadialBasis>,
        points: Mat<f64>,
        samples: Mat<f64>,
        settings: &InterpolantSettings<M>,
    ) -> Result<Self> {
        let solve_start = Instant::now();

        common::check_points_and_samples(points.as_ref(), samples.as_ref())?;

        let num_points = points.ncols();

        if kernels.len() != 1 && kernels.len() != num_points {
            return Err(InterpolationError::DimensionMismatch {
                what: "per-point kernels",
                expected: num_points,
                found: kernels.len(),
            });
        }

        for kernel in &kernels {
            kernel.validate()?;
        }
        settings.metric.validate()?;
        settings.smoothing.validate(num_points)?;

        let degree = polynomial_degree(&kernels);
        if let Some(degree) = degree {
            warn_on_degree_shortfall(&kernels, degree);
        }

        let kernel_block = scattered_interpolation_utils::get_a_matrix_with_smoothing(
            points.as_ref(),
            &kernels,
            &settings.metric,
            settings.smoothing.as_slice(),
        );

        let augmenter = degree.map(|d| PolynomialAugmenter::new(points.as_ref(), d));
        let monomials = augmenter.as_ref().map(|a| a.evaluate(points.as_ref()));
        let basis_size = augmenter.as_ref().map_or(0, |a| a.basis_size());

        debug!(
            "Fitting {} to {} points in {} dimension(s): polynomial degree {:?}, basis size {}",
            kernels[0].name(),
            num_points,
            points.nrows(),
            degree,
            basis_size
        );

        let system = linalg::assemble_system(kernel_block, monomials.as_ref().map(|m| m.as_ref()));
        let rhs = linalg::assemble_rhs(samples.as_ref(), basis_size);

        let solution = linalg::solve_system(system.as_ref(), rhs.as_ref())?;

        debug!("Took {:?} to solve RBF system", solve_start.elapsed());

        Ok(Self {
            points,
            samples,
            kernels,
            metric: settings.metric.clone(),
            smoothing: settings.smoothing.clone(),
            augmenter,
            coefficients: Coefficients::from_solution(solution, num_points),
            system_matrix: settings.return_system_matrix.then_some(system),
        })
    }
}

impl<M: Metric> RadialBasisInterpolant<M> {
    /// Evaluates a block of query columns without checks.
    fn evaluate_block(&self, target_points: MatRef<'_, f64>) -> Mat<f64> {
        let kernel_block = scattered_interpolation_utils::get_a_matrix(
            target_points,
            self.points.as_ref(),
            &self.kernels,
            &self.metric,
        );

        let mut values = &kernel_block * &self.coefficients.point_coefficients;

        if let (Some(augmenter), Some(poly)) =
            (&self.augmenter, &self.coefficients.poly_coefficients)
        {
            values += augmenter.evaluate(target_points) * poly;
        }

        values
    }

    /// Evaluate the interpolant at `target_points` (`n × q`).
    ///
    /// ### Returns
    /// A `q × m` matrix of interpolated values, in query order.
    ///
    /// ### Errors
    /// [`InterpolationError::DimensionMismatch`] when the query points do not
    /// have `n` coordinates.
    pub fn evaluate(&self, target_points: MatRef<'_, f64>) -> Result<Mat<f64>> {
        common::check_query_points(target_points, self.dimensions())?;

        Ok(common::evaluate_in_blocks(
            target_points,
            self.value_dimensions(),
            |block| self.evaluate_block(block),
        ))
    }

    /// Evaluate the interpolant **at the original sample points**.
    ///
    /// Useful for diagnostics.
    ///
    /// - When `add_smoothing = true`, the ridge contribution `s_i w_i` is added
    ///   back so the evaluated values match the input samples to within solver
    ///   precision (undoing any smoothing).
    /// - When `add_smoothing = false`, you observe the smoothed fit.
    pub fn evaluate_at_source(&self, add_smoothing: bool) -> Mat<f64> {
        let mut values = common::evaluate_in_blocks(
            self.points.as_ref(),
            self.value_dimensions(),
            |block| self.evaluate_block(block),
        );

        if add_smoothing {
            let weights = &self.coefficients.point_coefficients;
            for i in 0..values.nrows() {
                let s = self.smoothing.value_at(i);
                for c in 0..values.ncols() {
                    values[(i, c)] += s * weights[(i, c)];
                }
            }
        }

        values
    }

    /// Number of coordinates per point.
    pub fn dimensions(&self) -> usize {
        self.points.nrows()
    }

    /// Number of values per sample.
    pub fn value_dimensions(&self) -> usize {
        self.samples.ncols()
    }

    /// Number of centers.
    pub fn num_points(&self) -> usize {
        self.points.ncols()
    }

    pub fn points(&self) -> MatRef<'_, f64> {
        self.points.as_ref()
    }

    pub fn samples(&self) -> MatRef<'_, f64> {
        self.samples.as_ref()
    }

    /// One shared kernel, or one kernel per center.
    pub fn kernels(&self) -> &[RadialBasis] {
        &self.kernels
    }

    pub fn metric(&self) -> &M {
        &self.metric
    }

    pub fn smoothing(&self) -> &Smoothing {
        &self.smoothing
    }

    pub fn coefficients(&self) -> &Coefficients {
        &self.coefficients
    }

    /// Fitted `(k + p) × m` weights: radial weights then polynomial coefficients.
    pub fn weights(&self) -> Mat<f64> {
        self.coefficients.stacked()
    }

    /// Degree of the polynomial tail, if the system was augmented.
    pub fn polynomial_degree(&self) -> Option<usize> {
        self.augmenter.as_ref().map(|a| a.degree())
    }

    /// The assembled `(k + p) × (k + p)` system, when requested at construction.
    pub fn system_matrix(&self) -> Option<&Mat<f64>> {
        self.system_matrix.as_ref()
    }

    /// Checks the internal consistency of a deserialized interpolant.
    pub(crate) fn check_consistency(&self) -> Result<()> {
        common::check_points_and_samples(self.points.as_ref(), self.samples.as_ref())?;

        let num_points = self.num_points();
        if self.kernels.len() != 1 && self.kernels.len() != num_points {
            return Err(InterpolationError::DimensionMismatch {
                what: "per-point kernels",
                expected: num_points,
                found: self.kernels.len(),
            });
        }
        for kernel in &self.kernels {
            kernel.validate()?;
        }
        self.metric.validate()?;
        self.smoothing.validate(num_points)?;

        let weights = &self.coefficients.point_coefficients;
        if weights.nrows() != num_points || weights.ncols() != self.value_dimensions() {
            return Err(InterpolationError::DimensionMismatch {
                what: "radial weights",
                expected: num_points,
                found: weights.nrows(),
            });
        }

        if let Some(augmenter) = &self.augmenter {
            augmenter.check_dimensions(self.dimensions())?;
        }

        let basis_size = self.augmenter.as_ref().map_or(0, |a| a.basis_size());
        let poly_rows = self.coefficients.poly_coefficients.as_ref().map_or(0, |p| p.nrows());
        if basis_size != poly_rows {
            return Err(InterpolationError::DimensionMismatch {
                what: "polynomial coefficients",
                expected: basis_size,
                found: poly_rows,
            });
        }

        Ok(())
    }
}

/// Degree of the polynomial tail for a set of kernels: the highest degree any
/// kernel asks for, or `None` when none asks for one.
fn polynomial_degree(kernels: &[RadialBasis]) -> Option<usize> {
    let degrees: Vec<usize> = kernels.iter().filter_map(|k| k.polynomial_degree()).collect();
    let max_degree = degrees.iter().copied().max();

    if let Some(max_degree) = max_degree {
        if degrees.iter().any(|&d| d != max_degree) {
            warn!(
                "Per-point kernels ask for different polynomial degrees, augmenting with degree {}",
                max_degree
            );
        }
    }

    max_degree
}

/// Logs the kernels whose positive definiteness needs a different polynomial
/// degree than `degree`.
fn warn_on_degree_shortfall(kernels: &[RadialBasis], degree: usize) {
    let mut shortfalls = kernels.iter().filter_map(|kernel| {
        let reason = kernel.degree_requirement()?.shortfall(degree)?;
        Some((kernel.name(), reason))
    });

    if let Some((name, reason)) = shortfalls.next() {
        warn!(
            "{}: {} ({} kernel(s) affected)",
            name,
            reason,
            1 + shortfalls.count()
        );
    }
}
