/////////////////////////////////////////////////////////////////////////////////////////////
//
// Supplies general-purpose utilities for distances, extents, kernel dispatch and kernel matrices.
//
// Created on: 15 Nov 2025     Author: Daniel Owen
//
// Copyright (c) 2025, Maptek Pty Ltd. All rights reserved. Licensed under the MIT License.
//
/////////////////////////////////////////////////////////////////////////////////////////////

use crate::{
    constants::THIN_PLATE_ORDER,
    kernel_helpers::DegreeRequirement,
    kernels::{
        GaussianKernel, GeneralizedMultiquadraticKernel, GeneralizedPolyharmonicKernel,
        InverseMultiquadraticKernel, InverseQuadraticKernel, MultiquadraticKernel,
        PolyharmonicKernel,
    },
    traits::{Metric, ParameterError, RadialKernel},
};
use faer::{ColRef, Mat, MatRef};
use serde::{Deserialize, Serialize};

/// Returns the index of the first minimum value.
///
/// # Examples
///
/// ```
/// use scattered_interpolation_utils::argmin;
///
/// let data = [3.0, 1.0, 2.0, 1.0];
///
/// assert_eq!(argmin(&data), 1);
/// ```
#[inline(always)]
pub fn argmin(data: &[f64]) -> usize {
    assert!(!data.is_empty(), "Data slice cannot be empty");

    let mut min_index = 0;
    let mut min_value = data[0];

    // Strict comparison keeps the first index on ties.
    for (idx, &value) in data.iter().enumerate().skip(1) {
        if value < min_value {
            min_value = value;
            min_index = idx;
        }
    }

    min_index
}

/// Computes the axis aligned bounding box (AABB) extents of a set of points
/// stored as the columns of a matrix.
///
/// The result is arranged as:
///
/// `[min_0, min_1, ..., min_n, max_0, max_1, ..., max_n]`
///
/// where `n` is the number of rows (dimensions) in the matrix.
///
/// # Examples
///
/// ```
/// use faer::mat;
/// use scattered_interpolation_utils::get_pointarray_extents;
///
/// // Three 2D points: (1, 2), (3, -1), (0.5, 4).
/// let points = mat![
///     [1.0, 3.0, 0.5],
///     [2.0, -1.0, 4.0f64],
/// ];
/// let extents = get_pointarray_extents(points.as_ref());
/// assert_eq!(extents, vec![0.5, -1.0, 3.0, 4.0]);
/// ```
#[inline(always)]
pub fn get_pointarray_extents(points: MatRef<'_, f64>) -> Vec<f64> {
    let dimensions = points.nrows();

    // The first half of the vector stores mins, the second half stores maxs.
    let mut extents = vec![0.0; 2 * dimensions];

    for (dim, row) in points.row_iter().enumerate() {
        let (min, max) = row
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });
        extents[dim] = min;
        extents[dim + dimensions] = max;
    }

    extents
}

/// Calculates the euclidean distance between two points.
///
/// # Examples
///
/// ```
/// use faer::mat;
/// use scattered_interpolation_utils::get_distance;
///
/// let points = mat![
///     [1.0, 4.0],
///     [2.0, 6.0],
/// ];
///
/// let dist = get_distance(points.col(0), points.col(1));
///
/// assert_eq!(dist, 5.0);
/// ```
#[inline(always)]
pub fn get_distance(target: ColRef<'_, f64>, source: ColRef<'_, f64>) -> f64 {
    get_distance_sq(target, source).sqrt()
}

/// Returns the squared euclidean distance between two points.
#[inline(always)]
pub fn get_distance_sq(target: ColRef<'_, f64>, source: ColRef<'_, f64>) -> f64 {
    let mut dist = 0.0;
    for (t, s) in target.iter().zip(source.iter()) {
        let diff = t - s;
        dist += diff * diff;
    }
    dist
}

/// Kernel attached to source point `j`: either the single shared kernel or the
/// `j`-th entry of a per-point set.
#[inline(always)]
fn kernel_at(kernels: &[RadialBasis], j: usize) -> &RadialBasis {
    match kernels.len() {
        1 => &kernels[0],
        _ => &kernels[j],
    }
}

/// Builds a dense kernel matrix between target and source points (both stored
/// as columns).
///
/// Entry `(i, j)` is `phi_j(metric(target_i, source_j))`, where `phi_j` is the
/// kernel of source point `j`. `kernels` holds either a single shared kernel or
/// one kernel per source point.
pub fn get_a_matrix<M>(
    target_points: MatRef<'_, f64>,
    source_points: MatRef<'_, f64>,
    kernels: &[RadialBasis],
    metric: &M,
) -> Mat<f64>
where
    M: Metric + ?Sized,
{
    assert!(kernels.len() == 1 || kernels.len() == source_points.ncols());

    let m = target_points.ncols();
    let n = source_points.ncols();

    let mut a_matrix = Mat::<f64>::zeros(m, n);

    for j in 0..n {
        let source = source_points.col(j);
        let kernel = kernel_at(kernels, j);

        for i in 0..m {
            let target = target_points.col(i);

            a_matrix[(i, j)] = kernel.phi(metric.distance(target, source));
        }
    }

    a_matrix
}

/// Builds the square kernel matrix of a point set and adds the smoothing
/// (ridge) term on the diagonal.
///
/// `smoothing` holds either a single shared value or one value per point. With
/// a single shared kernel only the lower triangle is evaluated and mirrored.
pub fn get_a_matrix_with_smoothing<M>(
    points: MatRef<'_, f64>,
    kernels: &[RadialBasis],
    metric: &M,
    smoothing: &[f64],
) -> Mat<f64>
where
    M: Metric + ?Sized,
{
    let n = points.ncols();
    assert!(smoothing.len() == 1 || smoothing.len() == n);

    let mut a_matrix = match kernels.len() {
        1 => {
            let kernel = &kernels[0];
            let mut a_matrix = Mat::<f64>::zeros(n, n);

            for j in 0..n {
                let source = points.col(j);

                for i in j..n {
                    let k_val = kernel.phi(metric.distance(points.col(i), source));

                    // Write both symmetric entries
                    a_matrix[(i, j)] = k_val;
                    a_matrix[(j, i)] = k_val;
                }
            }

            a_matrix
        }
        _ => get_a_matrix(points, points, kernels, metric),
    };

    for i in 0..n {
        a_matrix[(i, i)] += match smoothing.len() {
            1 => smoothing[0],
            _ => smoothing[i],
        };
    }

    a_matrix
}

// Closed kernel set generated from the kernel registry below.
// Each registered type must implement `RadialKernel`.
macro_rules! for_each_kernel {
    ( registry = [ $( ($V:ident, $Kty:path, $name:literal) ),* $(,)? ] ) => {

        /// Closed set of radial basis functions, dispatched by `match`.
        ///
        /// Each variant wraps the concrete kernel type holding its parameters.
        #[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
        pub enum RadialBasis {
            $( $V($Kty), )*
        }

        impl RadialBasis {
            /// Name of the kernel family.
            pub fn name(&self) -> &'static str {
                match self {
                    $( RadialBasis::$V(_) => $name, )*
                }
            }
        }

        impl RadialKernel for RadialBasis {
            #[inline(always)]
            fn phi(&self, r: f64) -> f64 {
                match self {
                    $( RadialBasis::$V(k) => k.phi(r), )*
                }
            }

            #[inline]
            fn polynomial_degree(&self) -> Option<usize> {
                match self {
                    $( RadialBasis::$V(k) => k.polynomial_degree(), )*
                }
            }

            fn degree_requirement(&self) -> Option<DegreeRequirement> {
                match self {
                    $( RadialBasis::$V(k) => k.degree_requirement(), )*
                }
            }

            fn validate(&self) -> Result<(), ParameterError> {
                match self {
                    $( RadialBasis::$V(k) => k.validate(), )*
                }
            }
        }

        $(
            impl From<$Kty> for RadialBasis {
                fn from(kernel: $Kty) -> Self {
                    RadialBasis::$V(kernel)
                }
            }
        )*
    };
}

for_each_kernel! {
    registry = [
        (Multiquadratic,            MultiquadraticKernel,            "Multiquadratic"),
        (InverseMultiquadratic,     InverseMultiquadraticKernel,     "InverseMultiquadratic"),
        (Gaussian,                  GaussianKernel,                  "Gaussian"),
        (InverseQuadratic,          InverseQuadraticKernel,          "InverseQuadratic"),
        (Polyharmonic,              PolyharmonicKernel,              "Polyharmonic"),
        (GeneralizedMultiquadratic, GeneralizedMultiquadraticKernel, "GeneralizedMultiquadratic"),
        (GeneralizedPolyharmonic,   GeneralizedPolyharmonicKernel,   "GeneralizedPolyharmonic"),
    ]
}

impl RadialBasis {
    /// `phi(r) = sqrt(1 + (εr)^2)`.
    pub fn multiquadratic(epsilon: f64) -> Self {
        MultiquadraticKernel { epsilon }.into()
    }

    /// `phi(r) = 1 / sqrt(1 + (εr)^2)`.
    pub fn inverse_multiquadratic(epsilon: f64) -> Self {
        InverseMultiquadraticKernel { epsilon }.into()
    }

    /// `phi(r) = exp(-(εr)^2)`.
    pub fn gaussian(epsilon: f64) -> Self {
        GaussianKernel { epsilon }.into()
    }

    /// `phi(r) = 1 / (1 + (εr)^2)`.
    pub fn inverse_quadratic(epsilon: f64) -> Self {
        InverseQuadraticKernel { epsilon }.into()
    }

    /// `phi(r) = r^k` for odd `k`, `r^k ln(r)` for even `k`.
    pub fn polyharmonic(order: u32) -> Self {
        PolyharmonicKernel { order }.into()
    }

    /// Thin plate spline, shorthand for `Polyharmonic(2)`.
    pub fn thin_plate() -> Self {
        PolyharmonicKernel {
            order: THIN_PLATE_ORDER,
        }
        .into()
    }

    /// `phi(r) = (1 + (εr)^2)^β` with a polynomial tail of degree `degree`,
    /// positive definite for `degree >= ⌈β⌉`.
    pub fn generalized_multiquadratic(epsilon: f64, beta: f64, degree: usize) -> Self {
        GeneralizedMultiquadraticKernel {
            epsilon,
            beta,
            degree,
        }
        .into()
    }

    /// Polyharmonic spline of order `k` with a polynomial tail of degree
    /// `degree`, positive definite for `degree >= ⌈k/2⌉` (odd `k`) or
    /// `degree == k + 1` (even `k`).
    pub fn generalized_polyharmonic(order: u32, degree: usize) -> Self {
        GeneralizedPolyharmonicKernel { order, degree }.into()
    }
}

impl Default for RadialBasis {
    fn default() -> Self {
        MultiquadraticKernel::default().into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::Euclidean;
    use equator::assert;
    use faer::{mat, utils::approx::*};

    #[test]
    fn argmin_keeps_first_on_ties() {
        assert!(argmin(&[2.0, 0.5, 0.5, 3.0]) == 1);
        assert!(argmin(&[1.0]) == 0);
        assert!(argmin(&[0.0, 0.0]) == 0);
    }

    #[test]
    fn thin_plate_is_polyharmonic_two() {
        assert!(RadialBasis::thin_plate() == RadialBasis::polyharmonic(2));
        assert!(RadialBasis::thin_plate().name() == "Polyharmonic");
    }

    #[test]
    fn dispatch_matches_concrete_kernels() {
        let kernels = [
            (RadialBasis::gaussian(0.7), GaussianKernel { epsilon: 0.7 }.phi(1.3)),
            (
                RadialBasis::inverse_quadratic(2.0),
                InverseQuadraticKernel { epsilon: 2.0 }.phi(1.3),
            ),
            (RadialBasis::polyharmonic(3), 1.3f64.powi(3)),
        ];
        for (kernel, expected) in kernels {
            assert!(kernel.phi(1.3) == expected);
        }

        assert!(RadialBasis::multiquadratic(1.0).polynomial_degree() == None);
        assert!(RadialBasis::generalized_polyharmonic(2, 3).polynomial_degree() == Some(3));
        assert!(RadialBasis::generalized_polyharmonic(2, 2).validate().is_ok());
        assert!(
            RadialBasis::generalized_polyharmonic(2, 2).degree_requirement()
                == Some(DegreeRequirement::Exactly(3))
        );
        assert!(RadialBasis::gaussian(1.0).degree_requirement() == None);
    }

    #[test]
    fn a_matrix_uses_the_source_kernel_per_column() {
        // Points 0, 1 and 3 on a line.
        let points = mat![[0.0, 1.0, 3.0f64]];
        let kernels = [
            RadialBasis::polyharmonic(1),
            RadialBasis::polyharmonic(3),
            RadialBasis::gaussian(1.0),
        ];

        let a = get_a_matrix(points.as_ref(), points.as_ref(), &kernels, &Euclidean);

        let expected = mat![
            [0.0, 1.0, (-9.0f64).exp()],
            [1.0, 0.0, (-4.0f64).exp()],
            [3.0, 8.0, 1.0],
        ];

        let approx_eq = CwiseMat(ApproxEq::eps() * 16.0);
        assert!(&a ~ &expected);
    }

    #[test]
    fn smoothed_matrix_adds_ridge_on_the_diagonal() {
        let points = mat![[0.0, 1.0, 3.0], [0.0, 0.0, 1.0f64]];
        let kernel = [RadialBasis::multiquadratic(1.0)];

        let plain = get_a_matrix(points.as_ref(), points.as_ref(), &kernel, &Euclidean);
        let uniform = get_a_matrix_with_smoothing(points.as_ref(), &kernel, &Euclidean, &[0.5]);
        let per_point =
            get_a_matrix_with_smoothing(points.as_ref(), &kernel, &Euclidean, &[0.0, 1.0, 2.0]);

        let approx_eq = CwiseMat(ApproxEq::eps() * 16.0);
        let mut expected = plain.clone();
        for i in 0..3 {
            expected[(i, i)] += 0.5;
        }
        assert!(&uniform ~ &expected);

        let mut expected = plain.clone();
        for i in 0..3 {
            expected[(i, i)] += i as f64;
        }
        assert!(&per_point ~ &expected);
    }

    #[test]
    fn thin_plate_diagonal_is_finite() {
        let points = mat![[0.0, 1.0, 0.5], [0.0, 0.0, 2.0f64]];
        let a = get_a_matrix_with_smoothing(
            points.as_ref(),
            &[RadialBasis::thin_plate()],
            &Euclidean,
            &[0.0],
        );
        for i in 0..3 {
            assert!(a[(i, i)] == 0.0);
        }
        assert!(a.col_iter().all(|c| c.iter().all(|v| v.is_finite())));
    }

    #[test]
    fn kernels_round_trip_through_json() {
        let kernel = RadialBasis::generalized_multiquadratic(0.5, 1.5, 2);
        let json = serde_json::to_string(&kernel).unwrap();
        let back: RadialBasis = serde_json::from_str(&json).unwrap();
        assert!(back == kernel);
    }
}
