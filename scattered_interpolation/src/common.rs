/////////////////////////////////////////////////////////////////////////////////////////////
//
// Defines shared helpers for random point generation, input checks, scaling, and block evaluation.
//
// Created on: 15 Nov 2025     Author: Daniel Owen
//
// Copyright (c) 2025, Maptek Pty Ltd. All rights reserved. Licensed under the MIT License.
//
/////////////////////////////////////////////////////////////////////////////////////////////

use crate::error::{InterpolationError, Result};
use faer::{Mat, MatRef};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

/// Number of query points evaluated per parallel task.
pub(crate) const EVALUATION_BLOCK_SIZE: usize = 256;

/// Generate a matrix of random points in the unit hypercube.
///
/// # Parameters
/// - `k`: Number of points to generate (columns in the output matrix).
/// - `n`: Number of spatial dimensions per point (rows in the output matrix).
/// - `seed`: Optional random seed.
///   - If `Some(seed)` is provided, the same sequence of points will be generated
///     deterministically across runs and platforms (useful for reproducible tests).
///   - If `None`, the generator is seeded from the operating system's randomness source.
///
/// # Returns
/// A `Mat<f64>` of shape `(n, k)` where each element lies in `[0.0, 1.0)`.
///
/// # Example
/// ```
/// use scattered_interpolation::generate_random_points;
///
/// // Generate 100 reproducible 3D points
/// let pts = generate_random_points(100, 3, Some(42));
/// assert_eq!(pts.nrows(), 3);
/// assert_eq!(pts.ncols(), 100);
/// ```
pub fn generate_random_points(k: usize, n: usize, seed: Option<u64>) -> Mat<f64> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    // Fill point by point so a seed yields the same points for any dimension order.
    let mut points = Mat::<f64>::zeros(n, k);
    for j in 0..k {
        for i in 0..n {
            points[(i, j)] = rng.random_range(0.0..1.0);
        }
    }

    points
}

/// Create a regular evaluation grid from per-dimension ranges and sample counts.
///
/// # Arguments
/// * `ranges` - Inclusive `(min, max)` range for each dimension.
/// * `counts` - Number of grid samples per range; must match `ranges.len()`.
///
/// # Returns
/// A `Mat<f64>` with one row per dimension and one column per grid point. The
/// first dimension varies fastest.
pub fn create_evaluation_grid(ranges: &[(f64, f64)], counts: &[usize]) -> Mat<f64> {
    assert_eq!(ranges.len(), counts.len());

    let total_points: usize = counts.iter().product();

    Mat::from_fn(ranges.len(), total_points, |dim, point_idx| {
        let dim_points = counts[dim];
        let (start, end) = ranges[dim];
        let step = match dim_points > 1 {
            true => (end - start) / (dim_points as f64 - 1.0),
            false => 0.0,
        };

        let stride: usize = counts[..dim].iter().product();

        let index_in_dim = (point_idx / stride) % dim_points;
        start + step * index_in_dim as f64
    })
}

/// Checks a point set (n×k) against its sample set (k×m).
pub(crate) fn check_points_and_samples(
    points: MatRef<'_, f64>,
    samples: MatRef<'_, f64>,
) -> Result<()> {
    if points.nrows() == 0 {
        return Err(InterpolationError::DimensionMismatch {
            what: "point dimension",
            expected: 1,
            found: 0,
        });
    }

    if points.ncols() == 0 {
        return Err(InterpolationError::DimensionMismatch {
            what: "number of points",
            expected: 1,
            found: 0,
        });
    }

    if samples.nrows() != points.ncols() {
        return Err(InterpolationError::DimensionMismatch {
            what: "sample rows",
            expected: points.ncols(),
            found: samples.nrows(),
        });
    }

    if samples.ncols() == 0 {
        return Err(InterpolationError::DimensionMismatch {
            what: "sample columns",
            expected: 1,
            found: 0,
        });
    }

    Ok(())
}

/// Checks that query points have the fitted number of coordinates.
pub(crate) fn check_query_points(query_points: MatRef<'_, f64>, dimensions: usize) -> Result<()> {
    match query_points.nrows() == dimensions {
        true => Ok(()),
        false => Err(InterpolationError::DimensionMismatch {
            what: "query point dimension",
            expected: dimensions,
            found: query_points.nrows(),
        }),
    }
}

/// Evaluates `eval_block` over blocks of query columns in parallel and stacks
/// the per-block results (each `block_len × value_dimensions`) in query order.
pub(crate) fn evaluate_in_blocks<F>(
    query_points: MatRef<'_, f64>,
    value_dimensions: usize,
    eval_block: F,
) -> Mat<f64>
where
    F: Fn(MatRef<'_, f64>) -> Mat<f64> + Sync,
{
    let num_queries = query_points.ncols();
    let num_blocks = num_queries.div_ceil(EVALUATION_BLOCK_SIZE);

    let blocks: Vec<(usize, Mat<f64>)> = (0..num_blocks)
        .into_par_iter()
        .map(|b| {
            let start = b * EVALUATION_BLOCK_SIZE;
            let len = EVALUATION_BLOCK_SIZE.min(num_queries - start);
            (start, eval_block(query_points.subcols(start, len)))
        })
        .collect();

    let mut values = Mat::<f64>::zeros(num_queries, value_dimensions);
    for (start, block) in blocks {
        values
            .subrows_mut(start, block.nrows())
            .copy_from(&block);
    }

    values
}

/// Compute translation and scale factors to map points into a Chebyshev cube.
///
/// The translation is the midpoint of each coordinate range and the scale
/// is half the range, with zeros replaced by `1.0` to avoid division by zero.
///
/// # Arguments
/// * `points` - Matrix of point coordinates (columns are points).
///
/// # Returns
/// A tuple `(translation, scale)` where each is a per-dimension factor.
pub(crate) fn get_cheb_cube_scaling_factors(points: MatRef<'_, f64>) -> (Vec<f64>, Vec<f64>) {
    let dimensions = points.nrows();
    let extents = scattered_interpolation_utils::get_pointarray_extents(points);

    let (translation_factor, mut scale_factor): (Vec<f64>, Vec<f64>) = (0..dimensions)
        .map(|d| {
            let min_coord = extents[d];
            let max_coord = extents[d + dimensions];
            ((max_coord + min_coord) / 2.0, (max_coord - min_coord) / 2.0)
        })
        .unzip();

    scale_factor.iter_mut().for_each(|element| {
        if *element == 0.0 {
            *element = 1.0;
        }
    });

    (translation_factor, scale_factor)
}

/// Apply translation and scaling to map points into a normalized cube.
///
/// For each coordinate `x`, applies `(x - translation_factor[d]) / scale_factor[d]`.
pub(crate) fn scale_points(
    points: MatRef<'_, f64>,
    translation_factor: &[f64],
    scale_factor: &[f64],
) -> Mat<f64> {
    Mat::from_fn(points.nrows(), points.ncols(), |d, j| {
        (points[(d, j)] - translation_factor[d]) / scale_factor[d]
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use equator::assert;
    use faer::{mat, utils::approx::*};

    #[test]
    fn random_points_are_reproducible() {
        let a = generate_random_points(20, 3, Some(7));
        let b = generate_random_points(20, 3, Some(7));
        assert!(a == b);
        assert!(a.nrows() == 3);
        assert!(a.ncols() == 20);
        assert!(a
            .col_iter()
            .all(|c| c.iter().all(|&v| (0.0..1.0).contains(&v))));
    }

    #[test]
    fn evaluation_grid_layout() {
        let grid = create_evaluation_grid(&[(0.0, 1.0), (10.0, 12.0)], &[2, 3]);
        let expected = mat![
            [0.0, 1.0, 0.0, 1.0, 0.0, 1.0],
            [10.0, 10.0, 11.0, 11.0, 12.0, 12.0],
        ];
        let approx_eq = CwiseMat(ApproxEq::eps() * 8.0);
        assert!(&grid ~ &expected);
    }

    #[test]
    fn input_checks() {
        let points = Mat::<f64>::zeros(2, 5);
        assert!(check_points_and_samples(points.as_ref(), Mat::<f64>::zeros(5, 1).as_ref()).is_ok());
        assert!(
            check_points_and_samples(points.as_ref(), Mat::<f64>::zeros(4, 1).as_ref())
                == Err(InterpolationError::DimensionMismatch {
                    what: "sample rows",
                    expected: 5,
                    found: 4,
                })
        );
        assert!(check_points_and_samples(points.as_ref(), Mat::<f64>::zeros(5, 0).as_ref()).is_err());
        assert!(check_query_points(Mat::<f64>::zeros(3, 4).as_ref(), 2).is_err());
        assert!(check_query_points(Mat::<f64>::zeros(2, 0).as_ref(), 2).is_ok());
    }

    #[test]
    fn blocks_are_stacked_in_query_order() {
        let num_queries = 2 * EVALUATION_BLOCK_SIZE + 17;
        let queries = Mat::from_fn(1, num_queries, |_, j| j as f64);

        let values = evaluate_in_blocks(queries.as_ref(), 2, |block| {
            Mat::from_fn(block.ncols(), 2, |i, c| block[(0, i)] * (c + 1) as f64)
        });

        assert!(values.nrows() == num_queries);
        for j in 0..num_queries {
            assert!(values[(j, 0)] == j as f64);
            assert!(values[(j, 1)] == 2.0 * j as f64);
        }
    }

    #[test]
    fn no_queries_give_an_empty_result() {
        let queries = Mat::<f64>::zeros(2, 0);
        let values = evaluate_in_blocks(queries.as_ref(), 3, |block| {
            Mat::zeros(block.ncols(), 3)
        });
        assert!(values.nrows() == 0);
        assert!(values.ncols() == 3);
    }

    #[test]
    fn cheb_cube_scaling_maps_extents_to_unit_cube() {
        // Second dimension is degenerate.
        let points = mat![[2.0, 4.0, 3.0], [5.0, 5.0, 5.0f64]];
        let (translation, scale) = get_cheb_cube_scaling_factors(points.as_ref());
        assert!(translation == vec![3.0, 5.0]);
        assert!(scale == vec![1.0, 1.0]);

        let scaled = scale_points(points.as_ref(), &translation, &scale);
        let expected = mat![[-1.0, 1.0, 0.0], [0.0, 0.0, 0.0f64]];
        let approx_eq = CwiseMat(ApproxEq::eps() * 8.0);
        assert!(&scaled ~ &expected);
    }
}
