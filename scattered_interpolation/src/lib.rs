/////////////////////////////////////////////////////////////////////////////////////////////
//
// Exposes the public API and high-level documentation for scattered data interpolation.
//
// Created on: 15 Nov 2025     Author: Daniel Owen
//
// Copyright (c) 2025, Maptek Pty Ltd. All rights reserved. Licensed under the MIT License.
//
/////////////////////////////////////////////////////////////////////////////////////////////

//! # Interpolation of scattered data in any number of dimensions.
//!
//! Given `k` sample points in `n` dimensions, stored as the columns of an
//! `n × k` matrix, and `k` samples with `m` values each, stored one row per
//! point in a `k × m` matrix, this crate builds a function that reproduces the
//! samples and can be evaluated anywhere.
//!
//! Three methods are available through [`interpolate`] and [`interpolate_with`]:
//!
//! - **Radial basis functions** - a linear combination of radially symmetric
//!   kernels centred on the sample points, optionally augmented with a
//!   polynomial and regularised with a smoothing term. Kernels may be shared
//!   by all points or chosen per point.
//! - **Shepard** - inverse distance weighted averaging.
//! - **Nearest neighbour** - piecewise constant, backed by a k-d tree.
//!
//! Every method accepts any distance [`Metric`](scattered_interpolation_utils::Metric).
//! Linear algebra is built on [`faer`](https://docs.rs/faer/latest/faer/) and
//! batch evaluation is parallelised with `rayon`.
//!
//! # Examples
//!
//! ```
//! use scattered_interpolation::{
//!     interpolate,
//!     generate_random_points,
//!     RadialBasis,
//!     TestFunctions,
//! };
//!
//! // Generate some random data in the unit square
//! let dimensions = 2;
//! let num_points = 100;
//! let source_points = generate_random_points(num_points, dimensions, Some(42));
//!
//! // Assign some values to the source points using Franke's function
//! let source_values = TestFunctions::franke_2d(source_points.as_ref());
//!
//! // Cubic polyharmonic spline with a quadratic polynomial
//! let interpolant = interpolate(
//!     RadialBasis::generalized_polyharmonic(3, 2),
//!     source_points.clone(),
//!     source_values.clone(),
//! )?;
//!
//! // Evaluate the interpolant at the input source locations
//! let fitted = interpolant.evaluate(source_points.as_ref())?;
//!
//! let max_diff: f64 = source_values
//!     .col(0)
//!     .iter()
//!     .zip(fitted.col(0).iter())
//!     .fold(0.0, |acc, (a, b)| acc.max((a - b).abs()));
//!
//! assert!(max_diff < 1e-6);
//! # Ok::<(), scattered_interpolation::InterpolationError>(())
//! ```
//!
//! # References
//! 1.  Fasshauer, G., 2007. Meshfree Approximation Methods with Matlab. World Scientific Publishing Co.
//! 2.  Shepard, D., 1968. A two-dimensional interpolation function for irregularly-spaced data.
//!     Proceedings of the 1968 ACM National Conference, 517-524.
//! 3.  Bentley, J. L., 1975. Multidimensional binary search trees used for associative
//!     searching. Communications of the ACM, 18(9), 509-517.
pub mod interpolant_config;

mod common;

mod error;

mod interpolant;

mod rbf;

mod shepard;

mod nearest_neighbor;

mod polynomials;

mod kdtree;

mod linalg;

mod rbf_test_functions;

pub use {
    common::{create_evaluation_grid, generate_random_points},
    error::{InterpolationError, ModelIOError, Result},
    interpolant::{evaluate, interpolate, interpolate_with, Interpolant, ScatteredInterpolant},
    nearest_neighbor::NearestNeighborInterpolant,
    polynomials::PolynomialAugmenter,
    rbf::{Coefficients, RadialBasisInterpolant},
    rbf_test_functions::TestFunctions,
    scattered_interpolation_utils::{kernels, metrics, RadialBasis},
    shepard::ShepardInterpolant,
};
