/////////////////////////////////////////////////////////////////////////////////////////////
//
// Provides benchmark test functions for validating and demonstrating interpolation quality.
//
// Created on: 15 Nov 2025     Author: Daniel Owen
//
// Copyright (c) 2025, Maptek Pty Ltd. All rights reserved. Licensed under the MIT License.
//
/////////////////////////////////////////////////////////////////////////////////////////////

//! The 3D function is the Franke-like f1 from [1].
//!
//! # References
//! 1. Bozzini, Mira & Rossini, Milvia. (2002). Testing methods for 3D scattered data
//!    interpolation. 20. 111-135.
use faer::{Mat, MatRef};

/// Implements Franke's function in two and three dimensions to generate sample
/// values (one row per point) for testing interpolation.
pub struct TestFunctions;

/// Sum of the four Franke exponentials. `z` is `None` in two dimensions.
fn franke(x: f64, y: f64, z: Option<f64>) -> f64 {
    let (nx, ny) = (9.0 * x, 9.0 * y);
    let nz = z.map(|z| 9.0 * z);

    // Contribution of the third coordinate to each exponent.
    let third = |centre: f64, scale: f64| nz.map_or(0.0, |nz| (nz - centre).powi(2) / scale);

    let term1 = 0.75
        * (-((nx - 2.0).powi(2) + (ny - 2.0).powi(2)) / 4.0 - third(2.0, 4.0)).exp();
    let term2 = 0.75
        * (-(nx + 1.0).powi(2) / 49.0 - (ny + 1.0).powi(2) / 10.0 - third(-1.0, 10.0)).exp();
    let term3 = 0.5
        * (-((nx - 7.0).powi(2) + (ny - 3.0).powi(2)) / 4.0 - third(5.0, 4.0)).exp();
    let term4 = -0.2 * (-(nx - 4.0).powi(2) - (ny - 7.0).powi(2) - third(5.0, 1.0)).exp();

    term1 + term2 + term3 + term4
}

impl TestFunctions {
    /// Franke's two-dimensional test function:
    /// <div>
    /// $$
    /// \begin{aligned}
    /// F(x,y) &=
    /// \tfrac{3}{4}\exp\!\left[
    ///     -\frac{(9x-2)^2 + (9y-2)^2}{4}
    /// \right] \\[6pt]
    /// &\quad+ \tfrac{3}{4}\exp\!\left[
    ///     -\frac{(9x+1)^2}{49}
    ///     -\frac{(9y+1)^2}{10}
    /// \right] \\[6pt]
    /// &\quad+ \tfrac{1}{2}\exp\!\left[
    ///     -\frac{(9x-7)^2 + (9y-3)^2}{4}
    /// \right] \\[6pt]
    /// &\quad- \tfrac{1}{5}\exp\!\left[
    ///     -(9x-4)^2 - (9y-7)^2
    /// \right]
    /// \end{aligned}
    /// $$
    /// </div>
    ///
    /// `points` holds one 2D point per column; the result has one row per point.
    pub fn franke_2d(points: MatRef<'_, f64>) -> Mat<f64> {
        assert_eq!(points.nrows(), 2);

        Mat::from_fn(points.ncols(), 1, |j, _| {
            franke(points[(0, j)], points[(1, j)], None)
        })
    }

    /// Franke-like three-dimensional test function:
    ///
    /// <div>
    /// $$
    /// \begin{aligned}
    /// F(x,y,z) &=
    /// \tfrac{3}{4}\exp\!\left[
    ///     -\frac{(9x-2)^2 + (9y-2)^2 + (9z-2)^2}{4}
    /// \right] \\[6pt]
    /// &\quad+ \tfrac{3}{4}\exp\!\left[
    ///     -\frac{(9x+1)^2}{49}
    ///     -\frac{(9y+1)^2}{10}
    ///     -\frac{(9z+1)^2}{10}
    /// \right] \\[6pt]
    /// &\quad+ \tfrac{1}{2}\exp\!\left[
    ///     -\frac{(9x-7)^2 + (9y-3)^2 + (9z-5)^2}{4}
    /// \right] \\[6pt]
    /// &\quad- \tfrac{1}{5}\exp\!\left[
    ///     -(9x-4)^2 - (9y-7)^2 - (9z-5)^2
    /// \right]
    /// \end{aligned}
    /// $$
    /// </div>
    pub fn franke_3d(points: MatRef<'_, f64>) -> Mat<f64> {
        assert_eq!(points.nrows(), 3);

        Mat::from_fn(points.ncols(), 1, |j, _| {
            franke(points[(0, j)], points[(1, j)], Some(points[(2, j)]))
        })
    }
}
