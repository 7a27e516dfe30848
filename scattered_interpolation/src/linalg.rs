/////////////////////////////////////////////////////////////////////////////////////////////
//
// Assembles and solves the dense (optionally polynomial-augmented) RBF linear systems.
//
// Created on: 15 Nov 2025     Author: Daniel Owen
//
// Copyright (c) 2025, Maptek Pty Ltd. All rights reserved. Licensed under the MIT License.
//
/////////////////////////////////////////////////////////////////////////////////////////////

//! # linalg
//!
//! Dense direct solves for RBF systems.
//!
//! A plain system `(A + S) w = u` and the saddle point system
//!
//! ```text
//! [A + S  P] [w]   [u]
//! [P^T    0] [λ] = [0]
//! ```
//!
//! go through the same routine; the polynomial block is simply empty for the
//! former.

use crate::error::{InterpolationError, Result};
use faer::{linalg::solvers::Solve, Mat, MatRef};
use log::{debug, trace};

/// Diagonal entries of `R` below `RANK_TOLERANCE * size * eps * |R_00|` count
/// as zero when estimating the numerical rank.
const RANK_TOLERANCE: f64 = 10.0;

/// Builds the square system from the (smoothed) kernel block and the optional
/// `k × p` polynomial design matrix.
pub(crate) fn assemble_system(kernel_block: Mat<f64>, monomials: Option<MatRef<'_, f64>>) -> Mat<f64> {
    let Some(monomials) = monomials else {
        return kernel_block;
    };

    let k = kernel_block.nrows();
    let p = monomials.ncols();

    let mut system = Mat::<f64>::zeros(k + p, k + p);
    system.submatrix_mut(0, 0, k, k).copy_from(&kernel_block);
    system.submatrix_mut(0, k, k, p).copy_from(monomials);
    system.submatrix_mut(k, 0, p, k).copy_from(monomials.transpose());

    system
}

/// Pads the samples with `basis_size` zero rows for the polynomial constraints.
pub(crate) fn assemble_rhs(samples: MatRef<'_, f64>, basis_size: usize) -> Mat<f64> {
    let k = samples.nrows();
    let mut rhs = Mat::<f64>::zeros(k + basis_size, samples.ncols());
    rhs.subrows_mut(0, k).copy_from(samples);
    rhs
}

/// Solves `system * x = rhs` with a column pivoted QR factorisation.
///
/// Fails with [`InterpolationError::SingularSystem`] when the factorisation
/// reveals a numerical rank below the system size or the solution is not
/// finite.
pub(crate) fn solve_system(system: MatRef<'_, f64>, rhs: MatRef<'_, f64>) -> Result<Mat<f64>> {
    let size = system.nrows();
    debug_assert!(system.ncols() == size && rhs.nrows() == size);

    debug!("Solving dense {}x{} system for {} right hand side(s)", size, size, rhs.ncols());

    // QR with column pivoting to reveal the numerical rank.
    let qr = system.col_piv_qr();
    let r = qr.thin_R();

    let r00 = r[(0, 0)].abs();
    let thresh = RANK_TOLERANCE * size as f64 * f64::EPSILON * r00;

    let rank = match r00.is_finite() {
        true => r
            .diagonal()
            .column_vector()
            .iter()
            .filter(|val| val.abs() > thresh)
            .count(),
        false => 0,
    };

    trace!("Estimated numerical rank {} of {} (|R_00| = {:e})", rank, size, r00);

    if rank < size {
        return Err(InterpolationError::SingularSystem { size, rank });
    }

    let solution = qr.solve(rhs);

    let finite = solution.col_iter().all(|c| c.iter().all(|v| v.is_finite()));
    if finite {
        Ok(solution)
    } else {
        Err(InterpolationError::SingularSystem { size, rank })
    }
}
