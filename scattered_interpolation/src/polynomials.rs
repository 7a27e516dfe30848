/////////////////////////////////////////////////////////////////////////////////////////////
//
// Evaluates the monomial basis used to augment conditionally positive definite RBF systems.
//
// Created on: 15 Nov 2025     Author: Daniel Owen
//
// Copyright (c) 2025, Maptek Pty Ltd. All rights reserved. Licensed under the MIT License.
//
/////////////////////////////////////////////////////////////////////////////////////////////

use crate::{
    common,
    error::{InterpolationError, Result},
};
use faer::{Mat, MatRef};
use serde::{Deserialize, Serialize};

/// Monomials of total degree `<= degree` in `dimensions` variables.
///
/// Each term lists the (nondecreasing) variable indices multiplied together, so
/// `[]` is the constant, `[0]` is `x`, `[0, 1]` is `x*y`. Terms are ordered by
/// degree and then lexicographically: `1, x, y, x^2, x*y, y^2, ...`.
pub(crate) fn monomial_terms(dimensions: usize, degree: usize) -> Vec<Vec<usize>> {
    let mut terms: Vec<Vec<usize>> = vec![Vec::new()];
    let mut frontier: Vec<Vec<usize>> = vec![Vec::new()];

    for _ in 0..degree {
        let mut next = Vec::new();
        for term in &frontier {
            let first_var = term.last().copied().unwrap_or(0);
            for var in first_var..dimensions {
                let mut extended = term.clone();
                extended.push(var);
                next.push(extended);
            }
        }
        terms.extend(next.iter().cloned());
        frontier = next;
    }

    terms
}

/// Evaluates `terms` at each point (column) after mapping the points with the
/// given translation and scale. Returns a `num_points × num_terms` matrix.
pub(crate) fn evaluate_monomials(
    points: MatRef<'_, f64>,
    terms: &[Vec<usize>],
    translation_factor: &[f64],
    scale_factor: &[f64],
) -> Mat<f64> {
    // Scale the points to the [-1, 1]^n hypercube for monomial evaluation.
    let scaled_points = common::scale_points(points, translation_factor, scale_factor);

    Mat::from_fn(points.ncols(), terms.len(), |i, c| {
        terms[c]
            .iter()
            .map(|&var| scaled_points[(var, i)])
            .product::<f64>()
    })
}

/// Polynomial tail of an augmented RBF system.
///
/// Holds the monomial basis and the Chebyshev cube scaling derived from the
/// sample points, so fitting and evaluation see the same basis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolynomialAugmenter {
    degree: usize,
    terms: Vec<Vec<usize>>,
    translation_factor: Vec<f64>,
    scale_factor: Vec<f64>,
}

impl PolynomialAugmenter {
    /// Builds the basis of total degree `<= degree` for the dimension of `points`,
    /// scaled to the bounding box of `points`.
    pub fn new(points: MatRef<'_, f64>, degree: usize) -> Self {
        let (translation_factor, scale_factor) = common::get_cheb_cube_scaling_factors(points);

        Self {
            degree,
            terms: monomial_terms(points.nrows(), degree),
            translation_factor,
            scale_factor,
        }
    }

    /// Total degree of the basis.
    pub fn degree(&self) -> usize {
        self.degree
    }

    /// Number of basis polynomials `p = C(n + d, d)`.
    pub fn basis_size(&self) -> usize {
        self.terms.len()
    }

    /// Checks that a deserialized augmenter describes a basis over `dimensions`
    /// variables.
    pub(crate) fn check_dimensions(&self, dimensions: usize) -> Result<()> {
        for (what, found) in [
            ("polynomial translation factors", self.translation_factor.len()),
            ("polynomial scale factors", self.scale_factor.len()),
        ] {
            if found != dimensions {
                return Err(InterpolationError::DimensionMismatch {
                    what,
                    expected: dimensions,
                    found,
                });
            }
        }

        let expected_terms = monomial_terms(dimensions, self.degree);
        if self.terms != expected_terms {
            return Err(InterpolationError::DimensionMismatch {
                what: "polynomial terms",
                expected: expected_terms.len(),
                found: self.terms.len(),
            });
        }

        Ok(())
    }

    /// Evaluates the basis at `points`, giving the `num_points × p` design matrix.
    pub fn evaluate(&self, points: MatRef<'_, f64>) -> Mat<f64> {
        evaluate_monomials(
            points,
            &self.terms,
            &self.translation_factor,
            &self.scale_factor,
        )
    }
}
