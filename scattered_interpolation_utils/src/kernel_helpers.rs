/////////////////////////////////////////////////////////////////////////////////////////////
//
// Provides the polynomial degree rules under which generalized RBF systems are positive definite.
//
// Created on: 15 Nov 2025     Author: Daniel Owen
//
// Copyright (c) 2025, Maptek Pty Ltd. All rights reserved. Licensed under the MIT License.
//
/////////////////////////////////////////////////////////////////////////////////////////////

use serde::{Deserialize, Serialize};

/// Constraint on the degree of the polynomial tail appended to an RBF system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DegreeRequirement {
    /// Any degree greater than or equal to the bound.
    AtLeast(usize),

    /// Only this degree.
    Exactly(usize),
}

impl DegreeRequirement {
    /// Smallest degree satisfying the requirement.
    pub fn minimum(&self) -> usize {
        match self {
            DegreeRequirement::AtLeast(d) | DegreeRequirement::Exactly(d) => *d,
        }
    }

    pub fn is_satisfied_by(&self, degree: usize) -> bool {
        match self {
            DegreeRequirement::AtLeast(d) => degree >= *d,
            DegreeRequirement::Exactly(d) => degree == *d,
        }
    }

    /// Describes how `degree` falls short of the requirement, or `None` when
    /// it is satisfied.
    pub fn shortfall(&self, degree: usize) -> Option<String> {
        if self.is_satisfied_by(degree) {
            return None;
        }

        let reason = match self {
            DegreeRequirement::AtLeast(d) => format!(
                "polynomial degree {} is below {}, the system may not be positive definite",
                degree, d
            ),
            DegreeRequirement::Exactly(d) => format!(
                "polynomial degree {} differs from {}, the system may not be positive definite",
                degree, d
            ),
        };

        Some(reason)
    }
}

/// Degree requirement of the generalized multiquadratic `(1 + (εr)^2)^β`:
/// `degree >= ⌈β⌉`.
pub fn generalized_multiquadratic_requirement(beta: f64) -> DegreeRequirement {
    DegreeRequirement::AtLeast(beta.ceil().max(0.0) as usize)
}

/// Degree requirement of the generalized polyharmonic spline of order `k`:
/// `degree >= ⌈k/2⌉` for odd `k` and `degree == k + 1` for even `k`.
pub fn generalized_polyharmonic_requirement(order: u32) -> DegreeRequirement {
    let k = order as usize;
    match k % 2 {
        1 => DegreeRequirement::AtLeast(k.div_ceil(2)),
        _ => DegreeRequirement::Exactly(k + 1),
    }
}

/// Number of monomials of total degree `<= degree` in `dimensions` variables,
/// i.e. `C(dimensions + degree, degree)`.
pub fn polynomial_basis_size(dimensions: usize, degree: usize) -> usize {
    // Multiplicative binomial, exact at every step.
    (1..=degree).fold(1usize, |acc, i| acc * (dimensions + i) / i)
}
