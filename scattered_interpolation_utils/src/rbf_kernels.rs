/////////////////////////////////////////////////////////////////////////////////////////////
//
// Implements the concrete radial basis function kernels.
//
// Created on: 15 Nov 2025     Author: Daniel Owen
//
// Copyright (c) 2025, Maptek Pty Ltd. All rights reserved. Licensed under the MIT License.
//
/////////////////////////////////////////////////////////////////////////////////////////////

use crate::{
    constants::{DEFAULT_POLYHARMONIC_ORDER, DEFAULT_SHAPE_PARAMETER},
    kernel_helpers::{generalized_multiquadratic_requirement, generalized_polyharmonic_requirement},
    kernel_helpers::DegreeRequirement,
    traits::{ParameterError, RadialKernel},
};
use serde::{Deserialize, Serialize};

fn check_shape_parameter(component: &'static str, epsilon: f64) -> Result<(), ParameterError> {
    match epsilon.is_finite() && epsilon > 0.0 {
        true => Ok(()),
        false => Err(ParameterError::new(
            component,
            format!("shape parameter must be finite and positive, got {}", epsilon),
        )),
    }
}

fn check_order(component: &'static str, order: u32) -> Result<(), ParameterError> {
    match order >= 1 {
        true => Ok(()),
        false => Err(ParameterError::new(component, "order must be at least 1")),
    }
}

/// `r^k` for odd `k`, `r^k ln(r)` for even `k`, with the `r = 0` limit of zero.
#[inline(always)]
fn polyharmonic_phi(order: u32, r: f64) -> f64 {
    let k = order as i32;
    match order % 2 {
        1 => r.powi(k),
        _ => match r.abs() < f64::EPSILON {
            true => 0.0,
            false => r.powi(k) * r.ln(),
        },
    }
}

/// Multiquadratic RBF kernel with `phi(r) = sqrt(1 + (εr)^2)`.
#[derive(Clone, Debug, Copy, PartialEq, Serialize, Deserialize)]
pub struct MultiquadraticKernel {
    pub epsilon: f64,
}

impl Default for MultiquadraticKernel {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_SHAPE_PARAMETER,
        }
    }
}

impl RadialKernel for MultiquadraticKernel {
    #[inline(always)]
    fn phi(&self, r: f64) -> f64 {
        let er = self.epsilon * r;
        (1.0 + er * er).sqrt()
    }

    fn validate(&self) -> Result<(), ParameterError> {
        check_shape_parameter("Multiquadratic", self.epsilon)
    }
}

/// Inverse multiquadratic RBF kernel with `phi(r) = 1 / sqrt(1 + (εr)^2)`.
#[derive(Clone, Debug, Copy, PartialEq, Serialize, Deserialize)]
pub struct InverseMultiquadraticKernel {
    pub epsilon: f64,
}

impl Default for InverseMultiquadraticKernel {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_SHAPE_PARAMETER,
        }
    }
}

impl RadialKernel for InverseMultiquadraticKernel {
    #[inline(always)]
    fn phi(&self, r: f64) -> f64 {
        let er = self.epsilon * r;
        1.0 / (1.0 + er * er).sqrt()
    }

    fn validate(&self) -> Result<(), ParameterError> {
        check_shape_parameter("InverseMultiquadratic", self.epsilon)
    }
}

/// Gaussian RBF kernel with `phi(r) = exp(-(εr)^2)`.
#[derive(Clone, Debug, Copy, PartialEq, Serialize, Deserialize)]
pub struct GaussianKernel {
    pub epsilon: f64,
}

impl Default for GaussianKernel {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_SHAPE_PARAMETER,
        }
    }
}

impl RadialKernel for GaussianKernel {
    #[inline(always)]
    fn phi(&self, r: f64) -> f64 {
        let er = self.epsilon * r;
        (-(er * er)).exp()
    }

    fn validate(&self) -> Result<(), ParameterError> {
        check_shape_parameter("Gaussian", self.epsilon)
    }
}

/// Inverse quadratic RBF kernel with `phi(r) = 1 / (1 + (εr)^2)`.
#[derive(Clone, Debug, Copy, PartialEq, Serialize, Deserialize)]
pub struct InverseQuadraticKernel {
    pub epsilon: f64,
}

impl Default for InverseQuadraticKernel {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_SHAPE_PARAMETER,
        }
    }
}

impl RadialKernel for InverseQuadraticKernel {
    #[inline(always)]
    fn phi(&self, r: f64) -> f64 {
        let er = self.epsilon * r;
        1.0 / (1.0 + er * er)
    }

    fn validate(&self) -> Result<(), ParameterError> {
        check_shape_parameter("InverseQuadratic", self.epsilon)
    }
}

/// Polyharmonic spline RBF kernel with `phi(r) = r^k` for odd `k` and
/// `phi(r) = r^k ln(r)` for even `k`.
///
/// The thin plate spline is the `k = 2` case.
#[derive(Clone, Debug, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolyharmonicKernel {
    pub order: u32,
}

impl Default for PolyharmonicKernel {
    fn default() -> Self {
        Self {
            order: DEFAULT_POLYHARMONIC_ORDER,
        }
    }
}

impl RadialKernel for PolyharmonicKernel {
    #[inline(always)]
    fn phi(&self, r: f64) -> f64 {
        polyharmonic_phi(self.order, r)
    }

    fn validate(&self) -> Result<(), ParameterError> {
        check_order("Polyharmonic", self.order)
    }
}

/// Generalized multiquadratic RBF kernel with `phi(r) = (1 + (εr)^2)^β`,
/// fitted with a polynomial tail of the given degree.
///
/// The system is positive definite for `degree >= ⌈β⌉`.
#[derive(Clone, Debug, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeneralizedMultiquadraticKernel {
    pub epsilon: f64,
    pub beta: f64,
    pub degree: usize,
}

impl RadialKernel for GeneralizedMultiquadraticKernel {
    #[inline(always)]
    fn phi(&self, r: f64) -> f64 {
        let er = self.epsilon * r;
        (1.0 + er * er).powf(self.beta)
    }

    fn polynomial_degree(&self) -> Option<usize> {
        Some(self.degree)
    }

    fn degree_requirement(&self) -> Option<DegreeRequirement> {
        Some(generalized_multiquadratic_requirement(self.beta))
    }

    fn validate(&self) -> Result<(), ParameterError> {
        check_shape_parameter("GeneralizedMultiquadratic", self.epsilon)?;
        match self.beta.is_finite() {
            true => Ok(()),
            false => Err(ParameterError::new(
                "GeneralizedMultiquadratic",
                format!("exponent must be finite, got {}", self.beta),
            )),
        }
    }
}

/// Generalized polyharmonic spline RBF kernel, fitted with a polynomial tail
/// of the given degree.
///
/// The system is positive definite for `degree >= ⌈k/2⌉` when `k` is odd and
/// for `degree == k + 1` when `k` is even.
#[derive(Clone, Debug, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneralizedPolyharmonicKernel {
    pub order: u32,
    pub degree: usize,
}

impl RadialKernel for GeneralizedPolyharmonicKernel {
    #[inline(always)]
    fn phi(&self, r: f64) -> f64 {
        polyharmonic_phi(self.order, r)
    }

    fn polynomial_degree(&self) -> Option<usize> {
        Some(self.degree)
    }

    fn degree_requirement(&self) -> Option<DegreeRequirement> {
        Some(generalized_polyharmonic_requirement(self.order))
    }

    fn validate(&self) -> Result<(), ParameterError> {
        check_order("GeneralizedPolyharmonic", self.order)
    }
}
