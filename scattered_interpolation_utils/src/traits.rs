/////////////////////////////////////////////////////////////////////////////////////////////
//
// Declares the capability traits shared by radial kernels and distance metrics.
//
// Created on: 15 Nov 2025     Author: Daniel Owen
//
// Copyright (c) 2025, Maptek Pty Ltd. All rights reserved. Licensed under the MIT License.
//
/////////////////////////////////////////////////////////////////////////////////////////////

use crate::kernel_helpers::DegreeRequirement;
use faer::ColRef;
use std::fmt::Debug;

/// Raised when a kernel or metric is constructed with parameters it cannot work with.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("invalid {component} parameter: {reason}")]
pub struct ParameterError {
    /// Name of the kernel or metric that rejected its parameters.
    pub component: &'static str,

    /// Human readable description of the violated constraint.
    pub reason: String,
}

impl ParameterError {
    pub fn new(component: &'static str, reason: impl Into<String>) -> Self {
        Self {
            component,
            reason: reason.into(),
        }
    }
}

/// A radial function `phi(r)` together with the polynomial tail it must be
/// fitted with.
pub trait RadialKernel {
    /// Evaluates the kernel at a nonnegative distance `r`.
    fn phi(&self, r: f64) -> f64;

    /// Degree of the polynomial tail appended to the RBF system for this kernel,
    /// or `None` when the kernel is fitted without one.
    fn polynomial_degree(&self) -> Option<usize> {
        None
    }

    /// Polynomial degree under which the augmented system is guaranteed positive
    /// definite, or `None` when the kernel places no constraint on it.
    fn degree_requirement(&self) -> Option<DegreeRequirement> {
        None
    }

    /// Checks the kernel parameters. A polynomial degree outside
    /// [`degree_requirement`](RadialKernel::degree_requirement) is not an error.
    fn validate(&self) -> Result<(), ParameterError>;
}

/// Pairwise distance between two points stored as matrix columns.
///
/// Implementations must be symmetric and return zero for identical points.
pub trait Metric: Debug + Send + Sync {
    /// Returns the distance between `a` and `b`.
    fn distance(&self, a: ColRef<'_, f64>, b: ColRef<'_, f64>) -> f64;

    /// Lower bound on the distance between two points whose coordinates differ
    /// by `axis_difference` along a single axis. Must be nondecreasing in
    /// `|axis_difference|`.
    ///
    /// Metrics returning `None` cannot prune a k-d tree search.
    fn axis_lower_bound(&self, _axis_difference: f64) -> Option<f64> {
        None
    }

    /// Checks the metric parameters.
    fn validate(&self) -> Result<(), ParameterError> {
        Ok(())
    }
}
