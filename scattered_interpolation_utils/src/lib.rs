/////////////////////////////////////////////////////////////////////////////////////////////
//
// Re-exports kernel utilities, metrics, constants, and helper functions used across the
// scattered_interpolation crates.
//
// Created on: 15 Nov 2025     Author: Daniel Owen
//
// Copyright (c) 2025, Maptek Pty Ltd. All rights reserved. Licensed under the MIT License.
//
/////////////////////////////////////////////////////////////////////////////////////////////

//! # Utilities for the `scattered_interpolation` crate
//!
//! Provides the closed [`RadialBasis`] kernel set, the [`Metric`] capability
//! and its standard implementations, and the dense kernel matrix builders.
mod constants;
mod kernel_helpers;
mod non_rbf_kernels;
mod rbf_kernels;
mod traits;
mod utils;

/// Implemented kernels.
pub mod kernels {
    pub use super::non_rbf_kernels::*;
    pub use super::rbf_kernels::*;
}

/// Implemented distance metrics.
pub mod metrics;

pub use {
    constants::{
        DEFAULT_POLYHARMONIC_ORDER, DEFAULT_SHAPE_PARAMETER, DEFAULT_SHEPARD_POWER,
        THIN_PLATE_ORDER,
    },
    kernel_helpers::{
        generalized_multiquadratic_requirement, generalized_polyharmonic_requirement,
        polynomial_basis_size, DegreeRequirement,
    },
    traits::{Metric, ParameterError, RadialKernel},
    utils::{
        argmin, get_a_matrix, get_a_matrix_with_smoothing, get_distance, get_distance_sq,
        get_pointarray_extents, RadialBasis,
    },
};
