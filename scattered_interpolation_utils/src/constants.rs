/////////////////////////////////////////////////////////////////////////////////////////////
//
// Defines default kernel parameters shared by the interpolation methods.
//
// Created on: 15 Nov 2025     Author: Daniel Owen
//
// Copyright (c) 2025, Maptek Pty Ltd. All rights reserved. Licensed under the MIT License.
//
/////////////////////////////////////////////////////////////////////////////////////////////

/// Default shape parameter `ε` of the multiquadratic family and the Gaussian.
pub const DEFAULT_SHAPE_PARAMETER: f64 = 1.0;

/// Default order `k` of the polyharmonic spline.
pub const DEFAULT_POLYHARMONIC_ORDER: u32 = 1;

/// Polyharmonic order of the thin plate spline, `phi(r) = r^2 ln(r)`.
pub const THIN_PLATE_ORDER: u32 = 2;

/// Default power parameter `P` of Shepard interpolation.
pub const DEFAULT_SHEPARD_POWER: f64 = 2.0;
