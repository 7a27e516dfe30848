/////////////////////////////////////////////////////////////////////////////////////////////
//
// Specifies interpolation methods, smoothing, metric, and diagnostic options for interpolants.
//
// Created on: 15 Nov 2025     Author: Daniel Owen
//
// Copyright (c) 2025, Maptek Pty Ltd. All rights reserved. Licensed under the MIT License.
//
/////////////////////////////////////////////////////////////////////////////////////////////

//! Specifies interpolation methods, smoothing, metric, and diagnostic options for interpolants.
use crate::error::{InterpolationError, Result};
use scattered_interpolation_utils::{
    kernels::InverseDistanceWeight, metrics::Euclidean, Metric, RadialBasis,
};
use serde::{Deserialize, Serialize};

/// Selects how an interpolant is constructed from the samples.
///
/// # Variants
/// - [`InterpolationMethod::Rbf`]: one radial basis function shared by every point.
/// - [`InterpolationMethod::PerPointRbf`]: one radial basis function per sample
///   point, indexed by position. Must hold exactly `k` kernels.
/// - [`InterpolationMethod::Shepard`]: inverse distance weighting.
/// - [`InterpolationMethod::NearestNeighbor`]: piecewise constant interpolation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InterpolationMethod {
    Rbf(RadialBasis),
    PerPointRbf(Vec<RadialBasis>),
    Shepard(InverseDistanceWeight),
    NearestNeighbor,
}

impl InterpolationMethod {
    /// Shepard interpolation with weights `1 / d^power`.
    pub fn shepard(power: f64) -> Self {
        InterpolationMethod::Shepard(InverseDistanceWeight { power })
    }

    /// Returns `true` for the radial basis function methods.
    pub fn is_rbf(&self) -> bool {
        matches!(
            self,
            InterpolationMethod::Rbf(_) | InterpolationMethod::PerPointRbf(_)
        )
    }

    /// Name of the method, for logs and diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            InterpolationMethod::Rbf(kernel) => kernel.name(),
            InterpolationMethod::PerPointRbf(_) => "PerPointRbf",
            InterpolationMethod::Shepard(_) => "Shepard",
            InterpolationMethod::NearestNeighbor => "NearestNeighbor",
        }
    }
}

impl From<RadialBasis> for InterpolationMethod {
    fn from(kernel: RadialBasis) -> Self {
        InterpolationMethod::Rbf(kernel)
    }
}

impl From<Vec<RadialBasis>> for InterpolationMethod {
    fn from(kernels: Vec<RadialBasis>) -> Self {
        InterpolationMethod::PerPointRbf(kernels)
    }
}

impl From<InverseDistanceWeight> for InterpolationMethod {
    fn from(weight: InverseDistanceWeight) -> Self {
        InterpolationMethod::Shepard(weight)
    }
}

/// Ridge term added to the diagonal of the RBF system.
///
/// A value of `0.0` (default) enforces an exact fit to all input data. Larger
/// values soften the fit, which reduces sensitivity to noisy data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Smoothing {
    /// The same value for every point.
    Uniform(f64),

    /// One value per sample point. Must hold exactly `k` values.
    PerPoint(Vec<f64>),
}

impl Default for Smoothing {
    fn default() -> Self {
        Smoothing::Uniform(0.0)
    }
}

impl Smoothing {
    /// Smoothing values as a slice of length 1 (uniform) or `k` (per point).
    pub fn as_slice(&self) -> &[f64] {
        match self {
            Smoothing::Uniform(value) => std::slice::from_ref(value),
            Smoothing::PerPoint(values) => values,
        }
    }

    /// Smoothing applied to point `i`.
    #[inline(always)]
    pub fn value_at(&self, i: usize) -> f64 {
        match self {
            Smoothing::Uniform(value) => *value,
            Smoothing::PerPoint(values) => values[i],
        }
    }

    /// Returns `true` when no point is smoothed.
    pub fn is_zero(&self) -> bool {
        self.as_slice().iter().all(|&s| s == 0.0)
    }

    /// Checks cardinality against `num_points` and that every value is finite
    /// and nonnegative.
    pub(crate) fn validate(&self, num_points: usize) -> Result<()> {
        if let Smoothing::PerPoint(values) = self {
            if values.len() != num_points {
                return Err(InterpolationError::DimensionMismatch {
                    what: "per-point smoothing",
                    expected: num_points,
                    found: values.len(),
                });
            }
        }

        match self
            .as_slice()
            .iter()
            .find(|s| !(s.is_finite() && **s >= 0.0))
        {
            Some(bad) => Err(InterpolationError::InvalidOption(format!(
                "smoothing must be finite and nonnegative, got {}",
                bad
            ))),
            None => Ok(()),
        }
    }
}

impl From<f64> for Smoothing {
    fn from(value: f64) -> Self {
        Smoothing::Uniform(value)
    }
}

impl From<Vec<f64>> for Smoothing {
    fn from(values: Vec<f64>) -> Self {
        Smoothing::PerPoint(values)
    }
}

/// A convenience builder for constructing an [`InterpolantSettings`] instance.
///
/// The builder should be called via the [`InterpolantSettings::builder`] method.
///
/// See [`InterpolantSettings`] for details on each field.
#[derive(Debug, Clone)]
pub struct InterpolantSettingsBuilder<M = Euclidean> {
    metric: M,
    smoothing: Smoothing,
    return_system_matrix: bool,
}

impl InterpolantSettingsBuilder<Euclidean> {
    /// Creates a new instance of the [`InterpolantSettingsBuilder`].
    fn new() -> Self {
        Self {
            metric: Euclidean,
            smoothing: Smoothing::default(),
            return_system_matrix: false,
        }
    }
}

impl<M: Metric> InterpolantSettingsBuilder<M> {
    /// Sets the distance metric. Changes the metric type of the settings.
    pub fn metric<N: Metric>(self, metric: N) -> InterpolantSettingsBuilder<N> {
        InterpolantSettingsBuilder {
            metric,
            smoothing: self.smoothing,
            return_system_matrix: self.return_system_matrix,
        }
    }

    /// Sets the smoothing (ridge) term, uniform or per point.
    pub fn smoothing(mut self, smoothing: impl Into<Smoothing>) -> Self {
        self.smoothing = smoothing.into();
        self
    }

    /// Keeps a copy of the assembled RBF system matrix for diagnostics.
    pub fn return_system_matrix(mut self, return_system_matrix: bool) -> Self {
        self.return_system_matrix = return_system_matrix;
        self
    }

    /// Builds and returns an instance of [`InterpolantSettings`] from the values
    /// defined in the builder.
    pub fn build(self) -> InterpolantSettings<M> {
        InterpolantSettings {
            metric: self.metric,
            smoothing: self.smoothing,
            return_system_matrix: self.return_system_matrix,
        }
    }
}

/// Options shared by every interpolation method.
///
/// # Example
/// ```
/// use scattered_interpolation::interpolant_config::{InterpolantSettings, Smoothing};
/// use scattered_interpolation::metrics::Cityblock;
///
/// let settings = InterpolantSettings::builder()
///     .metric(Cityblock)
///     .smoothing(0.1)
///     .build();
///
/// assert_eq!(settings.smoothing, Smoothing::Uniform(0.1));
/// assert!(!settings.return_system_matrix);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterpolantSettings<M = Euclidean> {
    /// Pairwise distance used by every method. Defaults to [`Euclidean`].
    pub metric: M,

    /// Ridge term for RBF methods. Must be zero for Shepard and nearest
    /// neighbour.
    pub smoothing: Smoothing,

    /// Keep the assembled RBF system matrix. RBF methods only.
    pub return_system_matrix: bool,
}

impl InterpolantSettings<Euclidean> {
    /// Returns a new [`InterpolantSettingsBuilder`] with the default options.
    pub fn builder() -> InterpolantSettingsBuilder<Euclidean> {
        InterpolantSettingsBuilder::new()
    }
}

impl Default for InterpolantSettings<Euclidean> {
    fn default() -> Self {
        InterpolantSettings::builder().build()
    }
}

impl<M: Metric> InterpolantSettings<M> {
    /// Rejects options that do not apply to `method`.
    pub(crate) fn check_method(&self, method: &InterpolationMethod) -> Result<()> {
        self.metric.validate()?;

        if method.is_rbf() {
            return Ok(());
        }

        if self.return_system_matrix {
            return Err(InterpolationError::InvalidOption(format!(
                "system matrix requested for {}, only RBF methods assemble one",
                method.name()
            )));
        }

        if !self.smoothing.is_zero() {
            return Err(InterpolationError::InvalidOption(format!(
                "smoothing requested for {}, only RBF methods support it",
                method.name()
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scattered_interpolation_utils::metrics::Minkowski;

    #[test]
    fn defaults() {
        let settings = InterpolantSettings::default();
        assert_eq!(settings.metric, Euclidean);
        assert_eq!(settings.smoothing, Smoothing::Uniform(0.0));
        assert!(!settings.return_system_matrix);
    }

    #[test]
    fn builder_swaps_metric_and_keeps_options() {
        let settings = InterpolantSettings::builder()
            .smoothing(vec![0.0, 0.5])
            .return_system_matrix(true)
            .metric(Minkowski { p: 3.0 })
            .build();

        assert_eq!(settings.metric, Minkowski { p: 3.0 });
        assert_eq!(settings.smoothing, Smoothing::PerPoint(vec![0.0, 0.5]));
        assert!(settings.return_system_matrix);
    }

    #[test]
    fn smoothing_validation() {
        assert!(Smoothing::Uniform(0.0).validate(3).is_ok());
        assert!(Smoothing::PerPoint(vec![0.0, 1.0, 2.0]).validate(3).is_ok());
        assert!(matches!(
            Smoothing::PerPoint(vec![0.0, 1.0]).validate(3),
            Err(InterpolationError::DimensionMismatch { expected: 3, found: 2, .. })
        ));
        assert!(matches!(
            Smoothing::Uniform(-1.0).validate(3),
            Err(InterpolationError::InvalidOption(_))
        ));
        assert!(matches!(
            Smoothing::PerPoint(vec![0.0, f64::NAN]).validate(2),
            Err(InterpolationError::InvalidOption(_))
        ));
    }

    #[test]
    fn rbf_only_options_are_rejected_for_other_methods() {
        let smoothed = InterpolantSettings::builder().smoothing(0.1).build();
        let with_matrix = InterpolantSettings::builder()
            .return_system_matrix(true)
            .build();

        for method in [InterpolationMethod::shepard(2.0), InterpolationMethod::NearestNeighbor] {
            assert!(smoothed.check_method(&method).is_err());
            assert!(with_matrix.check_method(&method).is_err());
            assert!(InterpolantSettings::default().check_method(&method).is_ok());
        }

        let rbf = InterpolationMethod::from(RadialBasis::thin_plate());
        assert!(smoothed.check_method(&rbf).is_ok());
        assert!(with_matrix.check_method(&rbf).is_ok());
    }

    #[test]
    fn invalid_metric_is_an_invalid_option() {
        let settings = InterpolantSettings::builder()
            .metric(Minkowski { p: 0.5 })
            .build();
        assert!(matches!(
            settings.check_method(&InterpolationMethod::NearestNeighbor),
            Err(InterpolationError::InvalidOption(_))
        ));
    }
}
