/////////////////////////////////////////////////////////////////////////////////////////////
//
// Dispatches fitting, evaluation, and model persistence across the interpolation methods.
//
// Created on: 16 Nov 2025     Author: Daniel Owen
//
// Copyright (c) 2025, Maptek Pty Ltd. All rights reserved. Licensed under the MIT License.
//
/////////////////////////////////////////////////////////////////////////////////////////////

use crate::{
    error::{InterpolationError, ModelIOError, ModelIOResult, Result},
    interpolant_config::{InterpolantSettings, InterpolationMethod},
    nearest_neighbor::NearestNeighborInterpolant,
    rbf::RadialBasisInterpolant,
    shepard::ShepardInterpolant,
};
use faer::{Mat, MatRef};
use log::debug;
use scattered_interpolation_utils::{metrics::Euclidean, Metric};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::Path,
};

/// Operations shared by every fitted interpolant.
pub trait Interpolant {
    /// Values at `points` (`n × q`), one row per query point.
    fn evaluate(&self, points: MatRef<'_, f64>) -> Result<Mat<f64>>;

    /// Number of coordinates `n` of each point.
    fn dimensions(&self) -> usize;

    /// Number of values `m` per sample.
    fn value_dimensions(&self) -> usize;
}

impl<M: Metric> Interpolant for RadialBasisInterpolant<M> {
    fn evaluate(&self, points: MatRef<'_, f64>) -> Result<Mat<f64>> {
        RadialBasisInterpolant::evaluate(self, points)
    }

    fn dimensions(&self) -> usize {
        RadialBasisInterpolant::dimensions(self)
    }

    fn value_dimensions(&self) -> usize {
        RadialBasisInterpolant::value_dimensions(self)
    }
}

impl<M: Metric> Interpolant for ShepardInterpolant<M> {
    fn evaluate(&self, points: MatRef<'_, f64>) -> Result<Mat<f64>> {
        ShepardInterpolant::evaluate(self, points)
    }

    fn dimensions(&self) -> usize {
        ShepardInterpolant::dimensions(self)
    }

    fn value_dimensions(&self) -> usize {
        ShepardInterpolant::value_dimensions(self)
    }
}

impl<M: Metric> Interpolant for NearestNeighborInterpolant<M> {
    fn evaluate(&self, points: MatRef<'_, f64>) -> Result<Mat<f64>> {
        NearestNeighborInterpolant::evaluate(self, points)
    }

    fn dimensions(&self) -> usize {
        NearestNeighborInterpolant::dimensions(self)
    }

    fn value_dimensions(&self) -> usize {
        NearestNeighborInterpolant::value_dimensions(self)
    }
}

/// A fitted interpolant of any method.
///
/// Created by [`interpolate`] or [`interpolate_with`]. Immutable once built, so
/// it can be evaluated from many threads at once.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ScatteredInterpolant<M = Euclidean> {
    Rbf(RadialBasisInterpolant<M>),
    Shepard(ShepardInterpolant<M>),
    NearestNeighbor(NearestNeighborInterpolant<M>),
}

impl<M: Metric> ScatteredInterpolant<M> {
    /// Values at `points` (`n × q`), one row per query point.
    ///
    /// # Errors
    /// [`InterpolationError::DimensionMismatch`] when the query points do not
    /// have the fitted number of coordinates.
    pub fn evaluate(&self, points: MatRef<'_, f64>) -> Result<Mat<f64>> {
        self.as_interpolant().evaluate(points)
    }

    pub fn dimensions(&self) -> usize {
        self.as_interpolant().dimensions()
    }

    pub fn value_dimensions(&self) -> usize {
        self.as_interpolant().value_dimensions()
    }

    pub fn num_points(&self) -> usize {
        match self {
            ScatteredInterpolant::Rbf(rbf) => rbf.num_points(),
            ScatteredInterpolant::Shepard(idw) => idw.num_points(),
            ScatteredInterpolant::NearestNeighbor(nn) => nn.num_points(),
        }
    }

    /// Name of the fitted method.
    pub fn method_name(&self) -> &'static str {
        match self {
            ScatteredInterpolant::Rbf(rbf) if rbf.kernels().len() > 1 => "PerPointRbf",
            ScatteredInterpolant::Rbf(rbf) => rbf.kernels().first().map_or("Rbf", |k| k.name()),
            ScatteredInterpolant::Shepard(_) => "Shepard",
            ScatteredInterpolant::NearestNeighbor(_) => "NearestNeighbor",
        }
    }

    /// The assembled RBF system, `(k + p) × (k + p)`.
    ///
    /// # Errors
    /// [`InterpolationError::InvalidOption`] unless the interpolant is an RBF
    /// fitted with `return_system_matrix` set.
    pub fn system_matrix(&self) -> Result<&Mat<f64>> {
        match self {
            ScatteredInterpolant::Rbf(rbf) => rbf.system_matrix().ok_or_else(|| {
                InterpolationError::InvalidOption(
                    "system matrix was not requested when fitting".to_string(),
                )
            }),
            other => Err(InterpolationError::InvalidOption(format!(
                "{} assembles no system matrix",
                other.method_name()
            ))),
        }
    }

    fn as_interpolant(&self) -> &dyn Interpolant {
        match self {
            ScatteredInterpolant::Rbf(rbf) => rbf,
            ScatteredInterpolant::Shepard(idw) => idw,
            ScatteredInterpolant::NearestNeighbor(nn) => nn,
        }
    }

    fn check_consistency(&self) -> Result<()> {
        match self {
            ScatteredInterpolant::Rbf(rbf) => rbf.check_consistency(),
            ScatteredInterpolant::Shepard(idw) => idw.check_consistency(),
            ScatteredInterpolant::NearestNeighbor(nn) => nn.check_consistency(),
        }
    }
}

impl<M: Metric> Interpolant for ScatteredInterpolant<M> {
    fn evaluate(&self, points: MatRef<'_, f64>) -> Result<Mat<f64>> {
        ScatteredInterpolant::evaluate(self, points)
    }

    fn dimensions(&self) -> usize {
        ScatteredInterpolant::dimensions(self)
    }

    fn value_dimensions(&self) -> usize {
        ScatteredInterpolant::value_dimensions(self)
    }
}

impl<M: Metric + Serialize> ScatteredInterpolant<M> {
    /// Save this interpolant to a **JSON envelope** `{ format, version, model }`.
    ///
    /// Files produced here are intended to be read back with
    /// [`ScatteredInterpolant::load_model`].
    ///
    /// ### Errors
    /// - Returns `ModelIOError::{Create, Serialize, Flush}` on I/O or serialization
    ///   failures.
    ///
    /// ### Example
    /// ```no_run
    /// # use scattered_interpolation::ScatteredInterpolant;
    /// # let interpolant: ScatteredInterpolant = unimplemented!();
    /// interpolant.save_model("model.json")?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn save_model<P: AsRef<Path>>(&self, path: P) -> ModelIOResult<()> {
        let path_ref = path.as_ref();
        let file = File::create(path_ref).map_err(|e| ModelIOError::Create {
            path: path_ref.to_path_buf(),
            source: e,
        })?;
        let mut w = BufWriter::new(file);

        let env = JsonEnvelopeRef {
            format: JSON_FORMAT_NAME,
            version: JSON_VERSION,
            model: self,
        };

        serde_json::to_writer_pretty(&mut w, &env).map_err(|e| ModelIOError::Serialize {
            path: path_ref.to_path_buf(),
            source: e,
        })?;
        w.flush().map_err(|e| ModelIOError::Flush {
            path: path_ref.to_path_buf(),
            source: e,
        })?;

        debug!("Saved {} model to {}", self.method_name(), path_ref.display());
        Ok(())
    }
}

impl<M: Metric + DeserializeOwned> ScatteredInterpolant<M> {
    /// Load an interpolant from a versioned **JSON envelope**, validating format
    /// and version, then rebuilding the nearest neighbour search index.
    ///
    /// ### Errors
    /// - Returns `ModelIOError::{Open, Parse, FormatMismatch, VersionMismatch}` as
    ///   appropriate, and `ModelIOError::Invalid` when the stored model is
    ///   inconsistent.
    pub fn load_model<P: AsRef<Path>>(path: P) -> ModelIOResult<Self> {
        let path_ref = path.as_ref();

        let file = File::open(path_ref).map_err(|e| ModelIOError::Open {
            path: path_ref.to_path_buf(),
            source: e,
        })?;
        let reader = BufReader::new(file);

        let env: JsonEnvelopeOwned<Self> =
            serde_json::from_reader(reader).map_err(|e| ModelIOError::Parse {
                path: path_ref.to_path_buf(),
                source: e,
            })?;

        // Validate envelope
        if env.format != JSON_FORMAT_NAME {
            return Err(ModelIOError::FormatMismatch {
                path: path_ref.to_path_buf(),
                found: env.format,
                expected: JSON_FORMAT_NAME,
            });
        }

        if env.version != JSON_VERSION {
            return Err(ModelIOError::VersionMismatch {
                path: path_ref.to_path_buf(),
                found: env.version,
                expected: JSON_VERSION,
            });
        }

        let mut model = env.model;
        model.check_consistency().map_err(|e| ModelIOError::Invalid {
            path: path_ref.to_path_buf(),
            source: e,
        })?;

        if let ScatteredInterpolant::NearestNeighbor(nn) = &mut model {
            nn.rebuild_index();
        }

        Ok(model)
    }
}

/// Fits `method` to `samples` (`k × m`) at `points` (`n × k`) with Euclidean
/// distances, no smoothing and no retained system matrix.
///
/// # Examples
///
/// ```
/// use faer::mat;
/// use scattered_interpolation::{interpolate, RadialBasis};
///
/// let points = mat![[0.0, 0.0, 1.0, 0.5, 1.0], [0.0, 1.0, 0.0, 0.5, 1.0f64]];
/// let samples = mat![[0.0], [0.5], [0.5], [0.5], [1.0f64]];
///
/// let interpolant = interpolate(RadialBasis::multiquadratic(1.0), points, samples)?;
/// let value = interpolant.evaluate(mat![[0.6], [0.6f64]].as_ref())?[(0, 0)];
/// assert!(value > 0.5 && value < 1.0);
/// # Ok::<(), scattered_interpolation::InterpolationError>(())
/// ```
pub fn interpolate(
    method: impl Into<InterpolationMethod>,
    points: Mat<f64>,
    samples: Mat<f64>,
) -> Result<ScatteredInterpolant> {
    interpolate_with(method, points, samples, &InterpolantSettings::default())
}

/// Fits `method` with explicit options.
///
/// # Errors
/// - [`InterpolationError::DimensionMismatch`] when points, samples, per-point
///   kernels or per-point smoothing disagree in count.
/// - [`InterpolationError::InvalidOption`] for invalid parameters, or smoothing
///   and system matrix requests on a method other than RBF.
/// - [`InterpolationError::SingularSystem`] when an RBF system cannot be solved.
pub fn interpolate_with<M: Metric + Clone>(
    method: impl Into<InterpolationMethod>,
    points: Mat<f64>,
    samples: Mat<f64>,
    settings: &InterpolantSettings<M>,
) -> Result<ScatteredInterpolant<M>> {
    let method = method.into();
    settings.check_method(&method)?;

    debug!(
        "Interpolating {} samples with {} using {:?}",
        samples.nrows(),
        method.name(),
        settings.metric
    );

    let interpolant = match method {
        InterpolationMethod::Rbf(kernel) => ScatteredInterpolant::Rbf(
            RadialBasisInterpolant::fit(vec![kernel], points, samples, settings)?,
        ),
        InterpolationMethod::PerPointRbf(kernels) => ScatteredInterpolant::Rbf(
            RadialBasisInterpolant::fit(kernels, points, samples, settings)?,
        ),
        InterpolationMethod::Shepard(weight) => ScatteredInterpolant::Shepard(
            ShepardInterpolant::fit(weight, points, samples, settings)?,
        ),
        InterpolationMethod::NearestNeighbor => ScatteredInterpolant::NearestNeighbor(
            NearestNeighborInterpolant::fit(points, samples, settings)?,
        ),
    };

    Ok(interpolant)
}

/// Values of `interpolant` at `points` (`n × q`), one row per query point.
pub fn evaluate<M: Metric>(
    interpolant: &ScatteredInterpolant<M>,
    points: MatRef<'_, f64>,
) -> Result<Mat<f64>> {
    interpolant.evaluate(points)
}

const JSON_FORMAT_NAME: &str = "scattered_interpolation.json";
const JSON_VERSION: u32 = 1;

/// Borrowing envelope for SAVE (no clone of the model).
#[derive(Serialize)]
struct JsonEnvelopeRef<'a, T: ?Sized> {
    format: &'static str,
    version: u32,
    #[serde(flatten)]
    model: &'a T,
}

/// Owning envelope for LOAD (generic over the concrete model).
#[derive(Deserialize)]
struct JsonEnvelopeOwned<T> {
    format: String,
    version: u32,
    #[serde(flatten)]
    model: T,
}
