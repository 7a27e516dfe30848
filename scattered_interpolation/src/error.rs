/////////////////////////////////////////////////////////////////////////////////////////////
//
// Defines the error taxonomy for interpolant construction, evaluation, and model I/O.
//
// Created on: 16 Nov 2025     Author: Daniel Owen
//
// Copyright (c) 2025, Maptek Pty Ltd. All rights reserved. Licensed under the MIT License.
//
/////////////////////////////////////////////////////////////////////////////////////////////

use scattered_interpolation_utils::ParameterError;
use std::{io, path::PathBuf};

/// Errors raised while constructing or evaluating an interpolant.
///
/// All of them are detected eagerly, before any partial result is produced.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InterpolationError {
    /// Cardinalities of points, samples, per-point kernels or smoothing values
    /// disagree, or a query point has the wrong number of coordinates.
    #[error("dimension mismatch in {what}: expected {expected}, found {found}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },

    /// The assembled linear system is numerically singular.
    #[error("singular {size}x{size} system (numerical rank {rank})")]
    SingularSystem { size: usize, rank: usize },

    /// An option or kernel parameter is invalid for the selected method.
    #[error("invalid option: {0}")]
    InvalidOption(String),
}

impl From<ParameterError> for InterpolationError {
    fn from(err: ParameterError) -> Self {
        InterpolationError::InvalidOption(err.to_string())
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, InterpolationError>;

pub(crate) type ModelIOResult<T> = std::result::Result<T, ModelIOError>;

/// Errors that can occur when saving or loading a [`ScatteredInterpolant`](crate::ScatteredInterpolant)
/// model, wrapping lower-level I/O and JSON serialization issues as well as
/// format/version validation failures.
#[derive(Debug, thiserror::Error)]
pub enum ModelIOError {
    /// Failed to create the target file before writing a model.
    #[error("creating {}: {source}", .path.display())]
    Create { path: PathBuf, source: io::Error },

    /// Failed to open an existing model file for reading.
    #[error("opening {}: {source}", .path.display())]
    Open { path: PathBuf, source: io::Error },

    /// Failed to flush buffered output when finishing a write.
    #[error("flushing {}: {source}", .path.display())]
    Flush { path: PathBuf, source: io::Error },

    /// Error serializing the in-memory model to JSON.
    #[error("serializing JSON to {}: {source}", .path.display())]
    Serialize {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// Error parsing JSON when reading a model from disk.
    #[error("parsing JSON in {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// The JSON `format` field does not match the expected model format.
    #[error("unsupported format {found:?} (expected {expected:?}) in {}", .path.display())]
    FormatMismatch {
        path: PathBuf,
        found: String,
        expected: &'static str,
    },

    /// The JSON `version` field does not match the supported version.
    #[error("unsupported version {found} (expected {expected}) in {}", .path.display())]
    VersionMismatch {
        path: PathBuf,
        found: u32,
        expected: u32,
    },

    /// The stored model failed validation after parsing.
    #[error("invalid model in {}: {source}", .path.display())]
    Invalid {
        path: PathBuf,
        source: InterpolationError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parameter_errors_become_invalid_options() {
        let err: InterpolationError = ParameterError::new("Shepard", "power must be positive").into();
        match err {
            InterpolationError::InvalidOption(msg) => {
                assert!(msg.contains("Shepard"));
                assert!(msg.contains("power must be positive"));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn messages_name_the_mismatch() {
        let err = InterpolationError::DimensionMismatch {
            what: "samples",
            expected: 5,
            found: 4,
        };
        assert_eq!(
            err.to_string(),
            "dimension mismatch in samples: expected 5, found 4"
        );
        assert_eq!(
            InterpolationError::SingularSystem { size: 3, rank: 2 }.to_string(),
            "singular 3x3 system (numerical rank 2)"
        );
    }
}
