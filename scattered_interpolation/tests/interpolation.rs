/////////////////////////////////////////////////////////////////////////////////////////////
//
// End-to-end checks of the public interpolation API.
//
// Created on: 17 Nov 2025     Author: Daniel Owen
//
// Copyright (c) 2025, Maptek Pty Ltd. All rights reserved. Licensed under the MIT License.
//
/////////////////////////////////////////////////////////////////////////////////////////////

use equator::assert;
use faer::{linalg::solvers::Solve, mat, Mat, MatRef};
use scattered_interpolation::{
    evaluate, generate_random_points, interpolate, interpolate_with,
    interpolant_config::{InterpolantSettings, InterpolationMethod, Smoothing},
    metrics::{Chebyshev, Euclidean},
    InterpolationError, RadialBasis, ScatteredInterpolant, TestFunctions,
};

fn unit_square() -> (Mat<f64>, Mat<f64>) {
    (
        mat![[0.0, 0.0, 1.0, 0.5, 1.0], [0.0, 1.0, 0.0, 0.5, 1.0f64]],
        mat![[0.0], [0.5], [0.5], [0.5], [1.0f64]],
    )
}

fn max_abs_diff(a: MatRef<'_, f64>, b: MatRef<'_, f64>) -> f64 {
    let mut max_diff = 0.0f64;
    for j in 0..a.ncols() {
        for i in 0..a.nrows() {
            max_diff = max_diff.max((a[(i, j)] - b[(i, j)]).abs());
        }
    }
    max_diff
}

#[test]
fn multiquadratic_unit_square_scenario() {
    let (points, samples) = unit_square();
    let interpolant = interpolate(RadialBasis::multiquadratic(1.0), points, samples).unwrap();

    let inside = evaluate(&interpolant, mat![[0.6], [0.6f64]].as_ref()).unwrap();
    assert!(inside[(0, 0)] > 0.5);
    assert!(inside[(0, 0)] < 1.0);

    let centre = evaluate(&interpolant, mat![[0.5], [0.5f64]].as_ref()).unwrap();
    assert!((centre[(0, 0)] - 0.5).abs() < 1e-12);
}

#[test]
fn nearest_neighbor_unit_square_scenario() {
    let (points, samples) = unit_square();
    let interpolant = interpolate(InterpolationMethod::NearestNeighbor, points, samples).unwrap();

    let value = evaluate(&interpolant, mat![[0.6], [0.6f64]].as_ref()).unwrap();
    assert!(value[(0, 0)] == 0.5);
}

#[test]
fn shepard_and_nearest_neighbor_return_samples_exactly() {
    let points = generate_random_points(40, 3, Some(1));
    let samples = TestFunctions::franke_3d(points.as_ref());

    for method in [InterpolationMethod::shepard(2.0), InterpolationMethod::NearestNeighbor] {
        let interpolant = interpolate(method, points.clone(), samples.clone()).unwrap();
        let values = interpolant.evaluate(points.as_ref()).unwrap();
        assert!(values == samples);
    }
}

#[test]
fn nearest_neighbor_picks_the_closest_sample() {
    let points = generate_random_points(80, 2, Some(2));
    let samples = Mat::from_fn(80, 1, |i, _| i as f64);
    let interpolant = interpolate_with(
        InterpolationMethod::NearestNeighbor,
        points.clone(),
        samples,
        &InterpolantSettings::builder().metric(Chebyshev).build(),
    )
    .unwrap();

    // A tiny offset from each sample point keeps that point strictly closest.
    let queries = Mat::from_fn(2, 80, |d, j| points[(d, j)] + 1e-9);
    let values = interpolant.evaluate(queries.as_ref()).unwrap();
    for j in 0..80 {
        assert!(values[(j, 0)] == j as f64);
    }
}

#[test]
fn smoothing_is_never_singular_for_well_posed_fits() {
    let points = generate_random_points(50, 2, Some(3));
    let samples = TestFunctions::franke_2d(points.as_ref());

    for smoothing in [Smoothing::Uniform(1e-8), Smoothing::Uniform(0.1), Smoothing::Uniform(10.0)] {
        let settings = InterpolantSettings::builder().smoothing(smoothing).build();
        let interpolant = interpolate_with(
            RadialBasis::generalized_polyharmonic(3, 2),
            points.clone(),
            samples.clone(),
            &settings,
        );
        assert!(interpolant.is_ok());
    }
}

#[test]
fn dimension_mismatch_is_reported() {
    let points = generate_random_points(10, 2, Some(4));
    let samples = Mat::<f64>::zeros(9, 1);

    let result = interpolate(RadialBasis::gaussian(1.0), points, samples);
    assert!(matches!(
        result,
        Err(InterpolationError::DimensionMismatch { expected: 10, found: 9, .. })
    ));
}

#[test]
fn weights_can_be_recovered_from_the_system_matrix() {
    let points = generate_random_points(25, 2, Some(5));
    let samples = TestFunctions::franke_2d(points.as_ref());

    let settings = InterpolantSettings::builder().return_system_matrix(true).build();
    let interpolant = interpolate_with(
        RadialBasis::generalized_multiquadratic(2.0, 0.5, 1),
        points,
        samples.clone(),
        &settings,
    )
    .unwrap();

    let system = interpolant.system_matrix().unwrap();
    // 25 radial weights and the 3 linear monomials in 2D.
    assert!(system.nrows() == 28);

    let mut rhs = Mat::<f64>::zeros(28, 1);
    rhs.subrows_mut(0, 25).copy_from(&samples);
    let recovered = system.full_piv_lu().solve(&rhs);

    let ScatteredInterpolant::Rbf(rbf) = &interpolant else {
        panic!("expected an RBF interpolant");
    };
    let stored = rbf.weights();
    let scale = 1.0 + max_abs_diff(stored.as_ref(), Mat::<f64>::zeros(28, 1).as_ref());
    assert!(max_abs_diff(recovered.as_ref(), stored.as_ref()) < 1e-8 * scale);
}

#[test]
fn per_point_kernels_and_smoothing_through_the_facade() {
    let points = generate_random_points(12, 2, Some(6));
    let samples = TestFunctions::franke_2d(points.as_ref());

    let kernels: Vec<RadialBasis> = (0..12)
        .map(|i| RadialBasis::gaussian(2.0 + 0.25 * i as f64))
        .collect();
    let settings = InterpolantSettings::builder()
        .smoothing(vec![0.0; 12])
        .metric(Euclidean)
        .build();

    let interpolant = interpolate_with(kernels, points.clone(), samples.clone(), &settings).unwrap();
    let fitted = interpolant.evaluate(points.as_ref()).unwrap();
    assert!(max_abs_diff(fitted.as_ref(), samples.as_ref()) < 1e-8);

    let wrong_count: Vec<RadialBasis> = vec![RadialBasis::gaussian(2.0); 11];
    let result = interpolate(wrong_count, points, samples);
    assert!(matches!(
        result,
        Err(InterpolationError::DimensionMismatch { expected: 12, found: 11, .. })
    ));
}

#[test]
fn rbf_only_options_fail_for_other_methods() {
    let (points, samples) = unit_square();
    let settings = InterpolantSettings::builder().smoothing(0.5).build();

    let result = interpolate_with(InterpolationMethod::shepard(2.0), points, samples, &settings);
    assert!(matches!(result, Err(InterpolationError::InvalidOption(_))));
}
