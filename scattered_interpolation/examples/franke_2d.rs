use scattered_interpolation::{
    create_evaluation_grid, generate_random_points, interpolate, interpolate_with,
    interpolant_config::{InterpolantSettings, InterpolationMethod},
    metrics::Cityblock,
    RadialBasis, TestFunctions,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Define input source points at random within [0, 1]^2
    let dim = 2usize;
    let num_points = 100usize;
    let points = generate_random_points(num_points, dim, Some(42));

    // Define some values at the source points using Franke's function
    let point_values = TestFunctions::franke_2d(points.as_ref());

    // Build a 2D grid of target points in [0, 1]^2 to evaluate at
    let n = 50;
    let target_points = create_evaluation_grid(&[(0.0, 1.0), (0.0, 1.0)], &[n, n]);
    let exact_values = TestFunctions::franke_2d(target_points.as_ref());

    let methods: Vec<InterpolationMethod> = vec![
        RadialBasis::generalized_polyharmonic(3, 2).into(),
        RadialBasis::gaussian(3.0).into(),
        InterpolationMethod::shepard(2.0),
        InterpolationMethod::NearestNeighbor,
    ];

    for method in methods {
        let name = method.name();
        let interpolant = interpolate(method, points.clone(), point_values.clone())?;
        let interpolated_values = interpolant.evaluate(target_points.as_ref())?;

        let max_error = (0..interpolated_values.nrows())
            .map(|i| (interpolated_values[(i, 0)] - exact_values[(i, 0)]).abs())
            .fold(0.0f64, f64::max);

        println!("{name:>26}: max error {max_error:.4e} on a {n}x{n} grid");
    }

    // Smoothed fit under the L1 metric
    let settings = InterpolantSettings::builder()
        .metric(Cityblock)
        .smoothing(1e-3)
        .build();
    let smoothed = interpolate_with(
        RadialBasis::generalized_polyharmonic(1, 1),
        points,
        point_values,
        &settings,
    )?;
    let _smoothed_values = smoothed.evaluate(target_points.as_ref())?;

    Ok(())
}
