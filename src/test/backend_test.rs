use super::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

#[test]
fn parallel_matches_cpu_matrix_vector_test() {
    let mut rng = StdRng::seed_from_u64(11);
    let m = Matrix::random_normal(64, 48, 1.0, &mut rng);
    let v = Vector::from_array(Matrix::random_normal(1, 48, 1.0, &mut rng).into_array().row(0).to_owned());

    // Threshold 0 forces the parallel path even for small inputs
    let parallel = ParallelBackend::with_threshold(0);
    let expected = CpuBackend.matrix_vector(&m, &v).unwrap();
    let actual = parallel.matrix_vector(&m, &v).unwrap();
    assert!(expected.max_abs_diff(&actual).unwrap() < 1e-12);
}

#[test]
fn parallel_matches_cpu_matrix_matrix_test() {
    let mut rng = StdRng::seed_from_u64(12);
    let a = Matrix::random_normal(32, 16, 1.0, &mut rng);
    let b = Matrix::random_normal(16, 24, 1.0, &mut rng);

    let parallel = ParallelBackend::with_threshold(0);
    let expected = CpuBackend.matrix_matrix(&a, &b).unwrap();
    let actual = parallel.matrix_matrix(&a, &b).unwrap();
    assert_eq!(actual.shape(), (32, 24));
    assert!(expected.max_abs_diff(&actual).unwrap() < 1e-12);
}

#[test]
fn parallel_reports_dimension_mismatch_test() {
    let parallel = ParallelBackend::with_threshold(0);
    let m = Matrix::zeros(4, 3);

    assert!(matches!(
        parallel.matrix_vector(&m, &Vector::zeros(4)),
        Err(RnnError::DimensionMismatch { .. })
    ));
    assert!(matches!(
        parallel.matrix_matrix(&m, &Matrix::zeros(4, 4)),
        Err(RnnError::DimensionMismatch { .. })
    ));
}

#[test]
fn backend_names_and_threshold_test() {
    assert_eq!(CpuBackend.name(), "cpu");
    assert_eq!(ParallelBackend::new().name(), "parallel");
    assert_eq!(
        ParallelBackend::default().threshold(),
        crate::algebra::PARALLEL_MULTIPLY_THRESHOLD
    );
}
