use super::*;

#[test]
fn vector_add_then_subtract_is_identity_test() {
    let a = Vector::new(vec![0.1, -2.5, 3.75, 1e-9]);
    let b = Vector::new(vec![7.0, 0.25, -1.5, 2.0]);

    // Only + and - are involved, so the round trip is exact
    assert_eq!(a.add(&b).unwrap().subtract(&b).unwrap(), a);
}

#[test]
fn vector_mismatched_operands_fail_test() {
    let a = Vector::zeros(3);
    let b = Vector::zeros(4);

    for result in [a.add(&b), a.subtract(&b), a.schur_product(&b)] {
        assert!(matches!(result, Err(RnnError::DimensionMismatch { .. })));
    }
    assert!(matches!(a.dot(&b), Err(RnnError::DimensionMismatch { .. })));
}

#[test]
fn vector_products_test() {
    let a = Vector::new(vec![1.0, 2.0, 3.0]);
    let b = Vector::new(vec![4.0, 5.0, 6.0]);

    assert_eq!(a.dot(&b).unwrap(), 32.0);
    assert_eq!(a.schur_product(&b).unwrap(), Vector::new(vec![4.0, 10.0, 18.0]));
    assert_eq!(a.scale(2.0), Vector::new(vec![2.0, 4.0, 6.0]));
    assert_eq!(a.sum(), 6.0);
}

#[test]
fn dyadic_product_shape_and_values_test() {
    let v = Vector::new(vec![1.0, -2.0, 3.0]);
    let w = Vector::new(vec![0.5, 4.0]);

    let m = v.dyadic_product(&w);
    assert_eq!(m.shape(), (3, 2));
    for i in 0..3 {
        for j in 0..2 {
            assert_eq!(m.get(i, j).unwrap(), v.get(i).unwrap() * w.get(j).unwrap());
        }
    }
}

#[test]
fn one_hot_test() {
    let v = Vector::one_hot(4, 2).unwrap();
    assert_eq!(v.to_vec(), vec![0.0, 0.0, 1.0, 0.0]);
    assert!(Vector::one_hot(4, 4).is_err());
}

#[test]
fn argmax_first_maximum_wins_test() {
    assert_eq!(Vector::new(vec![0.2, 0.4, 0.4]).argmax(), Some(1));
    assert_eq!(Vector::new(vec![-1.0]).argmax(), Some(0));
    assert_eq!(Vector::zeros(0).argmax(), None);
}

#[test]
fn matrix_vector_product_test() {
    let m = Matrix::from_rows(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]).unwrap();
    let v = Vector::new(vec![1.0, 0.0, -1.0]);

    assert_eq!(m.multiply_vector(&v).unwrap(), Vector::new(vec![-2.0, -2.0]));
    assert!(matches!(
        m.multiply_vector(&Vector::zeros(2)),
        Err(RnnError::DimensionMismatch { .. })
    ));
}

#[test]
fn matrix_matrix_product_test() {
    let a = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
    let b = Matrix::from_rows(vec![vec![0.0, 1.0], vec![1.0, 0.0]]).unwrap();

    let product = a.multiply(&b).unwrap();
    assert_eq!(product.to_rows(), vec![vec![2.0, 1.0], vec![4.0, 3.0]]);
    assert_eq!(a.multiply(&Matrix::identity(2)).unwrap(), a);

    let c = Matrix::zeros(3, 3);
    assert!(a.multiply(&c).is_err());
}

#[test]
fn transpose_and_diagonal_test() {
    let m = Matrix::from_rows(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]).unwrap();
    let t = m.transpose();
    assert_eq!(t.shape(), (3, 2));
    assert_eq!(t.get(2, 1), Some(6.0));
    assert_eq!(t.transpose(), m);

    // Only square matrices have a diagonal
    assert!(m.diagonal().is_err());
    let square = Matrix::from_rows(vec![vec![1.0, 9.0], vec![9.0, 2.0]]).unwrap();
    assert_eq!(square.diagonal().unwrap(), Vector::new(vec![1.0, 2.0]));
}

#[test]
fn matrix_elementwise_operations_test() {
    let a = Matrix::filled(2, 3, 2.0);
    let b = Matrix::filled(2, 3, 0.5);

    assert_eq!(a.add(&b).unwrap().subtract(&b).unwrap(), a);
    assert_eq!(a.schur_product(&b).unwrap(), Matrix::filled(2, 3, 1.0));
    assert_eq!(a.scale(-1.0), Matrix::filled(2, 3, -2.0));
    assert!(a.add(&Matrix::zeros(3, 2)).is_err());
}

#[test]
fn operations_do_not_mutate_operands_test() {
    let a = Matrix::filled(2, 2, 1.0);
    let b = Matrix::filled(2, 2, 3.0);
    let _ = a.add(&b).unwrap();
    let _ = a.multiply(&b).unwrap();
    assert_eq!(a, Matrix::filled(2, 2, 1.0));
    assert_eq!(b, Matrix::filled(2, 2, 3.0));
}

#[test]
fn in_place_accumulate_test() {
    let mut acc = Matrix::zeros(2, 3);
    let left = Vector::new(vec![1.0, 2.0]);
    let right = Vector::new(vec![3.0, 4.0, 5.0]);

    acc.add_dyadic_assign(&left, &right).unwrap();
    acc.add_dyadic_assign(&left, &right).unwrap();
    assert_eq!(acc, left.dyadic_product(&right).scale(2.0));

    acc.add_assign(&Matrix::filled(2, 3, 1.0)).unwrap();
    assert_eq!(acc.get(0, 0), Some(7.0));

    acc.scale_in_place(0.5);
    assert_eq!(acc.get(0, 0), Some(3.5));

    acc.fill_zero();
    assert_eq!(acc, Matrix::zeros(2, 3));

    assert!(acc.add_dyadic_assign(&right, &left).is_err());
}

#[test]
fn from_rows_rejects_ragged_rows_test() {
    assert!(Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0]]).is_err());
    let empty = Matrix::from_rows(Vec::new()).unwrap();
    assert!(empty.is_empty());
}

#[test]
fn random_normal_is_scaled_and_seeded_test() {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    let a = Matrix::random_normal(20, 20, 0.1, &mut StdRng::seed_from_u64(5));
    let b = Matrix::random_normal(20, 20, 0.1, &mut StdRng::seed_from_u64(5));
    assert_eq!(a, b);

    let mean = a.iter().sum::<f64>() / a.len() as f64;
    assert_abs_diff_eq!(mean, 0.0, epsilon = 0.05);
    assert!(a.iter().all(|x| x.abs() < 1.0));
}
