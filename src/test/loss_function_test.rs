use super::*;

#[test]
fn empty_sequences_have_zero_loss_test() {
    let loss = CrossEntropy::new()
        .sequence_loss(&Sequence::empty(), &Sequence::empty())
        .unwrap();
    assert_eq!(loss, 0.0);
}

#[test]
fn sequence_loss_is_mean_per_step_test() {
    let actual = Sequence::new(vec![
        Vector::new(vec![0.5, 0.5]),
        Vector::new(vec![0.25, 0.75]),
    ])
    .unwrap();
    let expected = one_hot_sequence(2, &[0, 1]);

    let loss = CrossEntropy::new().sequence_loss(&actual, &expected).unwrap();
    let reference = -(0.5f64.ln() + 0.75f64.ln()) / 2.0;
    assert_relative_eq!(loss, reference, epsilon = 1e-12);

    let total = CrossEntropy::new().total_loss(&actual, &expected).unwrap();
    assert_relative_eq!(total, reference * 2.0, epsilon = 1e-12);
}

#[test]
fn length_mismatch_is_a_sequence_error_test() {
    let actual = one_hot_sequence(2, &[0, 1]);
    let expected = one_hot_sequence(2, &[0]);
    assert!(matches!(
        CrossEntropy::new().sequence_loss(&actual, &expected),
        Err(RnnError::SequenceError(_))
    ));
}

#[test]
fn zero_probability_gives_finite_loss_test() {
    let actual = Sequence::new(vec![Vector::new(vec![1.0, 0.0])]).unwrap();
    let expected = one_hot_sequence(2, &[1]);

    let loss = CrossEntropy::new().sequence_loss(&actual, &expected).unwrap();
    assert!(loss.is_finite());
    assert!(loss > 700.0);
}

#[test]
fn batch_loss_weights_by_timesteps_test() {
    let uniform = |steps: usize| {
        Sequence::new(vec![Vector::new(vec![0.5, 0.5]); steps]).unwrap()
    };
    let confident = Sequence::new(vec![Vector::new(vec![1.0, 0.0])]).unwrap();

    let actual = vec![uniform(3), confident];
    let expected = vec![one_hot_sequence(2, &[0, 0, 0]), one_hot_sequence(2, &[0])];

    // 3 steps of ln 2 plus one step of 0, over 4 steps (not the mean of the two means)
    let loss = CrossEntropy::new().batch_loss(&actual, &expected).unwrap();
    assert_relative_eq!(loss, 3.0 * 2.0f64.ln() / 4.0, epsilon = 1e-12);

    assert_eq!(CrossEntropy::new().batch_loss(&[], &[]).unwrap(), 0.0);
    assert!(CrossEntropy::new().batch_loss(&actual, &expected[..1]).is_err());
}
