use super::*;

#[test]
fn non_uniform_sequence_fails_test() {
    let result = Sequence::new(vec![Vector::zeros(3), Vector::zeros(3), Vector::zeros(4)]);
    assert!(matches!(result, Err(RnnError::SequenceError(_))));
}

#[test]
fn uniform_and_empty_sequences_succeed_test() {
    let sequence = Sequence::new(vec![Vector::zeros(3), Vector::zeros(3), Vector::zeros(3)]).unwrap();
    assert_eq!(sequence.len(), 3);
    assert_eq!(sequence.dimension(), Some(3));

    let empty = Sequence::new(Vec::new()).unwrap();
    assert!(empty.is_empty());
    assert_eq!(empty.dimension(), None);
    assert_eq!(empty, Sequence::empty());
}

#[test]
fn join_concatenates_and_revalidates_test() {
    let a = one_hot_sequence(3, &[0, 1]);
    let b = one_hot_sequence(3, &[2]);

    let joined = a.join(&b).unwrap();
    assert_eq!(joined.len(), 3);
    assert_eq!(joined.get(2), Some(&one_hot(3, 2)));
    // the operands are unchanged
    assert_eq!(a.len(), 2);

    let other_dimension = one_hot_sequence(4, &[0]);
    assert!(matches!(a.join(&other_dimension), Err(RnnError::SequenceError(_))));

    assert_eq!(a.join(&Sequence::empty()).unwrap(), a);
}

#[test]
fn iteration_is_restartable_test() {
    let sequence = one_hot_sequence(2, &[0, 1, 1]);

    let first: Vec<_> = sequence.iter().collect();
    let second: Vec<_> = sequence.iter().collect();
    assert_eq!(first, second);
    assert_eq!((&sequence).into_iter().count(), 3);
}

#[test]
fn try_from_validates_test() {
    assert!(Sequence::try_from(vec![Vector::zeros(1), Vector::zeros(2)]).is_err());
    assert!(Sequence::try_from(vec![Vector::zeros(2)]).is_ok());
}
