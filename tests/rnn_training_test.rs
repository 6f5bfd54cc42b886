use rustyrnn::prelude::*;

fn one_hot_sequence(size: usize, indices: &[usize]) -> Sequence {
    Sequence::new(
        indices
            .iter()
            .map(|&i| Vector::one_hot(size, i).unwrap())
            .collect(),
    )
    .unwrap()
}

fn data_set_loss(network: &RecurrentNetwork, data: &SequenceDataSet) -> f64 {
    let outputs: Vec<Sequence> = data
        .iter()
        .map(|pair| network.evaluate(&pair.input).unwrap())
        .collect();
    let expected: Vec<Sequence> = data.iter().map(|pair| pair.expected.clone()).collect();
    network.batch_loss(&outputs, &expected).unwrap()
}

#[test]
fn test_one_epoch_on_repeated_pair_does_not_increase_loss() {
    let input = one_hot_sequence(4, &[0, 1, 2, 3]);
    let expected = one_hot_sequence(4, &[1, 2, 3, 0]);
    let mut data =
        SequenceDataSet::from_sequences(vec![input; 10], vec![expected; 10]).unwrap();

    let mut network = RecurrentNetwork::builder()
        .input_dimension(4)
        .output_dimension(4)
        .hidden_dimension(8)
        .random_state(2024)
        .build()
        .unwrap();

    let config = TrainingConfig {
        epochs: 1,
        batch_size: 1,
        truncation_horizon: 3,
        optimizer: RMSPropConfig::new(0.001, 0.9, 1e-4, 0.5).unwrap(),
        random_state: Some(7),
        ..TrainingConfig::default()
    };

    let loss_before = data_set_loss(&network, &data);
    let report = network.fit(&mut data, &config).unwrap();
    let loss_after = data_set_loss(&network, &data);

    assert_eq!(report.outcome, TrainingOutcome::Completed);
    assert_eq!(report.batch_losses.len(), 10);
    assert!(
        loss_after <= loss_before,
        "loss rose from {} to {}",
        loss_before,
        loss_after
    );
}

#[test]
fn test_character_model_learns_a_cycle() {
    let dictionary = Dictionary::new("abcd?".chars().collect(), '?').unwrap();
    let encoder = SequenceEncoder::new(dictionary);

    let text: Vec<char> = "abcdabcdabcd".chars().collect();
    let window = 4;
    let (inputs, expected): (Vec<Sequence>, Vec<Sequence>) = (0..text.len() - window)
        .map(|i| {
            let input = encoder.input_sequence(&text[i..i + window]).unwrap();
            let output = encoder.input_sequence(&text[i + 1..i + window + 1]).unwrap();
            (input, output)
        })
        .unzip();
    let mut data = SequenceDataSet::from_sequences(inputs, expected).unwrap();

    let mut network = RecurrentNetwork::builder()
        .input_dimension(5)
        .output_dimension(5)
        .hidden_dimension(12)
        .random_state(99)
        .build()
        .unwrap();

    let config = TrainingConfig {
        epochs: 200,
        batch_size: 4,
        truncation_horizon: 3,
        loss_threshold: Some(0.05),
        optimizer: RMSPropConfig::new(0.01, 0.9, 0.01, 1.0).unwrap(),
        random_state: Some(1),
        ..TrainingConfig::default()
    };

    let loss_before = data_set_loss(&network, &data);
    let report = network.fit(&mut data, &config).unwrap();
    let loss_after = data_set_loss(&network, &data);

    assert!(loss_after < loss_before);
    let final_loss = report.final_loss().unwrap();
    assert!(final_loss.is_finite());

    if report.early_stopped() {
        // the cycle is learnt: generation continues it
        let seed = encoder.input_sequence(&['a', 'b']).unwrap();
        let generated = network.generate(&seed, 6).unwrap();
        assert_eq!(encoder.decode(&generated).unwrap(), vec!['a', 'b', 'c', 'd', 'a', 'b']);
    }
}
