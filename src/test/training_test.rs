use super::*;
use std::cell::RefCell;
use std::rc::Rc;

fn cyclic_data_set(copies: usize) -> SequenceDataSet {
    let input = one_hot_sequence(3, &[0, 1, 2, 0]);
    let expected = one_hot_sequence(3, &[1, 2, 0, 1]);
    SequenceDataSet::from_sequences(vec![input; copies], vec![expected; copies]).unwrap()
}

fn config(epochs: usize, batch_size: usize) -> TrainingConfig {
    TrainingConfig {
        epochs,
        batch_size,
        truncation_horizon: 3,
        random_state: Some(42),
        ..TrainingConfig::default()
    }
}

#[test]
fn training_config_validation_test() {
    assert!(TrainingConfig::default().validate().is_ok());
    assert!(Trainer::new(config(0, 1)).is_err());
    assert!(Trainer::new(config(1, 0)).is_err());

    let nan_threshold = TrainingConfig {
        loss_threshold: Some(f64::NAN),
        ..TrainingConfig::default()
    };
    assert!(matches!(
        nan_threshold.validate(),
        Err(RnnError::ConfigurationError(_))
    ));

    let bad_optimizer = TrainingConfig {
        optimizer: RMSPropConfig {
            min_multiplier: 2.0,
            ..RMSPropConfig::default()
        },
        ..TrainingConfig::default()
    };
    assert!(bad_optimizer.validate().is_err());
}

#[test]
fn completed_run_reports_every_batch_test() {
    let mut network = small_network(3, 3, 6, 1);
    let mut data = cyclic_data_set(5);

    let report = Trainer::new(config(3, 2)).unwrap().train(&mut network, &mut data).unwrap();
    assert_eq!(report.outcome, TrainingOutcome::Completed);
    assert!(!report.early_stopped());
    assert_eq!(report.epochs_run, 3);
    // 5 pairs in batches of 2 keep the short batch: 3 per epoch
    assert_eq!(report.batch_losses.len(), 9);
    assert!(report.batch_losses.iter().all(|l| l.is_finite() && *l > 0.0));
}

#[test]
fn dropped_trailing_batch_is_skipped_test() {
    let mut network = small_network(3, 3, 6, 1);
    let mut data = cyclic_data_set(5);
    let config = TrainingConfig {
        trailing_batch: TrailingBatch::Drop,
        ..config(2, 2)
    };

    let report = network.fit(&mut data, &config).unwrap();
    assert_eq!(report.batch_losses.len(), 4);
}

#[test]
fn early_stop_skips_update_test() {
    let mut network = small_network(3, 3, 6, 1);
    let before = network.clone();
    let mut data = cyclic_data_set(2);
    let config = TrainingConfig {
        loss_threshold: Some(1e6),
        ..config(5, 1)
    };

    let report = network.fit(&mut data, &config).unwrap();
    assert!(report.early_stopped());
    assert_eq!(report.batch_losses.len(), 1);
    assert_eq!(report.epochs_run, 1);
    match report.outcome {
        TrainingOutcome::EarlyStopped { epoch, batch, loss } => {
            assert_eq!((epoch, batch), (0, 0));
            assert_eq!(Some(loss), report.final_loss());
        }
        TrainingOutcome::Completed => panic!("expected early stop"),
    }
    // the stopping batch is not applied
    for weight in Weight::ALL {
        assert_eq!(network.weights(weight), before.weights(weight));
    }
}

#[test]
fn unbounded_epochs_end_by_early_stop_test() {
    let mut network = small_network(3, 3, 6, 1);
    let mut data = cyclic_data_set(2);
    let config = TrainingConfig {
        epochs: usize::MAX,
        loss_threshold: Some(100.0),
        show_progress: true,
        ..config(1, 1)
    };

    let report = network.fit(&mut data, &config).unwrap();
    assert!(report.early_stopped());
    assert_eq!(report.epochs_run, 1);
    assert_eq!(report.batch_losses.len(), 1);
}

#[test]
fn batch_loss_is_mean_over_timesteps_test() {
    let mut network = small_network(3, 3, 6, 2);
    let before = network.clone();
    let mut data = cyclic_data_set(3);

    let report = network.fit(&mut data, &config(1, 3)).unwrap();

    // One batch with every pair: its loss is the loss of the untouched network
    let outputs: Vec<Sequence> = data.iter().map(|p| before.evaluate(&p.input).unwrap()).collect();
    let expected: Vec<Sequence> = data.iter().map(|p| p.expected.clone()).collect();
    let reference = before.batch_loss(&outputs, &expected).unwrap();
    assert_relative_eq!(report.batch_losses[0], reference, epsilon = 1e-12);
}

#[test]
fn single_batch_update_matches_manual_step_test() {
    let mut network = small_network(3, 3, 5, 3);
    let before = network.clone();
    let mut data = cyclic_data_set(2);
    let config = config(1, 2);

    network.fit(&mut data, &config).unwrap();

    // Averaged gradients over 8 timesteps, then one RMSProp step per weight
    let mut gradients = Gradients::zeros(before.config());
    for pair in data.iter() {
        let trace = before.forward(&pair.input).unwrap();
        before
            .accumulate_gradients(&pair.input, &trace, &pair.expected, config.truncation_horizon, &mut gradients)
            .unwrap();
    }
    gradients.scale(1.0 / 8.0);

    let mut manual = before.clone();
    let mut optimizer = AdaptiveOptimizer::new(before.config(), config.optimizer).unwrap();
    optimizer.update(&mut manual, &gradients).unwrap();

    for weight in Weight::ALL {
        let diff = manual.weights(weight).max_abs_diff(network.weights(weight)).unwrap();
        assert!(diff < 1e-12, "{} differs by {}", weight.name(), diff);
    }
}

#[test]
fn parallel_batches_match_sequential_test() {
    let mut sequential = small_network(3, 3, 6, 10);
    let mut parallel = sequential.clone();
    let mut data_a = cyclic_data_set(6);
    let mut data_b = cyclic_data_set(6);

    let sequential_config = config(2, 3);
    let parallel_config = TrainingConfig {
        parallel: true,
        ..sequential_config.clone()
    };

    let a = sequential.fit(&mut data_a, &sequential_config).unwrap();
    let b = parallel.fit(&mut data_b, &parallel_config).unwrap();

    for (x, y) in a.batch_losses.iter().zip(b.batch_losses.iter()) {
        assert_relative_eq!(*x, *y, epsilon = 1e-10);
    }
    for weight in Weight::ALL {
        let diff = sequential.weights(weight).max_abs_diff(parallel.weights(weight)).unwrap();
        assert!(diff < 1e-10);
    }
}

#[test]
fn callbacks_run_before_every_epoch_test() {
    let mut network = small_network(3, 3, 4, 5);
    let mut data = cyclic_data_set(2);
    let seen = Rc::new(RefCell::new(Vec::new()));

    let mut trainer = Trainer::new(config(4, 1)).unwrap();
    let recorder = Rc::clone(&seen);
    trainer.add_callback(move |epoch: usize, network: &RecurrentNetwork| {
        recorder.borrow_mut().push((epoch, network.param_count()));
    });
    trainer.add_callback(GenerateSample::new(one_hot_sequence(3, &[0]), 5));
    trainer.train(&mut network, &mut data).unwrap();

    let epochs: Vec<usize> = seen.borrow().iter().map(|(epoch, _)| *epoch).collect();
    assert_eq!(epochs, vec![0, 1, 2, 3]);
}

#[test]
fn empty_data_set_is_rejected_test() {
    let mut network = small_network(3, 3, 4, 5);
    let mut data = SequenceDataSet::default();
    assert!(matches!(
        network.fit(&mut data, &config(1, 1)),
        Err(RnnError::DataSetError(_))
    ));
}

#[test]
fn instance_errors_end_the_run_test() {
    let mut network = small_network(3, 3, 4, 5);
    let mut data = SequenceDataSet::from_sequences(
        vec![one_hot_sequence(4, &[0, 1])],
        vec![one_hot_sequence(3, &[1, 2])],
    )
    .unwrap();
    assert!(matches!(
        network.fit(&mut data, &config(2, 1)),
        Err(RnnError::DimensionMismatch { .. })
    ));
}
