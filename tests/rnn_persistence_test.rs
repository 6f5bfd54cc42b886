use rustyrnn::prelude::*;
use std::fs;

#[test]
fn test_save_and_load_round_trip() {
    let network = RecurrentNetwork::builder()
        .input_dimension(3)
        .output_dimension(2)
        .hidden_dimension(4)
        .softmax_temperature(0.7)
        .random_state(55)
        .build()
        .unwrap();

    let path = std::env::temp_dir().join(format!("rustyrnn_round_trip_{}.json", std::process::id()));
    network.save_to_path(&path).unwrap();
    let loaded = RecurrentNetwork::load_from_path(&path);
    fs::remove_file(&path).unwrap();
    let loaded = loaded.unwrap();

    assert_eq!(loaded.config(), network.config());
    for weight in Weight::ALL {
        assert_eq!(loaded.weights(weight), network.weights(weight));
    }

    let input = Sequence::new(vec![
        Vector::one_hot(3, 2).unwrap(),
        Vector::one_hot(3, 0).unwrap(),
    ])
    .unwrap();
    assert_eq!(loaded.evaluate(&input).unwrap(), network.evaluate(&input).unwrap());
}

#[test]
fn test_loading_missing_file_is_an_io_error() {
    let path = std::env::temp_dir().join("rustyrnn_definitely_missing_weights.json");
    assert!(matches!(
        RecurrentNetwork::load_from_path(&path),
        Err(RnnError::Io(_))
    ));
}

#[test]
fn test_loading_inconsistent_weights_fails() {
    let path = std::env::temp_dir().join(format!("rustyrnn_inconsistent_{}.json", std::process::id()));
    let contents = r#"{
        "config": {
            "input_dimension": 2,
            "output_dimension": 2,
            "hidden_dimension": 2,
            "softmax_temperature": 1.0,
            "random_state": null
        },
        "input_weights": [[0.1, 0.2], [0.3, 0.4]],
        "recurrent_weights": [[0.1, 0.2], [0.3, 0.4]],
        "output_weights": [[0.1, 0.2, 0.3], [0.4, 0.5, 0.6]]
    }"#;
    fs::write(&path, contents).unwrap();
    let result = RecurrentNetwork::load_from_path(&path);
    fs::remove_file(&path).unwrap();

    assert!(matches!(result, Err(RnnError::DimensionMismatch { .. })));

    let garbage = std::env::temp_dir().join(format!("rustyrnn_garbage_{}.json", std::process::id()));
    fs::write(&garbage, "not json").unwrap();
    let result = RecurrentNetwork::load_from_path(&garbage);
    fs::remove_file(&garbage).unwrap();
    assert!(matches!(result, Err(RnnError::Json(_))));
}
