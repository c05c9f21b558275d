use super::*;

/// Helper to build a scaled vector without going through a scaler
fn scaled(values: &[f32]) -> ScaledFeatureVector {
    ScaledFeatureVector::new(values.to_vec())
}

/// Helper for a single sigmoid unit over `weights.len()` inputs
fn logistic(weights: &[f32], bias: f32) -> DenseNetwork {
    DenseNetwork::new(vec![DenseLayer {
        weights: weights.iter().map(|&w| vec![w]).collect(),
        bias: vec![bias],
        activation: Activation::Sigmoid,
    }])
    .unwrap()
}

#[test]
fn test_zero_logit_scores_one_half() {
    let network = logistic(&[1.0, -1.0], 0.0);
    let score = network.score(&scaled(&[2.0, 2.0])).unwrap();
    assert!((score - 0.5).abs() < 1e-7, "Expected 0.5, got {}", score);
}

#[test]
fn test_score_is_monotonic_in_logit() {
    let network = logistic(&[1.0], 0.0);
    let low = network.score(&scaled(&[-3.0])).unwrap();
    let high = network.score(&scaled(&[3.0])).unwrap();
    assert!(low < 0.5 && high > 0.5);
    assert!((low + high - 1.0).abs() < 1e-6);
}

#[test]
fn test_hidden_layer_forward_pass() {
    // relu(x0 - x1), relu(x1 - x0) summed with weight 1 and a linear output
    let network = DenseNetwork::new(vec![
        DenseLayer {
            weights: vec![vec![1.0, -1.0], vec![-1.0, 1.0]],
            bias: vec![0.0, 0.0],
            activation: Activation::Relu,
        },
        DenseLayer {
            weights: vec![vec![0.25], vec![0.25]],
            bias: vec![0.0],
            activation: Activation::Linear,
        },
    ])
    .unwrap();

    assert_eq!(network.input_len(), 2);
    let score = network.score(&scaled(&[1.0, 3.0])).unwrap();
    assert!((score - 0.5).abs() < 1e-7, "Expected |1-3|/4 = 0.5, got {}", score);
}

#[test]
fn test_linear_output_is_clamped() {
    let network = DenseNetwork::new(vec![DenseLayer {
        weights: vec![vec![10.0]],
        bias: vec![0.0],
        activation: Activation::Linear,
    }])
    .unwrap();

    assert_eq!(network.score(&scaled(&[5.0])).unwrap(), 1.0);
    assert_eq!(network.score(&scaled(&[-5.0])).unwrap(), 0.0);
}

#[test]
fn test_nan_output_is_invalid_score() {
    let network = DenseNetwork::new(vec![DenseLayer {
        weights: vec![vec![1.0]],
        bias: vec![0.0],
        activation: Activation::Linear,
    }])
    .unwrap();

    let err = network.score(&scaled(&[f32::NAN])).unwrap_err();
    assert!(matches!(err, PipelineError::InvalidScore { .. }));
}

#[test]
fn test_input_width_mismatch() {
    let network = logistic(&[1.0, 1.0, 1.0], 0.0);
    let err = network.score(&scaled(&[1.0, 1.0])).unwrap_err();
    assert_eq!(
        err,
        PipelineError::ConfigMismatch {
            component: "DenseNetwork".to_string(),
            expected: 3,
            actual: 2,
        }
    );
}

#[test]
fn test_rejects_broken_layer_chain() {
    let result = DenseNetwork::new(vec![
        DenseLayer {
            weights: vec![vec![1.0, 1.0]],
            bias: vec![0.0, 0.0],
            activation: Activation::Relu,
        },
        DenseLayer {
            weights: vec![vec![1.0], vec![1.0], vec![1.0]],
            bias: vec![0.0],
            activation: Activation::Sigmoid,
        },
    ]);
    assert!(matches!(result, Err(PipelineError::ConfigMismatch { .. })));
}

#[test]
fn test_rejects_multiple_outputs_and_empty_network() {
    let wide = DenseNetwork::new(vec![DenseLayer {
        weights: vec![vec![1.0, 1.0]],
        bias: vec![0.0, 0.0],
        activation: Activation::Sigmoid,
    }]);
    assert!(wide.is_err());
    assert!(DenseNetwork::new(Vec::new()).is_err());
}

#[test]
fn test_rejects_ragged_kernel() {
    let ragged = DenseNetwork::new(vec![DenseLayer {
        weights: vec![vec![1.0], vec![1.0, 2.0]],
        bias: vec![0.0],
        activation: Activation::Sigmoid,
    }]);
    assert!(matches!(ragged, Err(PipelineError::ConfigMismatch { .. })));
}

#[test]
fn test_deserialize_network_json() {
    let json = r#"{
        "layers": [
            {"weights": [[0.5], [0.5]], "bias": [0.0], "activation": "sigmoid"}
        ]
    }"#;
    let network: DenseNetwork = serde_json::from_str(json).unwrap();
    assert_eq!(network.input_len(), 2);
    assert_eq!(network.layers()[0].activation, Activation::Sigmoid);
    assert_eq!(network.name(), "dense_network");

    let score = network.score(&scaled(&[0.0, 0.0])).unwrap();
    assert!((score - 0.5).abs() < 1e-7);
}

#[test]
fn test_classifier_is_object_safe() {
    let boxed: Box<dyn Classifier> = Box::new(logistic(&[1.0], 0.0));
    assert_eq!(boxed.input_len(), 1);
}
