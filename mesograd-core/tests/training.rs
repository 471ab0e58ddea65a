use mesograd_core::nn::{mse_loss, mse_loss_scalar, Linear, Mlp, Module};
use mesograd_core::optim::{Optimizer, Sgd};
use mesograd_core::{Activation, Scalar, Tensor};
use rand::rngs::StdRng;
use rand::SeedableRng;

mod common;
use common::{constants, init_logger};

#[test]
fn test_mlp_training_reduces_loss() {
    init_logger();
    let mut rng = StdRng::seed_from_u64(42);
    let model = Mlp::with_rng(3, &[4, 4, 1], Activation::Tanh, &mut rng);
    let xs = [
        [2.0, 3.0, -1.0],
        [3.0, -1.0, 0.5],
        [0.5, 1.0, 1.0],
        [1.0, 1.0, -1.0],
    ];
    let targets = constants(&[1.0, -1.0, -1.0, 1.0]);

    let mut optimizer = Sgd::new(model.parameters(), 0.05).unwrap();
    let mut first_loss = None;
    let mut last_loss = f64::INFINITY;
    for _ in 0..100 {
        let mut predictions = Vec::with_capacity(xs.len());
        for row in &xs {
            let out = model.forward(&constants(row)).unwrap();
            predictions.push(out[0].clone());
        }
        let loss: Scalar = mse_loss_scalar(&predictions, &targets).unwrap();

        optimizer.zero_grad();
        loss.backward().unwrap();
        optimizer.step().unwrap();

        first_loss.get_or_insert(loss.value());
        last_loss = loss.value();
    }
    let first_loss = first_loss.unwrap();
    assert!(
        last_loss < first_loss,
        "loss went from {} to {}",
        first_loss,
        last_loss
    );
}

#[test]
fn test_linear_regression_converges() {
    init_logger();
    let mut rng = StdRng::seed_from_u64(7);
    let layer = Linear::with_rng(2, 1, &mut rng).unwrap();
    let x = Tensor::constant(
        vec![0.0, 1.0, 1.0, 0.0, 1.0, 1.0, -1.0, 0.5, 0.5, -1.0],
        vec![5, 2],
    )
    .unwrap();
    // y = 2 * x0 - 1 * x1 + 0.5
    let y = Tensor::constant(vec![-0.5, 2.5, 1.5, -2.0, 2.5], vec![5, 1]).unwrap();

    let mut optimizer = Sgd::new(layer.parameters(), 0.1).unwrap();
    let mut losses = Vec::new();
    for _ in 0..300 {
        let loss = mse_loss(&layer.forward(&x).unwrap(), &y).unwrap();
        optimizer.zero_grad();
        loss.backward().unwrap();
        optimizer.step().unwrap();
        losses.push(loss.item().unwrap());
    }
    assert!(losses[losses.len() - 1] < 1e-3, "final loss {:?}", losses.last());

    let w = layer.weight().data();
    assert!((w[0] - 2.0).abs() < 0.1 && (w[1] + 1.0).abs() < 0.1, "weights {:?}", w);
    assert!((layer.bias().data()[0] - 0.5).abs() < 0.1);
}
