use super::*;
use crate::activation::Activation;
use crate::nn::{mse_loss_scalar, Mlp, Module};
use crate::scalar::Scalar;
use crate::tensor::Tensor;
use approx::assert_relative_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn test_sgd_rejects_bad_learning_rates() {
    for lr in [-0.1, f64::NAN, f64::INFINITY] {
        assert!(matches!(
            Sgd::new(Vec::new(), lr),
            Err(MesogradError::InvalidConfig(_))
        ));
    }
    let mut sgd = Sgd::new(Vec::new(), 0.1).unwrap();
    assert!(sgd.set_lr(-1.0).is_err());
    sgd.set_lr(0.0).unwrap();
    assert_eq!(sgd.lr(), 0.0);
}

#[test]
fn test_sgd_step_scalar() {
    let x = Scalar::new(3.0);
    let loss = &x * &x;
    loss.backward().unwrap();
    assert_eq!(x.grad(), 6.0);

    let mut sgd = Sgd::new(vec![Parameter::from(x.clone())], 0.1).unwrap();
    sgd.step().unwrap();
    assert_relative_eq!(x.value(), 3.0 - 0.1 * 6.0);

    sgd.zero_grad();
    assert_eq!(x.grad(), 0.0);
}

#[test]
fn test_sgd_step_tensor() {
    let w = Tensor::new(vec![1.0, -2.0, 0.5], vec![3]).unwrap();
    w.pow(2.0).unwrap().sum().unwrap().backward().unwrap();

    let mut sgd = Sgd::new(vec![Parameter::from(w.clone())], 0.25).unwrap();
    sgd.step().unwrap();
    // value - 0.25 * 2 * value = value / 2
    assert_eq!(w.data(), vec![0.5, -1.0, 0.25]);
}

#[test]
fn test_sgd_skips_constants() {
    let c = Scalar::constant(1.0);
    c.write_data().grad = 5.0;
    let mut sgd = Sgd::new(vec![Parameter::from(c.clone())], 1.0).unwrap();
    sgd.step().unwrap();
    assert_eq!(c.value(), 1.0);
}

#[test]
fn test_sgd_trains_mlp() {
    let mut rng = StdRng::seed_from_u64(1337);
    let mlp = Mlp::with_rng(3, &[4, 4, 1], Activation::Tanh, &mut rng);
    let xs = [
        [2.0, 3.0, -1.0],
        [3.0, -1.0, 0.5],
        [0.5, 1.0, 1.0],
        [1.0, 1.0, -1.0],
    ];
    let ys = [1.0, -1.0, -1.0, 1.0];
    let targets: Vec<Scalar> = ys.iter().map(|&y| Scalar::constant(y)).collect();

    let mut sgd = Sgd::new(mlp.parameters(), 0.05).unwrap();
    let mut losses = Vec::new();
    for _ in 0..50 {
        let preds: Vec<Scalar> = xs
            .iter()
            .map(|row| {
                let input: Vec<Scalar> = row.iter().map(|&v| Scalar::constant(v)).collect();
                mlp.forward(&input).map(|out| out[0].clone())
            })
            .collect::<Result<_, _>>()
            .unwrap();
        let loss = mse_loss_scalar(&preds, &targets).unwrap();
        sgd.zero_grad();
        loss.backward().unwrap();
        sgd.step().unwrap();
        losses.push(loss.value());
    }
    assert!(losses.last().unwrap() < &losses[0]);
}
