//! Trains a small scalar MLP on four hand-written samples with plain SGD.
//!
//! Run with `RUST_LOG=debug cargo run --example train_mlp` to see the engine's logs.

use log::info;
use mesograd_core::nn::{mse_loss_scalar, Mlp, Module};
use mesograd_core::optim::{Optimizer, Sgd};
use mesograd_core::{Activation, MesogradError, Scalar};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> Result<(), MesogradError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // A single sigmoid node.
    let a = Scalar::new(0.4);
    let b = Scalar::new(0.2);
    let y = (&a + &b).sigmoid();
    y.backward()?;
    info!("sigmoid(0.4 + 0.2) = {:.6}, d/da = {:.6}", y.value(), a.grad());
    info!("graph:\n{}", y.graph_snapshot()?);

    let mut rng = StdRng::seed_from_u64(2024);
    let model = Mlp::with_rng(3, &[4, 4, 1], Activation::Tanh, &mut rng);
    info!("{} ({} parameters)", model, model.num_parameters());

    let xs = [
        [2.0, 3.0, -1.0],
        [3.0, -1.0, 0.5],
        [0.5, 1.0, 1.0],
        [1.0, 1.0, -1.0],
    ];
    let targets: Vec<Scalar> = [1.0, -1.0, -1.0, 1.0].iter().map(|&t| Scalar::constant(t)).collect();

    let mut optimizer = Sgd::new(model.parameters(), 0.1)?;
    for epoch in 0..50 {
        let predictions = xs
            .iter()
            .map(|row| {
                let input: Vec<Scalar> = row.iter().map(|&v| Scalar::constant(v)).collect();
                Ok(model.forward(&input)?.remove(0))
            })
            .collect::<Result<Vec<Scalar>, MesogradError>>()?;
        let loss = mse_loss_scalar(&predictions, &targets)?;

        optimizer.zero_grad();
        loss.backward()?;
        optimizer.step()?;

        if epoch % 10 == 0 {
            info!("epoch {:>2}: loss = {:.6}", epoch, loss.value());
        }
    }

    for (row, target) in xs.iter().zip(&targets) {
        let input: Vec<Scalar> = row.iter().map(|&v| Scalar::constant(v)).collect();
        let out = model.forward(&input)?;
        info!("{:?} -> {:.4} (target {})", row, out[0].value(), target.value());
    }
    Ok(())
}
