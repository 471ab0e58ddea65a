// Helpers shared by the integration tests. Each test crate uses a different subset.
#![allow(dead_code)]

use mesograd_core::{Scalar, Tensor};

/// Installs `env_logger` once so `RUST_LOG=debug cargo test` shows engine logs.
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn create_test_tensor(data: Vec<f64>, shape: Vec<usize>) -> Tensor {
    Tensor::new(data, shape).expect("Test tensor creation failed")
}

pub fn constants(values: &[f64]) -> Vec<Scalar> {
    values.iter().map(|&v| Scalar::constant(v)).collect()
}
