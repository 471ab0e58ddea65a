//! Parameter initialization.

use crate::buffer::Buffer;
use crate::error::MesogradError;
use crate::scalar::Scalar;
use crate::tensor::Tensor;
use rand::Rng;
use rand_distr::{Distribution, Uniform};

fn check_range(low: f64, high: f64) -> Result<(), MesogradError> {
    if !(low < high) || !low.is_finite() || !high.is_finite() {
        return Err(MesogradError::InvalidConfig(format!(
            "uniform range [{}, {}) is empty or not finite",
            low, high
        )));
    }
    Ok(())
}

/// `n` trainable scalar leaves drawn uniformly from `[low, high)`.
pub fn uniform_scalars<R: Rng + ?Sized>(
    n: usize,
    low: f64,
    high: f64,
    rng: &mut R,
) -> Result<Vec<Scalar>, MesogradError> {
    check_range(low, high)?;
    let dist = Uniform::new(low, high);
    Ok((0..n).map(|_| Scalar::new(dist.sample(rng))).collect())
}

/// Weights of a fresh neuron: uniform in `[-1, 1)`.
pub(crate) fn unit_uniform_scalars<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Vec<Scalar> {
    let dist = Uniform::new(-1.0, 1.0);
    (0..n).map(|_| Scalar::new(dist.sample(rng))).collect()
}

/// Refills a leaf tensor in place with values drawn uniformly from `[low, high)`.
pub fn uniform_<R: Rng + ?Sized>(
    tensor: &Tensor,
    low: f64,
    high: f64,
    rng: &mut R,
) -> Result<(), MesogradError> {
    check_range(low, high)?;
    let dist = Uniform::new(low, high);
    let data = (0..tensor.numel()).map(|_| dist.sample(rng)).collect();
    tensor.set_value(Buffer::new(data, tensor.shape())?)
}

/// Kaiming-style uniform init for a `[fan_in, fan_out]` weight: bound `sqrt(1 / fan_in)`.
pub fn kaiming_uniform_<R: Rng + ?Sized>(tensor: &Tensor, rng: &mut R) -> Result<(), MesogradError> {
    let fan_in = tensor.shape().first().copied().unwrap_or(1).max(1);
    let bound = (1.0 / fan_in as f64).sqrt();
    uniform_(tensor, -bound, bound, rng)
}

/// Fills a leaf tensor with zeros.
pub fn zeros_(tensor: &Tensor) -> Result<(), MesogradError> {
    fill_(tensor, 0.0)
}

pub fn ones_(tensor: &Tensor) -> Result<(), MesogradError> {
    fill_(tensor, 1.0)
}

fn fill_(tensor: &Tensor, value: f64) -> Result<(), MesogradError> {
    tensor.set_value(Buffer::full(&tensor.shape(), value))
}
