// src/tensor/create.rs

use crate::buffer::Buffer;
use crate::error::MesogradError;
use crate::tensor::Tensor;
use rand::Rng;
use rand_distr::{Distribution, Normal, Uniform};

/// Leaf tensor of zeros that requires gradients.
pub fn zeros(shape: &[usize]) -> Tensor {
    Tensor::from_buffer(Buffer::zeros(shape), true)
}

/// Leaf tensor of ones that requires gradients.
pub fn ones(shape: &[usize]) -> Tensor {
    Tensor::from_buffer(Buffer::ones(shape), true)
}

/// Leaf tensor filled with `value` that requires gradients.
pub fn full(shape: &[usize], value: f64) -> Tensor {
    Tensor::from_buffer(Buffer::full(shape, value), true)
}

/// Leaf tensor with elements drawn uniformly from `[low, high)`.
pub fn rand_uniform<R: Rng + ?Sized>(
    shape: &[usize],
    low: f64,
    high: f64,
    rng: &mut R,
) -> Result<Tensor, MesogradError> {
    if !(low < high) || !low.is_finite() || !high.is_finite() {
        return Err(MesogradError::InvalidConfig(format!(
            "uniform range [{}, {}) is empty or not finite",
            low, high
        )));
    }
    let dist = Uniform::new(low, high);
    let numel: usize = shape.iter().product();
    let data: Vec<f64> = (0..numel).map(|_| dist.sample(rng)).collect();
    Tensor::new(data, shape.to_vec())
}

/// Leaf tensor with elements drawn from a normal distribution.
pub fn randn<R: Rng + ?Sized>(
    shape: &[usize],
    mean: f64,
    std_dev: f64,
    rng: &mut R,
) -> Result<Tensor, MesogradError> {
    let dist = Normal::new(mean, std_dev).map_err(|e| {
        MesogradError::InvalidConfig(format!("normal({}, {}): {}", mean, std_dev, e))
    })?;
    let numel: usize = shape.iter().product();
    let data: Vec<f64> = (0..numel).map(|_| dist.sample(rng)).collect();
    Tensor::new(data, shape.to_vec())
}

impl Tensor {
    /// Leaf of zeros with this tensor's shape.
    pub fn zeros_like(&self) -> Tensor {
        zeros(&self.shape())
    }

    /// Leaf of ones with this tensor's shape.
    pub fn ones_like(&self) -> Tensor {
        ones(&self.shape())
    }
}

#[cfg(test)]
#[path = "create_test.rs"]
mod tests;
