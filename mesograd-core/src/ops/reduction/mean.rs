// src/ops/reduction/mean.rs

use super::sum::{sum_backward, sum_kernel};
use super::utils::reduced_count;
use crate::buffer::Buffer;
use crate::error::MesogradError;
use crate::numeric::check_domain;
use crate::tensor::{Tensor, TensorOp};

/// Number of elements being averaged. Averaging nothing is a domain error.
fn mean_count(shape: &[usize], axis: Option<usize>) -> Result<f64, MesogradError> {
    let count = reduced_count(shape, axis)? as f64;
    check_domain("mean", count, |n| n > 0.0)?;
    Ok(count)
}

/// Arithmetic mean over `axis`, or over every element when `axis` is `None`.
pub fn mean_op(a: &Tensor, axis: Option<usize>, keep_dims: bool) -> Result<Tensor, MesogradError> {
    let input = a.value();
    let count = mean_count(input.shape(), axis)?;
    let value = sum_kernel(&input, axis, keep_dims)?.map(|s| s / count);
    Ok(Tensor::from_op(
        value,
        TensorOp::Mean { axis, keep_dims },
        vec![a.clone()],
    ))
}

/// Like the sum rule, divided by the reduced extent.
pub(crate) fn mean_backward(
    grad: &Buffer,
    a: &Buffer,
    axis: Option<usize>,
    keep_dims: bool,
) -> Result<Buffer, MesogradError> {
    let count = mean_count(a.shape(), axis)?;
    Ok(sum_backward(grad, a, axis, keep_dims)?.map(|g| g / count))
}

#[cfg(test)]
#[path = "mean_test.rs"]
mod tests;
