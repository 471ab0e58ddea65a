// src/ops/arithmetic/sub.rs

use crate::buffer::Buffer;
use crate::error::MesogradError;
use crate::ops::apply_binary_op;
use crate::tensor::broadcast_utils::reduce_to_shape;
use crate::tensor::{Tensor, TensorOp};

/// Element-wise `a - b` with broadcasting.
pub fn sub_op(a: &Tensor, b: &Tensor) -> Result<Tensor, MesogradError> {
    apply_binary_op(a, b, TensorOp::Sub, |x, y| Ok(x - y))
}

pub(crate) fn sub_backward(
    grad: &Buffer,
    a: &Buffer,
    b: &Buffer,
) -> Result<Vec<Buffer>, MesogradError> {
    let grad_a = reduce_to_shape(grad, a.shape())?;
    let grad_b = reduce_to_shape(&grad.map(|g| -g), b.shape())?;
    Ok(vec![grad_a, grad_b])
}

#[cfg(test)]
#[path = "sub_test.rs"]
mod tests;
