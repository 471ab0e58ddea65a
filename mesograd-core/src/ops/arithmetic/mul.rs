// src/ops/arithmetic/mul.rs

use crate::buffer::Buffer;
use crate::error::MesogradError;
use crate::ops::apply_binary_op;
use crate::tensor::broadcast_utils::{broadcast_binary, reduce_to_shape};
use crate::tensor::{Tensor, TensorOp};

/// Element-wise `a * b` with broadcasting.
pub fn mul_op(a: &Tensor, b: &Tensor) -> Result<Tensor, MesogradError> {
    apply_binary_op(a, b, TensorOp::Mul, |x, y| Ok(x * y))
}

/// `grad_a = grad * b` and `grad_b = grad * a`, each reduced to its operand's shape.
///
/// `grad` already has the broadcast output shape, so broadcasting it against either operand
/// yields a buffer of that same shape.
pub(crate) fn mul_backward(
    grad: &Buffer,
    a: &Buffer,
    b: &Buffer,
) -> Result<Vec<Buffer>, MesogradError> {
    let unreduced_a = broadcast_binary(grad, b, |g, y| Ok(g * y))?;
    let unreduced_b = broadcast_binary(grad, a, |g, x| Ok(g * x))?;
    Ok(vec![
        reduce_to_shape(&unreduced_a, a.shape())?,
        reduce_to_shape(&unreduced_b, b.shape())?,
    ])
}

#[cfg(test)]
#[path = "mul_test.rs"]
mod tests;
