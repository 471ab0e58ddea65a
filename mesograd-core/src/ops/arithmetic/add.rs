// src/ops/arithmetic/add.rs

use crate::buffer::Buffer;
use crate::error::MesogradError;
use crate::ops::apply_binary_op;
use crate::tensor::broadcast_utils::reduce_to_shape;
use crate::tensor::{Tensor, TensorOp};

/// Element-wise `a + b` with broadcasting.
pub fn add_op(a: &Tensor, b: &Tensor) -> Result<Tensor, MesogradError> {
    apply_binary_op(a, b, TensorOp::Add, |x, y| Ok(x + y))
}

/// Both operands receive `grad`, summed back over the axes they were broadcast along.
pub(crate) fn add_backward(
    grad: &Buffer,
    a: &Buffer,
    b: &Buffer,
) -> Result<Vec<Buffer>, MesogradError> {
    Ok(vec![
        reduce_to_shape(grad, a.shape())?,
        reduce_to_shape(grad, b.shape())?,
    ])
}

#[cfg(test)]
#[path = "add_test.rs"]
mod tests;
