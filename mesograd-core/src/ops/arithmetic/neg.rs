// src/ops/arithmetic/neg.rs

use crate::buffer::Buffer;
use crate::error::MesogradError;
use crate::ops::apply_unary_op;
use crate::tensor::{Tensor, TensorOp};

/// Element-wise negation.
pub fn neg_op(a: &Tensor) -> Result<Tensor, MesogradError> {
    apply_unary_op(a, TensorOp::Neg, |x| Ok(-x))
}

pub(crate) fn neg_backward(grad: &Buffer) -> Buffer {
    grad.map(|g| -g)
}

#[cfg(test)]
#[path = "neg_test.rs"]
mod tests;
