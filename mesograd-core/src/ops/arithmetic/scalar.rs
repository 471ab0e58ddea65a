// src/ops/arithmetic/scalar.rs

use crate::error::MesogradError;
use crate::ops::apply_unary_op;
use crate::tensor::{Tensor, TensorOp};

/// Multiplies every element by the literal `factor`.
pub fn scale_op(a: &Tensor, factor: f64) -> Result<Tensor, MesogradError> {
    apply_unary_op(a, TensorOp::Scale { factor }, |x| Ok(x * factor))
}

/// Adds the literal `offset` to every element.
pub fn shift_op(a: &Tensor, offset: f64) -> Result<Tensor, MesogradError> {
    apply_unary_op(a, TensorOp::Shift { offset }, |x| Ok(x + offset))
}
