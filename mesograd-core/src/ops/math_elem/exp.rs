// src/ops/math_elem/exp.rs

use crate::buffer::Buffer;
use crate::error::MesogradError;
use crate::numeric::check_finite;
use crate::ops::apply_unary_op;
use crate::tensor::{Tensor, TensorOp};

/// Element-wise `e^x`. Overflow to infinity fails with `NumericDomain`.
pub fn exp_op(a: &Tensor) -> Result<Tensor, MesogradError> {
    apply_unary_op(a, TensorOp::Exp, |x| check_finite("exp", x, x.exp()))
}

/// `grad * e^x`, reusing the forward output.
pub(crate) fn exp_backward(grad: &Buffer, output: &Buffer) -> Result<Buffer, MesogradError> {
    grad.zip_map(output, "exp backward", |g, y| g * y)
}
