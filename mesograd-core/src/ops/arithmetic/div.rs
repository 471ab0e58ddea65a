// src/ops/arithmetic/div.rs

use crate::buffer::Buffer;
use crate::error::MesogradError;
use crate::numeric::{check_domain, check_finite};
use crate::ops::apply_binary_op;
use crate::tensor::broadcast_utils::{broadcast_binary, reduce_to_shape};
use crate::tensor::{Tensor, TensorOp};

/// Element-wise `a / b` with broadcasting.
///
/// A zero divisor fails with `NumericDomain` unless the engine allows non-finite values.
pub fn div_op(a: &Tensor, b: &Tensor) -> Result<Tensor, MesogradError> {
    apply_binary_op(a, b, TensorOp::Div, |x, y| {
        check_domain("div", y, |y| y != 0.0)?;
        check_finite("div", y, x / y)
    })
}

/// `grad_a = grad / b` and `grad_b = -grad * a / b²`.
pub(crate) fn div_backward(
    grad: &Buffer,
    a: &Buffer,
    b: &Buffer,
) -> Result<Vec<Buffer>, MesogradError> {
    let unreduced_a = broadcast_binary(grad, b, |g, y| Ok(g / y))?;
    let quotient_slope = broadcast_binary(a, b, |x, y| Ok(-x / (y * y)))?;
    let unreduced_b = broadcast_binary(grad, &quotient_slope, |g, s| Ok(g * s))?;
    Ok(vec![
        reduce_to_shape(&unreduced_a, a.shape())?,
        reduce_to_shape(&unreduced_b, b.shape())?,
    ])
}

#[cfg(test)]
#[path = "div_test.rs"]
mod tests;
