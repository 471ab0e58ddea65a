// src/ops/arithmetic/pow.rs

use crate::buffer::Buffer;
use crate::error::MesogradError;
use crate::numeric::{check_domain, check_finite, pow_domain};
use crate::ops::apply_unary_op;
use crate::tensor::{Tensor, TensorOp};

/// Raises every element to the constant power `exponent`.
///
/// Negative bases with a fractional exponent and zero bases with a negative exponent fail with
/// `NumericDomain`.
pub fn pow_op(a: &Tensor, exponent: f64) -> Result<Tensor, MesogradError> {
    apply_unary_op(a, TensorOp::Pow { exponent }, |x| {
        check_domain("pow", x, |x| pow_domain(x, exponent))?;
        check_finite("pow", x, x.powf(exponent))
    })
}

/// `grad * k * a^(k-1)`. The derivative of `a^0` is `0` everywhere.
pub(crate) fn pow_backward(
    grad: &Buffer,
    a: &Buffer,
    exponent: f64,
) -> Result<Buffer, MesogradError> {
    if exponent == 0.0 {
        return Ok(Buffer::zeros(a.shape()));
    }
    grad.zip_map(a, "pow backward", |g, x| g * exponent * x.powf(exponent - 1.0))
}

#[cfg(test)]
#[path = "pow_test.rs"]
mod tests;
