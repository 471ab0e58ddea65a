// src/ops/math_elem/ln.rs

use crate::buffer::Buffer;
use crate::error::MesogradError;
use crate::numeric::check_domain;
use crate::ops::apply_unary_op;
use crate::tensor::{Tensor, TensorOp};

/// Element-wise natural logarithm. Inputs `<= 0` fail with `NumericDomain`.
pub fn ln_op(a: &Tensor) -> Result<Tensor, MesogradError> {
    apply_unary_op(a, TensorOp::Ln, |x| {
        check_domain("ln", x, |x| x > 0.0)?;
        Ok(x.ln())
    })
}

pub(crate) fn ln_backward(grad: &Buffer, a: &Buffer) -> Result<Buffer, MesogradError> {
    grad.zip_map(a, "ln backward", |g, x| g / x)
}

#[cfg(test)]
#[path = "ln_test.rs"]
mod tests;
