// src/ops/view/reshape.rs

use crate::error::MesogradError;
use crate::tensor::{Tensor, TensorOp};

/// Reinterprets the row-major elements of `a` under `new_shape`.
///
/// The element count must be preserved. The gradient is reshaped back to the input shape.
pub fn reshape_op(a: &Tensor, new_shape: &[usize]) -> Result<Tensor, MesogradError> {
    let value = a.value().reshaped(new_shape)?;
    Ok(Tensor::from_op(value, TensorOp::Reshape, vec![a.clone()]))
}

#[cfg(test)]
#[path = "reshape_test.rs"]
mod tests;
