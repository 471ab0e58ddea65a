// src/ops/activation/mod.rs

use crate::activation::Activation;
use crate::buffer::Buffer;
use crate::error::MesogradError;
use crate::ops::apply_unary_op;
use crate::tensor::{Tensor, TensorOp};

/// Applies `activation` element-wise.
pub fn activation_op(a: &Tensor, activation: &Activation) -> Result<Tensor, MesogradError> {
    apply_unary_op(a, TensorOp::Activation(activation.clone()), |x| {
        Ok(activation.apply(x))
    })
}

pub fn relu_op(a: &Tensor) -> Result<Tensor, MesogradError> {
    activation_op(a, &Activation::Relu)
}

pub fn tanh_op(a: &Tensor) -> Result<Tensor, MesogradError> {
    activation_op(a, &Activation::Tanh)
}

pub fn sigmoid_op(a: &Tensor) -> Result<Tensor, MesogradError> {
    activation_op(a, &Activation::Sigmoid)
}

/// `grad * f'(x)`, where the derivative may use the forward output.
pub(crate) fn activation_backward(
    activation: &Activation,
    grad: &Buffer,
    a: &Buffer,
    output: &Buffer,
) -> Result<Buffer, MesogradError> {
    let slope = a.zip_map(output, "activation backward", |x, y| {
        activation.derivative(x, y)
    })?;
    grad.zip_map(&slope, "activation backward", |g, s| g * s)
}

#[cfg(test)]
#[path = "activation_test.rs"]
mod tests;
