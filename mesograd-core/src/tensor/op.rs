use crate::activation::Activation;
use crate::buffer::Buffer;
use crate::error::MesogradError;
use crate::ops;
use std::fmt;

/// The primitive that produced a tensor node.
///
/// Each arm owns its forward kernel (in `crate::ops`) and the gradient rule dispatched by
/// [`TensorOp::backward`].
#[derive(Debug, Clone, PartialEq)]
pub enum TensorOp {
    Leaf,
    Add,
    Sub,
    Mul,
    Div,
    Neg,
    /// Element-wise `a ** exponent`.
    Pow { exponent: f64 },
    /// Multiplication by a literal.
    Scale { factor: f64 },
    /// Addition of a literal.
    Shift { offset: f64 },
    Exp,
    Ln,
    Sqrt,
    Activation(Activation),
    /// Tensordot over the last `axes` dims of the first operand and the first `axes` dims of
    /// the second.
    Contract { axes: usize },
    Sum { axis: Option<usize>, keep_dims: bool },
    Mean { axis: Option<usize>, keep_dims: bool },
    Reshape,
    Transpose,
}

impl TensorOp {
    pub fn arity(&self) -> usize {
        match self {
            TensorOp::Leaf => 0,
            TensorOp::Add
            | TensorOp::Sub
            | TensorOp::Mul
            | TensorOp::Div
            | TensorOp::Contract { .. } => 2,
            _ => 1,
        }
    }

    /// Computes the gradient contribution for each operand, in operand order.
    ///
    /// `grad` is the output gradient, `inputs` the operand values and `output` the forward
    /// result. Every returned buffer has the shape of the matching operand.
    pub(crate) fn backward(
        &self,
        grad: &Buffer,
        inputs: &[Buffer],
        output: &Buffer,
    ) -> Result<Vec<Buffer>, MesogradError> {
        if inputs.len() != self.arity() {
            return Err(MesogradError::UnsupportedOperation(format!(
                "{} expects {} operands, node holds {}",
                self,
                self.arity(),
                inputs.len()
            )));
        }
        match self {
            TensorOp::Leaf => Ok(Vec::new()),
            TensorOp::Add => ops::arithmetic::add::add_backward(grad, &inputs[0], &inputs[1]),
            TensorOp::Sub => ops::arithmetic::sub::sub_backward(grad, &inputs[0], &inputs[1]),
            TensorOp::Mul => ops::arithmetic::mul::mul_backward(grad, &inputs[0], &inputs[1]),
            TensorOp::Div => ops::arithmetic::div::div_backward(grad, &inputs[0], &inputs[1]),
            TensorOp::Neg => Ok(vec![ops::arithmetic::neg::neg_backward(grad)]),
            TensorOp::Pow { exponent } => Ok(vec![ops::arithmetic::pow::pow_backward(
                grad, &inputs[0], *exponent,
            )?]),
            TensorOp::Scale { factor } => Ok(vec![grad.map(|g| g * factor)]),
            TensorOp::Shift { .. } => Ok(vec![grad.clone()]),
            TensorOp::Exp => Ok(vec![ops::math_elem::exp::exp_backward(grad, output)?]),
            TensorOp::Ln => Ok(vec![ops::math_elem::ln::ln_backward(grad, &inputs[0])?]),
            TensorOp::Sqrt => Ok(vec![ops::math_elem::sqrt::sqrt_backward(grad, output)?]),
            TensorOp::Activation(act) => Ok(vec![ops::activation::activation_backward(
                act, grad, &inputs[0], output,
            )?]),
            TensorOp::Contract { axes } => {
                ops::linalg::matmul::contract_backward(grad, &inputs[0], &inputs[1], *axes)
            }
            TensorOp::Sum { axis, keep_dims } => Ok(vec![ops::reduction::sum::sum_backward(
                grad, &inputs[0], *axis, *keep_dims,
            )?]),
            TensorOp::Mean { axis, keep_dims } => Ok(vec![ops::reduction::mean::mean_backward(
                grad, &inputs[0], *axis, *keep_dims,
            )?]),
            TensorOp::Reshape => Ok(vec![grad.reshaped(inputs[0].shape())?]),
            TensorOp::Transpose => Ok(vec![ops::linalg::transpose::transpose_kernel(grad)?]),
        }
    }
}

impl fmt::Display for TensorOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TensorOp::Leaf => write!(f, "Leaf"),
            TensorOp::Add => write!(f, "Add"),
            TensorOp::Sub => write!(f, "Sub"),
            TensorOp::Mul => write!(f, "Mul"),
            TensorOp::Div => write!(f, "Div"),
            TensorOp::Neg => write!(f, "Neg"),
            TensorOp::Pow { exponent } => write!(f, "Pow[{}]", exponent),
            TensorOp::Scale { factor } => write!(f, "Scale[{}]", factor),
            TensorOp::Shift { offset } => write!(f, "Shift[{}]", offset),
            TensorOp::Exp => write!(f, "Exp"),
            TensorOp::Ln => write!(f, "Ln"),
            TensorOp::Sqrt => write!(f, "Sqrt"),
            TensorOp::Activation(act) => write!(f, "{}", act),
            TensorOp::Contract { axes } => write!(f, "Contract[{}]", axes),
            TensorOp::Sum { axis, keep_dims } => write!(f, "Sum[{:?}, {}]", axis, keep_dims),
            TensorOp::Mean { axis, keep_dims } => write!(f, "Mean[{:?}, {}]", axis, keep_dims),
            TensorOp::Reshape => write!(f, "Reshape"),
            TensorOp::Transpose => write!(f, "Transpose"),
        }
    }
}
