//! # Tensor Operations Module (`ops`)
//!
//! One file per primitive, grouped by category. Each file provides:
//!
//! - a forward function (`xxx_op`) that computes the result buffer and links the output node
//!   into the graph through [`Tensor::from_op`], and
//! - the gradient rule (`xxx_backward`) that [`TensorOp::backward`] dispatches to.
//!
//! The `Tensor` methods in `crate::tensor` are thin wrappers over the `_op` functions.
//!
//! ## Key Submodules:
//!
//! - [`arithmetic`]: Element-wise arithmetic with broadcasting (add, sub, mul, div, neg, pow,
//!   scale, shift).
//! - [`math_elem`]: Element-wise math functions (exp, ln, sqrt).
//! - [`activation`]: Element-wise non-linearities.
//! - [`linalg`]: Contraction, matmul and 2-D transpose.
//! - [`reduction`]: Sum and mean over all elements or one axis.
//! - [`view`]: Shape changes (reshape).

use crate::buffer::Buffer;
use crate::error::MesogradError;
use crate::tensor::broadcast_utils::broadcast_binary;
use crate::tensor::{Tensor, TensorOp};

pub mod activation;
pub mod arithmetic;
pub mod linalg;
pub mod math_elem;
pub mod reduction;
pub mod view;

/// Applies a unary element-wise operation to a tensor and records `op` as its producer.
///
/// `f` may fail for inputs outside the domain of the operation; the first failure aborts the
/// forward pass and no node is created.
pub(crate) fn apply_unary_op<F>(a: &Tensor, op: TensorOp, f: F) -> Result<Tensor, MesogradError>
where
    F: Fn(f64) -> Result<f64, MesogradError>,
{
    let input = a.value();
    let data = input
        .data()
        .iter()
        .map(|&x| f(x))
        .collect::<Result<Vec<_>, _>>()?;
    let value = Buffer::new(data, input.shape().to_vec())?;
    Ok(Tensor::from_op(value, op, vec![a.clone()]))
}

/// Applies a binary element-wise operation with NumPy broadcasting and records `op`.
pub(crate) fn apply_binary_op<F>(
    a: &Tensor,
    b: &Tensor,
    op: TensorOp,
    f: F,
) -> Result<Tensor, MesogradError>
where
    F: Fn(f64, f64) -> Result<f64, MesogradError>,
{
    let value = broadcast_binary(&a.value(), &b.value(), f)?;
    Ok(Tensor::from_op(value, op, vec![a.clone(), b.clone()]))
}
