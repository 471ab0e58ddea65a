// src/ops/reduction/sum.rs

use super::utils::{kept_shape, reduced_shape};
use crate::buffer::Buffer;
use crate::error::MesogradError;
use crate::tensor::broadcast_utils::expand_to_shape;
use crate::tensor::{Tensor, TensorOp};

/// Sums `a` over `axis`, or over every element when `axis` is `None`.
pub(crate) fn sum_kernel(
    a: &Buffer,
    axis: Option<usize>,
    keep_dims: bool,
) -> Result<Buffer, MesogradError> {
    let output_shape = reduced_shape(a.shape(), axis, keep_dims)?;
    let ax = match axis {
        None => return Buffer::new(vec![a.sum()], output_shape),
        Some(ax) => ax,
    };

    let shape = a.shape();
    let outer: usize = shape[..ax].iter().product();
    let len = shape[ax];
    let inner: usize = shape[ax + 1..].iter().product();
    let src = a.data();

    let mut data = vec![0.0; outer * inner];
    for o in 0..outer {
        for l in 0..len {
            let base = (o * len + l) * inner;
            for (i, out) in data[o * inner..(o + 1) * inner].iter_mut().enumerate() {
                *out += src[base + i];
            }
        }
    }
    Buffer::new(data, output_shape)
}

/// Sum reduction. With `keep_dims` the reduced axes stay in the shape with size 1.
pub fn sum_op(a: &Tensor, axis: Option<usize>, keep_dims: bool) -> Result<Tensor, MesogradError> {
    let value = sum_kernel(&a.value(), axis, keep_dims)?;
    Ok(Tensor::from_op(
        value,
        TensorOp::Sum { axis, keep_dims },
        vec![a.clone()],
    ))
}

/// Broadcasts the output gradient back over the reduced axis.
pub(crate) fn sum_backward(
    grad: &Buffer,
    a: &Buffer,
    axis: Option<usize>,
    _keep_dims: bool,
) -> Result<Buffer, MesogradError> {
    let kept = grad.reshaped(&kept_shape(a.shape(), axis)?)?;
    expand_to_shape(&kept, a.shape())
}

#[cfg(test)]
#[path = "sum_test.rs"]
mod tests;
