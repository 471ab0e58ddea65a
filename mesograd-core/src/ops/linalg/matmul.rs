// src/ops/linalg/matmul.rs

use crate::buffer::Buffer;
use crate::error::MesogradError;
use crate::tensor::{Tensor, TensorOp};

/// Extents of a contraction: `a` viewed as `(m, k)`, `b` as `(k, n)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ContractDims {
    m: usize,
    k: usize,
    n: usize,
}

/// Validates that the last `axes` dims of `a` match the first `axes` dims of `b`.
fn contract_dims(
    a_shape: &[usize],
    b_shape: &[usize],
    axes: usize,
) -> Result<ContractDims, MesogradError> {
    if axes > a_shape.len() || axes > b_shape.len() {
        return Err(MesogradError::UnsupportedOperation(format!(
            "cannot contract {} axes of tensors with shapes {:?} and {:?}",
            axes, a_shape, b_shape
        )));
    }
    let split = a_shape.len() - axes;
    let a_inner = &a_shape[split..];
    let b_inner = &b_shape[..axes];
    if a_inner != b_inner {
        return Err(MesogradError::ShapeMismatch {
            expected: a_inner.to_vec(),
            actual: b_inner.to_vec(),
            operation: "contract".to_string(),
        });
    }
    Ok(ContractDims {
        m: a_shape[..split].iter().product(),
        k: a_inner.iter().product(),
        n: b_shape[axes..].iter().product(),
    })
}

/// Plain row-major `(m, k) x (k, n)` product.
pub(crate) fn matmul_kernel(a: &[f64], b: &[f64], m: usize, k: usize, n: usize) -> Vec<f64> {
    let mut out = vec![0.0; m * n];
    for i in 0..m {
        for p in 0..k {
            let a_ip = a[i * k + p];
            let row = &b[p * n..(p + 1) * n];
            for (o, &b_pj) in out[i * n..(i + 1) * n].iter_mut().zip(row) {
                *o += a_ip * b_pj;
            }
        }
    }
    out
}

/// Tensordot: sums over the last `axes` dims of `a` and the first `axes` dims of `b`.
///
/// The output shape is `a.shape[..rank_a - axes] ++ b.shape[axes..]`.
pub fn contract_op(a: &Tensor, b: &Tensor, axes: usize) -> Result<Tensor, MesogradError> {
    let a_val = a.value();
    let b_val = b.value();
    let dims = contract_dims(a_val.shape(), b_val.shape(), axes)?;

    let split = a_val.rank() - axes;
    let mut output_shape = a_val.shape()[..split].to_vec();
    output_shape.extend_from_slice(&b_val.shape()[axes..]);

    let data = matmul_kernel(a_val.data(), b_val.data(), dims.m, dims.k, dims.n);
    let value = Buffer::new(data, output_shape)?;
    Ok(Tensor::from_op(
        value,
        TensorOp::Contract { axes },
        vec![a.clone(), b.clone()],
    ))
}

/// Matrix product of rank-1 or rank-2 operands.
///
/// `[m, k] x [k, n] -> [m, n]`, `[k] x [k, n] -> [n]`, `[m, k] x [k] -> [m]` and the dot
/// product `[k] x [k] -> []`.
pub fn matmul_op(a: &Tensor, b: &Tensor) -> Result<Tensor, MesogradError> {
    let (rank_a, rank_b) = (a.rank(), b.rank());
    if !(1..=2).contains(&rank_a) || !(1..=2).contains(&rank_b) {
        return Err(MesogradError::UnsupportedOperation(format!(
            "matmul expects rank 1 or 2 operands, got ranks {} and {}",
            rank_a, rank_b
        )));
    }
    let (a_shape, b_shape) = (a.shape(), b.shape());
    if a_shape[rank_a - 1] != b_shape[0] {
        return Err(MesogradError::ShapeMismatch {
            expected: vec![a_shape[rank_a - 1]],
            actual: vec![b_shape[0]],
            operation: "matmul".to_string(),
        });
    }
    contract_op(a, b, 1)
}

/// `grad_a = grad . b^T` and `grad_b = a^T . grad`, with `grad` viewed as `(m, n)`.
pub(crate) fn contract_backward(
    grad: &Buffer,
    a: &Buffer,
    b: &Buffer,
    axes: usize,
) -> Result<Vec<Buffer>, MesogradError> {
    let ContractDims { m, k, n } = contract_dims(a.shape(), b.shape(), axes)?;
    if grad.numel() != m * n {
        return Err(MesogradError::ShapeMismatch {
            expected: vec![m, n],
            actual: grad.shape().to_vec(),
            operation: "contract backward".to_string(),
        });
    }
    let (g, a_data, b_data) = (grad.data(), a.data(), b.data());

    let mut grad_a = vec![0.0; m * k];
    for i in 0..m {
        for p in 0..k {
            grad_a[i * k + p] = (0..n).map(|j| g[i * n + j] * b_data[p * n + j]).sum();
        }
    }

    let mut grad_b = vec![0.0; k * n];
    for i in 0..m {
        for p in 0..k {
            let a_ip = a_data[i * k + p];
            for j in 0..n {
                grad_b[p * n + j] += a_ip * g[i * n + j];
            }
        }
    }

    Ok(vec![
        Buffer::new(grad_a, a.shape().to_vec())?,
        Buffer::new(grad_b, b.shape().to_vec())?,
    ])
}

#[cfg(test)]
#[path = "matmul_test.rs"]
mod tests;
