// src/ops/linalg/transpose.rs

use crate::buffer::Buffer;
use crate::error::MesogradError;
use crate::tensor::{Tensor, TensorOp};

/// Swaps the two axes of a rank-2 buffer, copying into row-major order.
pub(crate) fn transpose_kernel(a: &Buffer) -> Result<Buffer, MesogradError> {
    if a.rank() != 2 {
        return Err(MesogradError::UnsupportedOperation(format!(
            "transpose expects a rank-2 tensor, got shape {:?}",
            a.shape()
        )));
    }
    let (rows, cols) = (a.shape()[0], a.shape()[1]);
    let src = a.data();
    let mut data = Vec::with_capacity(rows * cols);
    for j in 0..cols {
        for i in 0..rows {
            data.push(src[i * cols + j]);
        }
    }
    Buffer::new(data, vec![cols, rows])
}

/// 2-D transpose. Its gradient is the transpose of the output gradient.
pub fn transpose_op(a: &Tensor) -> Result<Tensor, MesogradError> {
    let value = transpose_kernel(&a.value())?;
    Ok(Tensor::from_op(value, TensorOp::Transpose, vec![a.clone()]))
}
