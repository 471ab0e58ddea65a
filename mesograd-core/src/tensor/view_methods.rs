use crate::error::MesogradError;
use crate::ops;
use crate::tensor::Tensor;

/// Shape manipulation. Both methods copy into a new node; gradients flow back through the
/// inverse shape change.
impl Tensor {
    /// Same elements under `new_shape`, which must hold the same number of elements.
    pub fn reshape(&self, new_shape: &[usize]) -> Result<Tensor, MesogradError> {
        ops::view::reshape_op(self, new_shape)
    }

    /// Transpose of a rank-2 tensor.
    pub fn transpose(&self) -> Result<Tensor, MesogradError> {
        ops::linalg::transpose_op(self)
    }
}
