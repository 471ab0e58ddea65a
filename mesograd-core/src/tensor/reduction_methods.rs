use crate::{error::MesogradError, ops, tensor::Tensor};

impl Tensor {
    /// Sum of all elements as a rank-0 tensor.
    pub fn sum(&self) -> Result<Tensor, MesogradError> {
        ops::reduction::sum_op(self, None, false)
    }

    /// Sum along `axis`. With `keep_dims` the axis stays with size 1.
    pub fn sum_axis(&self, axis: usize, keep_dims: bool) -> Result<Tensor, MesogradError> {
        ops::reduction::sum_op(self, Some(axis), keep_dims)
    }

    pub fn mean(&self) -> Result<Tensor, MesogradError> {
        ops::reduction::mean_op(self, None, false)
    }

    pub fn mean_axis(&self, axis: usize, keep_dims: bool) -> Result<Tensor, MesogradError> {
        ops::reduction::mean_op(self, Some(axis), keep_dims)
    }
}
