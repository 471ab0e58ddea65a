use crate::activation::Activation;
use crate::error::MesogradError;
use crate::ops;
use crate::tensor::Tensor;

/// Element-wise arithmetic and math. Each method delegates to the matching `*_op` function in
/// [`crate::ops`], which builds the output node.
impl Tensor {
    /// Element-wise addition with NumPy broadcasting.
    pub fn add(&self, other: &Tensor) -> Result<Tensor, MesogradError> {
        ops::arithmetic::add_op(self, other)
    }

    pub fn sub(&self, other: &Tensor) -> Result<Tensor, MesogradError> {
        ops::arithmetic::sub_op(self, other)
    }

    pub fn mul(&self, other: &Tensor) -> Result<Tensor, MesogradError> {
        ops::arithmetic::mul_op(self, other)
    }

    /// Element-wise division. Fails on a zero divisor.
    pub fn div(&self, other: &Tensor) -> Result<Tensor, MesogradError> {
        ops::arithmetic::div_op(self, other)
    }

    pub fn neg(&self) -> Result<Tensor, MesogradError> {
        ops::arithmetic::neg_op(self)
    }

    pub fn pow(&self, exponent: f64) -> Result<Tensor, MesogradError> {
        ops::arithmetic::pow_op(self, exponent)
    }

    /// Multiplies by a literal.
    pub fn scale(&self, factor: f64) -> Result<Tensor, MesogradError> {
        ops::arithmetic::scale_op(self, factor)
    }

    /// Adds a literal.
    pub fn shift(&self, offset: f64) -> Result<Tensor, MesogradError> {
        ops::arithmetic::shift_op(self, offset)
    }

    pub fn exp(&self) -> Result<Tensor, MesogradError> {
        ops::math_elem::exp_op(self)
    }

    pub fn ln(&self) -> Result<Tensor, MesogradError> {
        ops::math_elem::ln_op(self)
    }

    pub fn sqrt(&self) -> Result<Tensor, MesogradError> {
        ops::math_elem::sqrt_op(self)
    }

    pub fn activate(&self, activation: &Activation) -> Result<Tensor, MesogradError> {
        ops::activation::activation_op(self, activation)
    }

    pub fn relu(&self) -> Result<Tensor, MesogradError> {
        ops::activation::relu_op(self)
    }

    pub fn tanh(&self) -> Result<Tensor, MesogradError> {
        ops::activation::tanh_op(self)
    }

    pub fn sigmoid(&self) -> Result<Tensor, MesogradError> {
        ops::activation::sigmoid_op(self)
    }

    /// Matrix product of rank-1 or rank-2 tensors.
    pub fn matmul(&self, other: &Tensor) -> Result<Tensor, MesogradError> {
        ops::linalg::matmul_op(self, other)
    }

    /// Tensordot over the last `axes` dims of `self` and the first `axes` dims of `other`.
    pub fn contract(&self, other: &Tensor, axes: usize) -> Result<Tensor, MesogradError> {
        ops::linalg::contract_op(self, other, axes)
    }
}
