// src/ops/math_elem/sqrt.rs

use crate::buffer::Buffer;
use crate::error::MesogradError;
use crate::numeric::check_domain;
use crate::ops::apply_unary_op;
use crate::tensor::{Tensor, TensorOp};

/// Element-wise square root. Negative inputs fail with `NumericDomain`.
pub fn sqrt_op(a: &Tensor) -> Result<Tensor, MesogradError> {
    apply_unary_op(a, TensorOp::Sqrt, |x| {
        check_domain("sqrt", x, |x| x >= 0.0)?;
        Ok(x.sqrt())
    })
}

/// `grad / (2 * sqrt(x))`. Infinite at `x = 0`, which the backward engine reports.
pub(crate) fn sqrt_backward(grad: &Buffer, output: &Buffer) -> Result<Buffer, MesogradError> {
    grad.zip_map(output, "sqrt backward", |g, y| g / (2.0 * y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::autograd::grad_check::check_grad;
    use crate::utils::testing::{check_buffer_near, check_tensor_near};

    #[test]
    fn test_sqrt_forward_backward() {
        let a = Tensor::new(vec![4.0, 9.0], vec![2]).unwrap();
        let out = sqrt_op(&a).unwrap();
        check_tensor_near(&out, &[2], &[2.0, 3.0], 1e-12);
        out.backward_with_grad(&Buffer::ones(&[2])).unwrap();
        check_buffer_near(&a.grad(), &[2], &[0.25, 1.0 / 6.0], 1e-12);
    }

    #[test]
    fn test_sqrt_negative_is_domain_error() {
        let a = Tensor::new(vec![-1.0], vec![1]).unwrap();
        assert!(matches!(
            sqrt_op(&a),
            Err(MesogradError::NumericDomain { .. })
        ));
    }

    #[test]
    fn test_sqrt_backward_at_zero_fails() {
        let a = Tensor::new(vec![0.0], vec![1]).unwrap();
        let out = sqrt_op(&a).unwrap();
        assert_eq!(out.data(), vec![0.0]);
        assert!(matches!(
            out.backward(),
            Err(MesogradError::NumericDomain { .. })
        ));
    }

    #[test]
    fn test_sqrt_grad_check() {
        let a = Tensor::new(vec![0.5, 1.0, 2.0, 10.0], vec![2, 2]).unwrap();
        let output_grad = Buffer::new(vec![1.0, -1.0, 0.5, 3.0], vec![2, 2]).unwrap();
        check_grad(|inputs| sqrt_op(&inputs[0]), &[a], &output_grad, 1e-4, 1e-3).unwrap();
    }
}
