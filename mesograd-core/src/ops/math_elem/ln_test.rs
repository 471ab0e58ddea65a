use super::*;
use crate::autograd::grad_check::check_grad;
use crate::config::{scoped, EngineConfig};
use crate::utils::testing::{check_buffer_near, check_tensor_near};

#[test]
fn test_ln_forward_backward() {
    let a = Tensor::new(vec![1.0, std::f64::consts::E, 4.0], vec![3]).unwrap();
    let out = ln_op(&a).unwrap();
    check_tensor_near(&out, &[3], &[0.0, 1.0, 4.0f64.ln()], 1e-12);

    out.backward_with_grad(&Buffer::ones(&[3])).unwrap();
    check_buffer_near(&a.grad(), &[3], &[1.0, 1.0 / std::f64::consts::E, 0.25], 1e-12);
}

#[test]
fn test_ln_rejects_non_positive() {
    for bad in [0.0, -1.0] {
        let a = Tensor::new(vec![1.0, bad], vec![2]).unwrap();
        assert_eq!(
            ln_op(&a).unwrap_err(),
            MesogradError::NumericDomain {
                operation: "ln".to_string(),
                value: bad
            }
        );
    }
}

#[test]
fn test_ln_zero_allowed_by_config() {
    let _guard = scoped(EngineConfig::new().with_allow_non_finite(true));
    let a = Tensor::new(vec![0.0], vec![1]).unwrap();
    let out = ln_op(&a).unwrap();
    assert_eq!(out.data()[0], f64::NEG_INFINITY);
}

#[test]
fn test_ln_grad_check() {
    let a = Tensor::new(vec![0.5, 1.0, 2.0, 10.0], vec![4]).unwrap();
    let output_grad = Buffer::new(vec![1.0, -1.0, 0.5, 3.0], vec![4]).unwrap();
    check_grad(|inputs| ln_op(&inputs[0]), &[a], &output_grad, 1e-4, 1e-3).unwrap();
}
