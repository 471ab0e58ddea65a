use super::*;
use crate::autograd::grad_check::check_grad;
use crate::utils::testing::{check_buffer_near, check_tensor_near};

#[test]
fn test_mean_all_and_axis() {
    let a = Tensor::new(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], vec![2, 3]).unwrap();
    check_tensor_near(&mean_op(&a, None, false).unwrap(), &[], &[3.5], 1e-12);
    check_tensor_near(&mean_op(&a, Some(0), false).unwrap(), &[3], &[2.5, 3.5, 4.5], 1e-12);
    check_tensor_near(&mean_op(&a, Some(1), true).unwrap(), &[2, 1], &[2.0, 5.0], 1e-12);
}

#[test]
fn test_mean_backward_divides() {
    let a = Tensor::new(vec![1.0, 2.0, 3.0, 4.0], vec![4]).unwrap();
    mean_op(&a, None, false).unwrap().backward().unwrap();
    check_buffer_near(&a.grad(), &[4], &[0.25; 4], 1e-12);
}

#[test]
fn test_mean_of_empty_is_domain_error() {
    let empty = Tensor::new(vec![], vec![0]).unwrap();
    assert!(matches!(
        mean_op(&empty, None, false),
        Err(MesogradError::NumericDomain { .. })
    ));
}

#[test]
fn test_mean_grad_check() {
    let a = Tensor::new(vec![0.5, -1.0, 2.0, 0.3, 1.5, -0.7], vec![3, 2]).unwrap();
    let output_grad = Buffer::new(vec![1.0, -2.0, 0.5], vec![3]).unwrap();
    check_grad(|inputs| mean_op(&inputs[0], Some(1), false), &[a], &output_grad, 1e-4, 1e-3)
        .unwrap();
}
