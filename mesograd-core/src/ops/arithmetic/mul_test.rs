use super::*;
use crate::autograd::grad_check::check_grad;
use crate::utils::testing::{check_buffer_near, check_tensor_near};

#[test]
fn test_mul_tensors_ok() {
    let a = Tensor::new(vec![1.0, 2.0, 3.0, 4.0], vec![2, 2]).unwrap();
    let b = Tensor::new(vec![5.0, 6.0, 7.0, 8.0], vec![2, 2]).unwrap();
    let result = mul_op(&a, &b).unwrap();
    check_tensor_near(&result, &[2, 2], &[5.0, 12.0, 21.0, 32.0], 1e-12);
}

#[test]
fn test_mul_broadcast_column() {
    let a = Tensor::new(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], vec![2, 3]).unwrap();
    let b = Tensor::new(vec![10.0, 100.0], vec![2, 1]).unwrap();
    let result = mul_op(&a, &b).unwrap();
    check_tensor_near(
        &result,
        &[2, 3],
        &[10.0, 20.0, 30.0, 400.0, 500.0, 600.0],
        1e-12,
    );

    result.backward_with_grad(&Buffer::ones(&[2, 3])).unwrap();
    check_buffer_near(&a.grad(), &[2, 3], &[10.0, 10.0, 10.0, 100.0, 100.0, 100.0], 1e-12);
    check_buffer_near(&b.grad(), &[2, 1], &[6.0, 15.0], 1e-12);
}

#[test]
fn test_mul_same_operand_accumulates() {
    let x = Tensor::new(vec![3.0, -2.0], vec![2]).unwrap();
    let y = mul_op(&x, &x).unwrap();
    y.backward_with_grad(&Buffer::ones(&[2])).unwrap();
    check_buffer_near(&x.grad(), &[2], &[6.0, -4.0], 1e-12);
}

#[test]
fn test_mul_backward_grad_check() {
    let a = Tensor::new(vec![0.5, -1.0, 2.0, 3.0, 1.5, -0.7], vec![2, 3]).unwrap();
    let b = Tensor::new(vec![4.0, -2.0, 0.3], vec![3]).unwrap();
    let output_grad = Buffer::new(vec![1.0, -1.0, 0.5, 2.0, 0.1, 3.0], vec![2, 3]).unwrap();
    check_grad(|inputs| mul_op(&inputs[0], &inputs[1]), &[a, b], &output_grad, 1e-4, 1e-3)
        .unwrap();
}
