use super::*;
use crate::autograd::grad_check::check_grad;
use crate::utils::testing::{check_buffer_near, check_tensor_near};

#[test]
fn test_matmul_2d() {
    let a = Tensor::new(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], vec![2, 3]).unwrap();
    let b = Tensor::new(vec![7.0, 8.0, 9.0, 10.0, 11.0, 12.0], vec![3, 2]).unwrap();
    let c = matmul_op(&a, &b).unwrap();
    check_tensor_near(&c, &[2, 2], &[58.0, 64.0, 139.0, 154.0], 1e-12);
}

#[test]
fn test_matmul_vector_cases() {
    let m = Tensor::new(vec![1.0, 2.0, 3.0, 4.0], vec![2, 2]).unwrap();
    let v = Tensor::new(vec![1.0, -1.0], vec![2]).unwrap();

    check_tensor_near(&matmul_op(&m, &v).unwrap(), &[2], &[-1.0, -1.0], 1e-12);
    check_tensor_near(&matmul_op(&v, &m).unwrap(), &[2], &[-2.0, -2.0], 1e-12);
    check_tensor_near(&matmul_op(&v, &v).unwrap(), &[], &[2.0], 1e-12);
}

#[test]
fn test_matmul_errors() {
    let a = Tensor::new(vec![1.0; 6], vec![2, 3]).unwrap();
    let b = Tensor::new(vec![1.0; 4], vec![2, 2]).unwrap();
    assert!(matches!(
        matmul_op(&a, &b),
        Err(MesogradError::ShapeMismatch { .. })
    ));

    let cube = Tensor::new(vec![1.0; 8], vec![2, 2, 2]).unwrap();
    assert!(matches!(
        matmul_op(&cube, &b),
        Err(MesogradError::UnsupportedOperation(_))
    ));
    assert!(matches!(
        matmul_op(&Tensor::scalar(1.0), &b),
        Err(MesogradError::UnsupportedOperation(_))
    ));
}

#[test]
fn test_matmul_backward_values() {
    let a = Tensor::new(vec![1.0, 2.0, 3.0, 4.0], vec![2, 2]).unwrap();
    let b = Tensor::new(vec![5.0, 6.0, 7.0, 8.0], vec![2, 2]).unwrap();
    let c = matmul_op(&a, &b).unwrap();
    c.backward_with_grad(&Buffer::ones(&[2, 2])).unwrap();
    // grad_a = ones . b^T, grad_b = a^T . ones
    check_buffer_near(&a.grad(), &[2, 2], &[11.0, 15.0, 11.0, 15.0], 1e-12);
    check_buffer_near(&b.grad(), &[2, 2], &[4.0, 4.0, 6.0, 6.0], 1e-12);
}

#[test]
fn test_matmul_grad_check() {
    let a = Tensor::new(vec![0.5, -1.0, 2.0, 0.3, 1.5, -0.7], vec![2, 3]).unwrap();
    let b = Tensor::new(vec![1.0, 0.2, -0.4, 2.0, 0.9, -1.1], vec![3, 2]).unwrap();
    let output_grad = Buffer::new(vec![1.0, -0.5, 0.25, 2.0], vec![2, 2]).unwrap();
    check_grad(|inputs| matmul_op(&inputs[0], &inputs[1]), &[a, b], &output_grad, 1e-4, 1e-3)
        .unwrap();
}

#[test]
fn test_contract_two_axes() {
    // Full contraction of two [2, 2] tensors is the Frobenius inner product.
    let a = Tensor::new(vec![1.0, 2.0, 3.0, 4.0], vec![2, 2]).unwrap();
    let b = Tensor::new(vec![5.0, 6.0, 7.0, 8.0], vec![2, 2]).unwrap();
    let c = contract_op(&a, &b, 2).unwrap();
    check_tensor_near(&c, &[], &[70.0], 1e-12);
    assert_eq!(c.op(), TensorOp::Contract { axes: 2 });

    c.backward().unwrap();
    check_buffer_near(&a.grad(), &[2, 2], &[5.0, 6.0, 7.0, 8.0], 1e-12);
    check_buffer_near(&b.grad(), &[2, 2], &[1.0, 2.0, 3.0, 4.0], 1e-12);
}

#[test]
fn test_contract_rank3_grad_check() {
    let a = Tensor::new((0..12).map(|i| i as f64 * 0.1 - 0.5).collect(), vec![2, 3, 2]).unwrap();
    let b = Tensor::new((0..12).map(|i| 0.3 - i as f64 * 0.05).collect(), vec![3, 2, 2]).unwrap();
    let output_grad = Buffer::new(vec![1.0, -1.0, 0.5, 2.0], vec![2, 2]).unwrap();
    check_grad(|inputs| contract_op(&inputs[0], &inputs[1], 2), &[a, b], &output_grad, 1e-4, 1e-3)
        .unwrap();
}

#[test]
fn test_contract_mismatched_axes() {
    let a = Tensor::new(vec![1.0; 6], vec![2, 3]).unwrap();
    let b = Tensor::new(vec![1.0; 6], vec![2, 3]).unwrap();
    assert!(matches!(
        contract_op(&a, &b, 1),
        Err(MesogradError::ShapeMismatch { .. })
    ));
    assert!(matches!(
        contract_op(&a, &b, 3),
        Err(MesogradError::UnsupportedOperation(_))
    ));
}
