use super::*;
use crate::autograd::grad_check::check_grad;
use crate::utils::testing::{check_buffer_near, check_tensor_near};

#[test]
fn test_sub_tensors_ok() {
    let t1 = Tensor::new(vec![5.0, 7.0, 9.0], vec![3]).unwrap();
    let t2 = Tensor::new(vec![1.0, 2.0, 3.0], vec![3]).unwrap();
    let result = sub_op(&t1, &t2).unwrap();
    check_tensor_near(&result, &[3], &[4.0, 5.0, 6.0], 1e-12);
}

#[test]
fn test_sub_broadcast_scalar_backward() {
    let a = Tensor::new(vec![1.0, 2.0, 3.0, 4.0], vec![2, 2]).unwrap();
    let b = Tensor::scalar(10.0);
    let out = sub_op(&a, &b).unwrap();
    check_tensor_near(&out, &[2, 2], &[-9.0, -8.0, -7.0, -6.0], 1e-12);

    out.backward_with_grad(&Buffer::ones(&[2, 2])).unwrap();
    check_buffer_near(&a.grad(), &[2, 2], &[1.0; 4], 1e-12);
    check_buffer_near(&b.grad(), &[], &[-4.0], 1e-12);
}

#[test]
fn test_sub_backward_grad_check() {
    let a = Tensor::new(vec![0.5, -1.0, 2.0, 3.0, 1.5, 0.0], vec![2, 3]).unwrap();
    let b = Tensor::new(vec![4.0, -2.0], vec![2, 1]).unwrap();
    let output_grad = Buffer::new(vec![1.0, -1.0, 0.5, 2.0, 0.0, 3.0], vec![2, 3]).unwrap();
    check_grad(|inputs| sub_op(&inputs[0], &inputs[1]), &[a, b], &output_grad, 1e-4, 1e-3)
        .unwrap();
}
