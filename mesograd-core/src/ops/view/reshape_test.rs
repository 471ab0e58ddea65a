use super::*;
use crate::buffer::Buffer;
use crate::utils::testing::{check_buffer_near, check_tensor_near};

#[test]
fn test_reshape_forward_backward() {
    let a = Tensor::new(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], vec![2, 3]).unwrap();
    let r = reshape_op(&a, &[3, 2]).unwrap();
    check_tensor_near(&r, &[3, 2], &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 1e-12);

    let seed = Buffer::new(vec![6.0, 5.0, 4.0, 3.0, 2.0, 1.0], vec![3, 2]).unwrap();
    r.backward_with_grad(&seed).unwrap();
    check_buffer_near(&a.grad(), &[2, 3], &[6.0, 5.0, 4.0, 3.0, 2.0, 1.0], 1e-12);
}

#[test]
fn test_reshape_to_scalar_and_back() {
    let a = Tensor::new(vec![7.0], vec![1, 1]).unwrap();
    let s = reshape_op(&a, &[]).unwrap();
    assert_eq!(s.rank(), 0);
    assert_eq!(s.item().unwrap(), 7.0);
}

#[test]
fn test_reshape_numel_mismatch() {
    let a = Tensor::new(vec![1.0; 6], vec![2, 3]).unwrap();
    assert!(matches!(
        reshape_op(&a, &[4, 2]),
        Err(MesogradError::ShapeMismatch { .. })
    ));
}
