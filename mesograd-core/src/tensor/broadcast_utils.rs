use crate::buffer::Buffer;
use crate::error::MesogradError;
use crate::tensor::utils::{
    broadcast_shapes, calculate_strides, coord_to_index_broadcasted, index_to_coord,
};

/// Applies `f` element-wise to two buffers broadcast against each other.
///
/// The output has the broadcast shape of the operands. `f` may fail (domain checks), in which
/// case the first failure is returned.
pub(crate) fn broadcast_binary<F>(a: &Buffer, b: &Buffer, f: F) -> Result<Buffer, MesogradError>
where
    F: Fn(f64, f64) -> Result<f64, MesogradError>,
{
    if a.shape() == b.shape() {
        let data = a
            .data()
            .iter()
            .zip(b.data().iter())
            .map(|(&x, &y)| f(x, y))
            .collect::<Result<Vec<_>, _>>()?;
        return Buffer::new(data, a.shape().to_vec());
    }

    let output_shape = broadcast_shapes(a.shape(), b.shape())?;
    let output_strides = calculate_strides(&output_shape);
    let a_strides = calculate_strides(a.shape());
    let b_strides = calculate_strides(b.shape());
    let numel: usize = output_shape.iter().product();

    let mut data = Vec::with_capacity(numel);
    for i in 0..numel {
        let coords = index_to_coord(i, &output_strides, &output_shape);
        let x = a.data()[coord_to_index_broadcasted(&coords, a.shape(), &a_strides)];
        let y = b.data()[coord_to_index_broadcasted(&coords, b.shape(), &b_strides)];
        data.push(f(x, y)?);
    }
    Buffer::new(data, output_shape)
}

/// Reduces a gradient to `target_shape` by summing along the axes that broadcasting expanded.
///
/// When broadcasting occurs during a forward pass (e.g. A[2,3] + B[3] -> C[2,3]), the gradient
/// flowing back to B must have B's shape, so dL/dC is summed over the leading axis. Axes of size
/// 1 in `target_shape` that were expanded are summed too and kept as size 1.
pub fn reduce_to_shape(grad: &Buffer, target_shape: &[usize]) -> Result<Buffer, MesogradError> {
    if grad.shape() == target_shape {
        return Ok(grad.clone());
    }

    let grad_shape = grad.shape();
    let mismatch = || MesogradError::ShapeMismatch {
        expected: target_shape.to_vec(),
        actual: grad_shape.to_vec(),
        operation: "reduce_to_shape".to_string(),
    };
    if grad_shape.len() < target_shape.len() {
        return Err(mismatch());
    }
    let rank_diff = grad_shape.len() - target_shape.len();
    for (i, &target_dim) in target_shape.iter().enumerate() {
        let grad_dim = grad_shape[rank_diff + i];
        if target_dim != grad_dim && target_dim != 1 {
            return Err(mismatch());
        }
    }

    let grad_strides = calculate_strides(grad_shape);
    let target_strides = calculate_strides(target_shape);
    let mut reduced = Buffer::zeros(target_shape);
    {
        let out = reduced.data_mut();
        for (i, &g) in grad.data().iter().enumerate() {
            let coords = index_to_coord(i, &grad_strides, grad_shape);
            out[coord_to_index_broadcasted(&coords, target_shape, &target_strides)] += g;
        }
    }
    Ok(reduced)
}

/// Repeats `source` along broadcast axes until it has `target_shape`.
///
/// This is the counterpart of [`reduce_to_shape`], used by reductions to send a gradient back to
/// every element that contributed to it.
pub fn expand_to_shape(source: &Buffer, target_shape: &[usize]) -> Result<Buffer, MesogradError> {
    if source.shape() == target_shape {
        return Ok(source.clone());
    }
    let broadcast = broadcast_shapes(source.shape(), target_shape)?;
    if broadcast != target_shape {
        return Err(MesogradError::BroadcastError {
            shape1: source.shape().to_vec(),
            shape2: target_shape.to_vec(),
        });
    }

    let target_strides = calculate_strides(target_shape);
    let source_strides = calculate_strides(source.shape());
    let numel: usize = target_shape.iter().product();
    let mut data = Vec::with_capacity(numel);
    for i in 0..numel {
        let coords = index_to_coord(i, &target_strides, target_shape);
        data.push(source.data()[coord_to_index_broadcasted(&coords, source.shape(), &source_strides)]);
    }
    Buffer::new(data, target_shape.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buf(data: Vec<f64>, shape: Vec<usize>) -> Buffer {
        Buffer::new(data, shape).unwrap()
    }

    #[test]
    fn test_broadcast_binary_row_vector() {
        let a = buf(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], vec![2, 3]);
        let b = buf(vec![10.0, 20.0, 30.0], vec![3]);
        let out = broadcast_binary(&a, &b, |x, y| Ok(x + y)).unwrap();
        assert_eq!(out.shape(), &[2, 3]);
        assert_eq!(out.data(), &[11.0, 22.0, 33.0, 14.0, 25.0, 36.0]);
    }

    #[test]
    fn test_broadcast_binary_column_and_row() {
        let a = buf(vec![1.0, 2.0], vec![2, 1]);
        let b = buf(vec![10.0, 20.0, 30.0], vec![1, 3]);
        let out = broadcast_binary(&a, &b, |x, y| Ok(x * y)).unwrap();
        assert_eq!(out.shape(), &[2, 3]);
        assert_eq!(out.data(), &[10.0, 20.0, 30.0, 20.0, 40.0, 60.0]);
    }

    #[test]
    fn test_broadcast_binary_incompatible() {
        let a = buf(vec![1.0, 2.0, 3.0], vec![3]);
        let b = buf(vec![1.0, 2.0], vec![2]);
        assert!(matches!(
            broadcast_binary(&a, &b, |x, y| Ok(x + y)),
            Err(MesogradError::BroadcastError { .. })
        ));
    }

    #[test]
    fn test_reduce_to_shape_leading_axis() {
        let g = buf(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], vec![2, 3]);
        let r = reduce_to_shape(&g, &[3]).unwrap();
        assert_eq!(r.shape(), &[3]);
        assert_eq!(r.data(), &[5.0, 7.0, 9.0]);
    }

    #[test]
    fn test_reduce_to_shape_keeps_size_one_axes() {
        let g = buf(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], vec![2, 3]);
        let r = reduce_to_shape(&g, &[2, 1]).unwrap();
        assert_eq!(r.shape(), &[2, 1]);
        assert_eq!(r.data(), &[6.0, 15.0]);

        let r = reduce_to_shape(&g, &[1, 3]).unwrap();
        assert_eq!(r.shape(), &[1, 3]);
        assert_eq!(r.data(), &[5.0, 7.0, 9.0]);
    }

    #[test]
    fn test_reduce_to_scalar() {
        let g = buf(vec![1.0, 2.0, 3.0, 4.0], vec![2, 2]);
        let r = reduce_to_shape(&g, &[]).unwrap();
        assert_eq!(r.shape(), &[] as &[usize]);
        assert_eq!(r.data(), &[10.0]);
    }

    #[test]
    fn test_reduce_to_incompatible_shape() {
        let g = buf(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], vec![2, 3]);
        assert!(reduce_to_shape(&g, &[2]).is_err());
        assert!(reduce_to_shape(&g, &[1, 2, 3, 4]).is_err());
    }

    #[test]
    fn test_expand_to_shape() {
        let s = buf(vec![1.0, 2.0], vec![2, 1]);
        let e = expand_to_shape(&s, &[2, 3]).unwrap();
        assert_eq!(e.data(), &[1.0, 1.0, 1.0, 2.0, 2.0, 2.0]);

        let scalar = Buffer::scalar(3.0);
        let e = expand_to_shape(&scalar, &[2, 2]).unwrap();
        assert_eq!(e.data(), &[3.0; 4]);

        assert!(expand_to_shape(&buf(vec![1.0, 2.0], vec![2]), &[3]).is_err());
        assert!(expand_to_shape(&buf(vec![1.0; 6], vec![2, 3]), &[3]).is_err());
    }
}
