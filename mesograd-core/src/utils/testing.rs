//! Assertion helpers shared by the unit tests.

use crate::buffer::Buffer;
use crate::tensor::Tensor;

/// Asserts that `actual` has `expected_shape` and elements within `tolerance` of
/// `expected_data`.
pub fn check_buffer_near(
    actual: &Buffer,
    expected_shape: &[usize],
    expected_data: &[f64],
    tolerance: f64,
) {
    assert_eq!(actual.shape(), expected_shape, "Shape mismatch");
    assert_eq!(
        actual.data().len(),
        expected_data.len(),
        "Data length mismatch"
    );
    for (i, (a, e)) in actual.data().iter().zip(expected_data.iter()).enumerate() {
        let diff = (a - e).abs();
        if diff > tolerance || diff.is_nan() {
            panic!(
                "Data mismatch at index {}: actual={:?}, expected={:?}, diff={:?}, tolerance={:?}",
                i, a, e, diff, tolerance
            );
        }
    }
}

/// Same as [`check_buffer_near`] on the forward value of `actual`.
pub fn check_tensor_near(
    actual: &Tensor,
    expected_shape: &[usize],
    expected_data: &[f64],
    tolerance: f64,
) {
    check_buffer_near(&actual.value(), expected_shape, expected_data, tolerance);
}
