//! Shape bookkeeping shared by the reduction operations.

use crate::error::MesogradError;

/// Output shape of reducing `shape` over `axis` (all axes when `None`).
pub(crate) fn reduced_shape(
    shape: &[usize],
    axis: Option<usize>,
    keep_dims: bool,
) -> Result<Vec<usize>, MesogradError> {
    match axis {
        None if keep_dims => Ok(vec![1; shape.len()]),
        None => Ok(Vec::new()),
        Some(ax) => {
            check_axis(shape, ax)?;
            let mut out = shape.to_vec();
            if keep_dims {
                out[ax] = 1;
            } else {
                out.remove(ax);
            }
            Ok(out)
        }
    }
}

/// Shape of the reduction output with the reduced axes kept as size 1.
///
/// Backward passes reshape the output gradient to this before expanding it over the input.
pub(crate) fn kept_shape(shape: &[usize], axis: Option<usize>) -> Result<Vec<usize>, MesogradError> {
    reduced_shape(shape, axis, true)
}

/// Number of input elements folded into each output element.
pub(crate) fn reduced_count(shape: &[usize], axis: Option<usize>) -> Result<usize, MesogradError> {
    match axis {
        None => Ok(shape.iter().product()),
        Some(ax) => {
            check_axis(shape, ax)?;
            Ok(shape[ax])
        }
    }
}

fn check_axis(shape: &[usize], axis: usize) -> Result<(), MesogradError> {
    if axis >= shape.len() {
        return Err(MesogradError::AxisOutOfBounds {
            axis,
            rank: shape.len(),
        });
    }
    Ok(())
}
