//! Finite-difference verification of analytic gradients.

use crate::buffer::Buffer;
use crate::error::MesogradError;
use crate::scalar::Scalar;
use crate::tensor::Tensor;
use thiserror::Error;

/// Default central-difference step.
pub const DEFAULT_EPSILON: f64 = 1e-4;
/// Default tolerance, applied to both the absolute and the relative difference.
pub const DEFAULT_TOLERANCE: f64 = 1e-3;

/// Error type specifically for gradient checking failures.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GradCheckError {
    #[error("Gradient check failed for input {input_index}, element {element_index}: analytical {analytical} != numerical {numerical}")]
    GradientMismatch {
        input_index: usize,
        element_index: usize,
        analytical: f64,
        numerical: f64,
    },
    #[error("Forward function execution failed during gradient check: {0}")]
    ForwardPassError(MesogradError),
    #[error("Backward pass execution failed during gradient check: {0}")]
    BackwardPassError(MesogradError),
    #[error("Numerical gradient is NaN or infinite for input {input_index}, element {element_index} (loss+ {loss_plus}, loss- {loss_minus})")]
    NumericalGradNonFinite {
        input_index: usize,
        element_index: usize,
        loss_plus: f64,
        loss_minus: f64,
    },
    #[error("Gradient check input {input_index} must be a leaf node")]
    InputNotLeaf { input_index: usize },
    #[error("Function did not propagate requires_grad correctly")]
    RequiresGradPropagationError,
    #[error("Tensor error during gradient check: {0}")]
    TensorError(MesogradError),
}

impl From<MesogradError> for GradCheckError {
    fn from(err: MesogradError) -> Self {
        GradCheckError::TensorError(err)
    }
}

fn compare(
    input_index: usize,
    element_index: usize,
    analytical: f64,
    loss_plus: f64,
    loss_minus: f64,
    epsilon: f64,
    tolerance: f64,
) -> Result<(), GradCheckError> {
    let numerical = (loss_plus - loss_minus) / (2.0 * epsilon);
    if !numerical.is_finite() {
        return Err(GradCheckError::NumericalGradNonFinite {
            input_index,
            element_index,
            loss_plus,
            loss_minus,
        });
    }
    let difference = (analytical - numerical).abs();
    if !analytical.is_finite()
        || (difference > tolerance && difference / (analytical.abs() + epsilon) > tolerance)
    {
        return Err(GradCheckError::GradientMismatch {
            input_index,
            element_index,
            analytical,
            numerical,
        });
    }
    Ok(())
}

/// Checks the gradients of a scalar function at the point `inputs`.
///
/// `func` receives fresh leaves holding `inputs` and must return the output node. Every input is
/// perturbed by `±epsilon` in turn and the central difference is compared with the gradient
/// computed by `backward`.
pub fn check_grad_scalar<F>(
    func: F,
    inputs: &[f64],
    epsilon: f64,
    tolerance: f64,
) -> Result<(), GradCheckError>
where
    F: Fn(&[Scalar]) -> Result<Scalar, MesogradError>,
{
    let evaluate = |point: &[f64]| -> Result<Scalar, GradCheckError> {
        let leaves: Vec<Scalar> = point.iter().map(|&v| Scalar::new(v)).collect();
        func(&leaves).map_err(GradCheckError::ForwardPassError)
    };

    let leaves: Vec<Scalar> = inputs.iter().map(|&v| Scalar::new(v)).collect();
    let output = func(&leaves).map_err(GradCheckError::ForwardPassError)?;
    if !inputs.is_empty() && !output.requires_grad() {
        return Err(GradCheckError::RequiresGradPropagationError);
    }
    output.backward().map_err(GradCheckError::BackwardPassError)?;

    for (i, leaf) in leaves.iter().enumerate() {
        let mut plus = inputs.to_vec();
        plus[i] += epsilon;
        let mut minus = inputs.to_vec();
        minus[i] -= epsilon;
        let loss_plus = evaluate(&plus)?.value();
        let loss_minus = evaluate(&minus)?.value();
        compare(i, 0, leaf.grad(), loss_plus, loss_minus, epsilon, tolerance)?;
    }
    Ok(())
}

/// Checks analytical gradients against numerical gradients using finite differences.
///
/// The scalar loss is `sum(func(inputs) * output_grad)`, so the analytic gradient is obtained by
/// seeding the backward pass with `output_grad`. Inputs that do not require grad are held
/// fixed.
pub fn check_grad<F>(
    func: F,
    inputs: &[Tensor],
    output_grad: &Buffer,
    epsilon: f64,
    tolerance: f64,
) -> Result<(), GradCheckError>
where
    F: Fn(&[Tensor]) -> Result<Tensor, MesogradError>,
{
    for (i, input) in inputs.iter().enumerate() {
        if !input.is_leaf() {
            return Err(GradCheckError::InputNotLeaf { input_index: i });
        }
    }

    let output = func(inputs).map_err(GradCheckError::ForwardPassError)?;
    if inputs.iter().any(Tensor::requires_grad) && !output.requires_grad() {
        return Err(GradCheckError::RequiresGradPropagationError);
    }
    output
        .backward_with_grad(output_grad)
        .map_err(GradCheckError::BackwardPassError)?;

    for (i, input) in inputs.iter().enumerate() {
        if !input.requires_grad() {
            continue;
        }
        let analytical = input.grad_data();
        let original = input.value();

        for elem_idx in 0..original.numel() {
            let loss_at = |delta: f64| -> Result<f64, GradCheckError> {
                let mut data = original.data().to_vec();
                data[elem_idx] += delta;
                let perturbed = Buffer::new(data, original.shape().to_vec())?;
                let mut perturbed_inputs = inputs.to_vec();
                perturbed_inputs[i] = Tensor::from_buffer(perturbed, true);
                let out = func(&perturbed_inputs).map_err(GradCheckError::ForwardPassError)?;
                weighted_sum(&out.value(), output_grad)
            };
            let loss_plus = loss_at(epsilon)?;
            let loss_minus = loss_at(-epsilon)?;
            compare(
                i,
                elem_idx,
                analytical[elem_idx],
                loss_plus,
                loss_minus,
                epsilon,
                tolerance,
            )?;
        }
    }
    Ok(())
}

/// `sum(output * weights)`, the loss whose gradient w.r.t. `output` is `weights`.
fn weighted_sum(output: &Buffer, weights: &Buffer) -> Result<f64, GradCheckError> {
    Ok(output
        .zip_map(weights, "grad_check loss", |o, w| o * w)?
        .sum())
}
