// src/nn/losses/mse.rs

use crate::error::MesogradError;
use crate::numeric::check_domain;
use crate::scalar::Scalar;
use crate::tensor::Tensor;
use std::str::FromStr;

/// Specifies the reduction to apply to the squared errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Reduction {
    #[default]
    Mean,
    Sum,
}

impl FromStr for Reduction {
    type Err = MesogradError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mean" => Ok(Reduction::Mean),
            "sum" => Ok(Reduction::Sum),
            _ => Err(MesogradError::UnsupportedOperation(format!(
                "Unsupported reduction type: {}",
                s
            ))),
        }
    }
}

/// Computes the Mean Squared Error (MSE) loss between prediction and target tensors.
#[derive(Debug, Clone, Copy, Default)]
pub struct MseLoss {
    reduction: Reduction,
}

impl MseLoss {
    pub fn new(reduction: Reduction) -> Self {
        MseLoss { reduction }
    }

    pub fn reduction(&self) -> Reduction {
        self.reduction
    }

    /// Reduced squared error. `prediction` and `target` must have identical shapes; the loss
    /// is a rank-0 tensor.
    pub fn forward(&self, prediction: &Tensor, target: &Tensor) -> Result<Tensor, MesogradError> {
        if prediction.shape() != target.shape() {
            return Err(MesogradError::ShapeMismatch {
                expected: prediction.shape(),
                actual: target.shape(),
                operation: "mse_loss".to_string(),
            });
        }
        let squared = prediction.sub(target)?.pow(2.0)?;
        match self.reduction {
            Reduction::Mean => squared.mean(),
            Reduction::Sum => squared.sum(),
        }
    }
}

/// Mean squared error of two tensors of the same shape.
pub fn mse_loss(prediction: &Tensor, target: &Tensor) -> Result<Tensor, MesogradError> {
    MseLoss::default().forward(prediction, target)
}

/// Mean squared error over paired scalar nodes.
pub fn mse_loss_scalar(predictions: &[Scalar], targets: &[Scalar]) -> Result<Scalar, MesogradError> {
    if predictions.len() != targets.len() {
        return Err(MesogradError::ShapeMismatch {
            expected: vec![predictions.len()],
            actual: vec![targets.len()],
            operation: "mse_loss_scalar".to_string(),
        });
    }
    let count = predictions.len() as f64;
    check_domain("mean", count, |n| n > 0.0)?;
    let total = predictions
        .iter()
        .zip(targets)
        .try_fold(Scalar::constant(0.0), |acc, (p, t)| {
            let err = p - t;
            Ok::<_, MesogradError>(acc + err.pow(2.0)?)
        })?;
    Ok(total * (1.0 / count))
}

#[cfg(test)]
#[path = "mse_test.rs"]
mod tests;
