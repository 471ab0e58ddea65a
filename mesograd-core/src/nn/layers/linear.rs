use crate::error::MesogradError;
use crate::nn::init::kaiming_uniform_;
use crate::nn::{Module, Parameter};
use crate::tensor::{zeros, Tensor};
use rand::Rng;
use std::fmt;

/// Applies an affine map to the incoming data: `y = x . W + b`.
///
/// `W` has shape `[in_features, out_features]` and `b` shape `[out_features]`; the bias is
/// broadcast over the batch. Inputs may be a single sample `[in_features]` or a batch
/// `[batch, in_features]`.
#[derive(Debug, Clone)]
pub struct Linear {
    weight: Tensor,
    bias: Tensor,
    in_features: usize,
    out_features: usize,
}

impl Linear {
    pub fn new(in_features: usize, out_features: usize) -> Result<Self, MesogradError> {
        Self::with_rng(in_features, out_features, &mut rand::thread_rng())
    }

    pub fn with_rng<R: Rng + ?Sized>(
        in_features: usize,
        out_features: usize,
        rng: &mut R,
    ) -> Result<Self, MesogradError> {
        let weight = zeros(&[in_features, out_features]);
        kaiming_uniform_(&weight, rng)?;
        Ok(Linear {
            weight,
            bias: zeros(&[out_features]),
            in_features,
            out_features,
        })
    }

    /// Layer with the given weight `[in, out]` and bias `[out]`, both made trainable leaves.
    pub fn from_tensors(weight: Tensor, bias: Tensor) -> Result<Self, MesogradError> {
        let w_shape = weight.shape();
        if w_shape.len() != 2 || bias.shape() != [w_shape[1]] {
            return Err(MesogradError::ShapeMismatch {
                expected: w_shape.get(1).map(|&out| vec![out]).unwrap_or_default(),
                actual: bias.shape(),
                operation: "Linear::from_tensors".to_string(),
            });
        }
        weight.set_requires_grad(true)?;
        bias.set_requires_grad(true)?;
        Ok(Linear {
            weight,
            bias,
            in_features: w_shape[0],
            out_features: w_shape[1],
        })
    }

    pub fn weight(&self) -> &Tensor {
        &self.weight
    }

    pub fn bias(&self) -> &Tensor {
        &self.bias
    }

    pub fn in_features(&self) -> usize {
        self.in_features
    }

    pub fn out_features(&self) -> usize {
        self.out_features
    }
}

impl Module for Linear {
    type Input = Tensor;
    type Output = Tensor;

    fn forward(&self, input: &Tensor) -> Result<Tensor, MesogradError> {
        input.matmul(&self.weight)?.add(&self.bias)
    }

    fn parameters(&self) -> Vec<Parameter> {
        vec![
            Parameter::from(self.weight.clone()),
            Parameter::from(self.bias.clone()),
        ]
    }
}

impl fmt::Display for Linear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Linear(in_features={}, out_features={})",
            self.in_features, self.out_features
        )
    }
}

#[cfg(test)]
#[path = "linear_test.rs"]
mod tests;
