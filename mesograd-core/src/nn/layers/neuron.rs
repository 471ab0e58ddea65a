use crate::activation::Activation;
use crate::error::MesogradError;
use crate::nn::init::unit_uniform_scalars;
use crate::nn::{Module, Parameter};
use crate::scalar::Scalar;
use rand::Rng;
use std::fmt;

/// A single unit computing `act(w . x + b)` on scalar nodes.
#[derive(Debug, Clone)]
pub struct Neuron {
    weights: Vec<Scalar>,
    bias: Scalar,
    activation: Activation,
}

impl Neuron {
    /// `nin` weights drawn uniformly from `[-1, 1)` and a zero bias.
    pub fn new(nin: usize, activation: Activation) -> Self {
        Self::with_rng(nin, activation, &mut rand::thread_rng())
    }

    pub fn with_rng<R: Rng + ?Sized>(nin: usize, activation: Activation, rng: &mut R) -> Self {
        Neuron {
            weights: unit_uniform_scalars(nin, rng),
            bias: Scalar::new(0.0),
            activation,
        }
    }

    /// Neuron with explicit initial weights.
    pub fn from_weights(weights: &[f64], bias: f64, activation: Activation) -> Self {
        Neuron {
            weights: weights.iter().map(|&w| Scalar::new(w)).collect(),
            bias: Scalar::new(bias),
            activation,
        }
    }

    pub fn nin(&self) -> usize {
        self.weights.len()
    }

    pub fn weights(&self) -> &[Scalar] {
        &self.weights
    }

    pub fn bias(&self) -> &Scalar {
        &self.bias
    }

    pub fn activation(&self) -> &Activation {
        &self.activation
    }
}

impl Module for Neuron {
    type Input = [Scalar];
    type Output = Scalar;

    fn forward(&self, input: &[Scalar]) -> Result<Scalar, MesogradError> {
        if input.len() != self.weights.len() {
            return Err(MesogradError::ShapeMismatch {
                expected: vec![self.weights.len()],
                actual: vec![input.len()],
                operation: "Neuron::forward".to_string(),
            });
        }
        let pre_activation = self
            .weights
            .iter()
            .zip(input)
            .fold(self.bias.clone(), |acc, (w, x)| acc + w * x);
        match self.activation {
            Activation::Linear => Ok(pre_activation),
            ref act => Ok(pre_activation.activate(act)),
        }
    }

    fn parameters(&self) -> Vec<Parameter> {
        self.weights
            .iter()
            .chain(std::iter::once(&self.bias))
            .cloned()
            .map(Parameter::from)
            .collect()
    }
}

impl fmt::Display for Neuron {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}Neuron({})", self.activation, self.weights.len())
    }
}
