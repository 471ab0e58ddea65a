use crate::activation::Activation;
use crate::error::MesogradError;
use crate::nn::layers::Neuron;
use crate::nn::{Module, Parameter};
use crate::scalar::Scalar;
use rand::Rng;
use std::fmt;

/// `nout` independent neurons reading the same inputs.
#[derive(Debug, Clone)]
pub struct Layer {
    neurons: Vec<Neuron>,
}

impl Layer {
    pub fn new(nin: usize, nout: usize, activation: Activation) -> Self {
        Self::with_rng(nin, nout, activation, &mut rand::thread_rng())
    }

    pub fn with_rng<R: Rng + ?Sized>(
        nin: usize,
        nout: usize,
        activation: Activation,
        rng: &mut R,
    ) -> Self {
        let neurons = (0..nout)
            .map(|_| Neuron::with_rng(nin, activation.clone(), &mut *rng))
            .collect();
        Layer { neurons }
    }

    pub fn from_neurons(neurons: Vec<Neuron>) -> Self {
        Layer { neurons }
    }

    pub fn neurons(&self) -> &[Neuron] {
        &self.neurons
    }
}

impl Module for Layer {
    type Input = [Scalar];
    type Output = Vec<Scalar>;

    fn forward(&self, input: &[Scalar]) -> Result<Vec<Scalar>, MesogradError> {
        self.neurons.iter().map(|n| n.forward(input)).collect()
    }

    fn parameters(&self) -> Vec<Parameter> {
        self.neurons.iter().flat_map(Neuron::parameters).collect()
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let neurons: Vec<String> = self.neurons.iter().map(|n| n.to_string()).collect();
        write!(f, "Layer of [{}]", neurons.join(", "))
    }
}
