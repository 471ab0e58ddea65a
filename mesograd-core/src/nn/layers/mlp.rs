use crate::activation::Activation;
use crate::error::MesogradError;
use crate::nn::layers::Layer;
use crate::nn::{Module, Parameter};
use crate::scalar::Scalar;
use log::debug;
use rand::Rng;
use std::fmt;

/// A multi-layer perceptron of scalar neurons.
///
/// Hidden layers use the hidden activation (ReLU unless configured otherwise); the output
/// layer is linear.
#[derive(Debug, Clone)]
pub struct Mlp {
    layers: Vec<Layer>,
}

impl Mlp {
    /// `nouts` lists the width of every layer, the last one being the output width.
    pub fn new(nin: usize, nouts: &[usize]) -> Self {
        Self::with_rng(nin, nouts, Activation::default(), &mut rand::thread_rng())
    }

    pub fn with_activation(nin: usize, nouts: &[usize], hidden: Activation) -> Self {
        Self::with_rng(nin, nouts, hidden, &mut rand::thread_rng())
    }

    pub fn with_rng<R: Rng + ?Sized>(
        nin: usize,
        nouts: &[usize],
        hidden: Activation,
        rng: &mut R,
    ) -> Self {
        let sizes: Vec<usize> = std::iter::once(nin).chain(nouts.iter().copied()).collect();
        let layers: Vec<Layer> = sizes
            .windows(2)
            .enumerate()
            .map(|(i, pair)| {
                let activation = if i + 1 == nouts.len() {
                    Activation::Linear
                } else {
                    hidden.clone()
                };
                Layer::with_rng(pair[0], pair[1], activation, &mut *rng)
            })
            .collect();
        let mlp = Mlp { layers };
        debug!("built {} with {} parameters", mlp, mlp.num_parameters());
        mlp
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }
}

impl Module for Mlp {
    type Input = [Scalar];
    type Output = Vec<Scalar>;

    fn forward(&self, input: &[Scalar]) -> Result<Vec<Scalar>, MesogradError> {
        let mut x = input.to_vec();
        for layer in &self.layers {
            x = layer.forward(&x)?;
        }
        Ok(x)
    }

    fn parameters(&self) -> Vec<Parameter> {
        self.layers.iter().flat_map(Layer::parameters).collect()
    }
}

impl fmt::Display for Mlp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let layers: Vec<String> = self.layers.iter().map(|l| l.to_string()).collect();
        write!(f, "MLP of [{}]", layers.join(", "))
    }
}

#[cfg(test)]
#[path = "mlp_test.rs"]
mod tests;
