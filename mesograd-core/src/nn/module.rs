use crate::error::MesogradError;
use crate::nn::Parameter;

/// The base trait for all neural network modules (neurons, layers, containers).
///
/// Inputs and outputs are associated types so that scalar modules (`[Scalar] -> Scalar`) and
/// tensor modules (`Tensor -> Tensor`) share one trait.
pub trait Module: std::fmt::Debug + Send + Sync {
    type Input: ?Sized;
    type Output;

    /// Performs a forward pass, building a fresh graph on top of the module's parameters.
    fn forward(&self, input: &Self::Input) -> Result<Self::Output, MesogradError>;

    /// Every learnable leaf of the module, sub-modules included, in a stable order.
    fn parameters(&self) -> Vec<Parameter>;

    /// Resets the gradient of every parameter to zero.
    fn zero_grad(&self) {
        for p in self.parameters() {
            p.zero_grad();
        }
    }

    /// Total number of learnable scalar elements.
    fn num_parameters(&self) -> usize {
        self.parameters().iter().map(Parameter::numel).sum()
    }
}
