use crate::error::MesogradError;
use crate::nn::Parameter;

/// Trait defining the common interface for all optimizers.
pub trait Optimizer {
    /// Performs a single optimization step using the gradients currently stored on the
    /// parameters.
    fn step(&mut self) -> Result<(), MesogradError>;

    /// Clears the gradients of all parameters managed by the optimizer.
    fn zero_grad(&mut self) {
        for p in self.parameters() {
            p.zero_grad();
        }
    }

    fn parameters(&self) -> &[Parameter];
}
