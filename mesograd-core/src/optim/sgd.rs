use crate::error::MesogradError;
use crate::nn::Parameter;
use crate::optim::optimizer_trait::Optimizer;
use log::debug;

/// Implements plain Stochastic Gradient Descent: `value -= lr * grad` for every parameter.
#[derive(Debug, Clone)]
pub struct Sgd {
    params: Vec<Parameter>,
    lr: f64,
}

fn validate_lr(lr: f64) -> Result<(), MesogradError> {
    if !lr.is_finite() || lr < 0.0 {
        return Err(MesogradError::InvalidConfig(format!(
            "learning rate must be finite and non-negative, got {}",
            lr
        )));
    }
    Ok(())
}

impl Sgd {
    /// Creates an optimizer over `params`. Negative or non-finite learning rates are rejected.
    pub fn new(params: impl IntoIterator<Item = Parameter>, lr: f64) -> Result<Self, MesogradError> {
        validate_lr(lr)?;
        let params: Vec<Parameter> = params.into_iter().collect();
        debug!("SGD over {} parameters, lr = {}", params.len(), lr);
        Ok(Sgd { params, lr })
    }

    pub fn lr(&self) -> f64 {
        self.lr
    }

    /// Changes the learning rate, e.g. for a decay schedule.
    pub fn set_lr(&mut self, lr: f64) -> Result<(), MesogradError> {
        validate_lr(lr)?;
        self.lr = lr;
        Ok(())
    }
}

impl Optimizer for Sgd {
    fn step(&mut self) -> Result<(), MesogradError> {
        for param in self.params.iter().filter(|p| p.requires_grad()) {
            param.update(self.lr)?;
        }
        debug!("SGD step over {} parameters (lr = {})", self.params.len(), self.lr);
        Ok(())
    }

    fn parameters(&self) -> &[Parameter] {
        &self.params
    }
}

#[cfg(test)]
#[path = "sgd_test.rs"]
mod tests;
