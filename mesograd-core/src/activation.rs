//! Activation functions and the registry of user-defined activations.
//!
//! Every activation carries an explicit derivative. Custom activations are registered once by
//! name and can then be resolved with [`Activation::by_name`] anywhere in the process.

use crate::error::MesogradError;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

/// Element function used by custom activations.
pub type ActivationFn = Arc<dyn Fn(f64) -> f64 + Send + Sync>;

/// A user-supplied activation: a forward function and its derivative.
///
/// The derivative receives the activation *input* `x` and must return `f'(x)`.
#[derive(Clone)]
pub struct CustomActivation {
    name: Arc<str>,
    forward: ActivationFn,
    derivative: ActivationFn,
}

impl CustomActivation {
    pub fn new<F, D>(name: &str, forward: F, derivative: D) -> Self
    where
        F: Fn(f64) -> f64 + Send + Sync + 'static,
        D: Fn(f64) -> f64 + Send + Sync + 'static,
    {
        CustomActivation {
            name: Arc::from(name),
            forward: Arc::new(forward),
            derivative: Arc::new(derivative),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Debug for CustomActivation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomActivation")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl PartialEq for CustomActivation {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && Arc::ptr_eq(&self.forward, &other.forward)
            && Arc::ptr_eq(&self.derivative, &other.derivative)
    }
}

/// Non-linearity applied element-wise by scalar and tensor nodes.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Activation {
    /// Identity.
    Linear,
    /// `max(0, x)`. The derivative at exactly `0` is taken to be `0`.
    #[default]
    Relu,
    Tanh,
    Sigmoid,
    Custom(CustomActivation),
}

const BUILTIN_NAMES: [&str; 4] = ["linear", "relu", "tanh", "sigmoid"];

impl Activation {
    pub fn name(&self) -> &str {
        match self {
            Activation::Linear => "Linear",
            Activation::Relu => "ReLU",
            Activation::Tanh => "tanh",
            Activation::Sigmoid => "sigmoid",
            Activation::Custom(custom) => custom.name(),
        }
    }

    /// Forward rule.
    pub fn apply(&self, x: f64) -> f64 {
        match self {
            Activation::Linear => x,
            Activation::Relu => {
                if x > 0.0 {
                    x
                } else {
                    0.0
                }
            }
            Activation::Tanh => x.tanh(),
            Activation::Sigmoid => sigmoid(x),
            Activation::Custom(custom) => (custom.forward)(x),
        }
    }

    /// Derivative at input `x`, where `y` is the already computed `apply(x)`.
    pub fn derivative(&self, x: f64, y: f64) -> f64 {
        match self {
            Activation::Linear => 1.0,
            Activation::Relu => {
                if x > 0.0 {
                    1.0
                } else {
                    0.0
                }
            }
            Activation::Tanh => 1.0 - y * y,
            Activation::Sigmoid => y * (1.0 - y),
            Activation::Custom(custom) => (custom.derivative)(x),
        }
    }

    /// Resolves a built-in activation (case-insensitive) or a registered custom one.
    pub fn by_name(name: &str) -> Result<Activation, MesogradError> {
        match name.to_ascii_lowercase().as_str() {
            "linear" => return Ok(Activation::Linear),
            "relu" => return Ok(Activation::Relu),
            "tanh" => return Ok(Activation::Tanh),
            "sigmoid" => return Ok(Activation::Sigmoid),
            _ => {}
        }
        let registry = REGISTRY.read().unwrap_or_else(PoisonError::into_inner);
        registry
            .get(name)
            .cloned()
            .map(Activation::Custom)
            .ok_or_else(|| {
                MesogradError::UnsupportedOperation(format!("unknown activation '{}'", name))
            })
    }
}

impl fmt::Display for Activation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn sigmoid(x: f64) -> f64 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}

static REGISTRY: Lazy<RwLock<HashMap<String, CustomActivation>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

/// Registers a custom activation under `name` and returns it.
///
/// Registering a name twice replaces the earlier entry. Built-in names are reserved.
pub fn register_activation<F, D>(
    name: &str,
    forward: F,
    derivative: D,
) -> Result<Activation, MesogradError>
where
    F: Fn(f64) -> f64 + Send + Sync + 'static,
    D: Fn(f64) -> f64 + Send + Sync + 'static,
{
    if BUILTIN_NAMES.contains(&name.to_ascii_lowercase().as_str()) {
        return Err(MesogradError::InvalidConfig(format!(
            "activation name '{}' is reserved for a built-in activation",
            name
        )));
    }
    let custom = CustomActivation::new(name, forward, derivative);
    let mut registry = REGISTRY.write().unwrap_or_else(PoisonError::into_inner);
    if registry.insert(name.to_string(), custom.clone()).is_some() {
        log::warn!("activation '{}' was already registered, replacing it", name);
    } else {
        log::debug!("registered custom activation '{}'", name);
    }
    Ok(Activation::Custom(custom))
}
