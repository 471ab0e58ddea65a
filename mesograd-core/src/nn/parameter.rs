use crate::buffer::Buffer;
use crate::error::MesogradError;
use crate::scalar::Scalar;
use crate::tensor::Tensor;
use std::fmt;

/// A learnable leaf handed out by [`Module::parameters`](crate::nn::Module::parameters) and
/// updated by optimizers.
///
/// Cloning a `Parameter` clones the handle: the clone and the module share the same node.
#[derive(Clone)]
pub enum Parameter {
    Scalar(Scalar),
    Tensor(Tensor),
}

impl Parameter {
    /// Number of scalar elements held by the parameter.
    pub fn numel(&self) -> usize {
        match self {
            Parameter::Scalar(_) => 1,
            Parameter::Tensor(t) => t.numel(),
        }
    }

    /// Row-major copy of the value.
    pub fn value_data(&self) -> Vec<f64> {
        match self {
            Parameter::Scalar(s) => vec![s.value()],
            Parameter::Tensor(t) => t.data(),
        }
    }

    pub fn grad_data(&self) -> Vec<f64> {
        match self {
            Parameter::Scalar(s) => vec![s.grad()],
            Parameter::Tensor(t) => t.grad_data(),
        }
    }

    pub fn requires_grad(&self) -> bool {
        match self {
            Parameter::Scalar(s) => s.requires_grad(),
            Parameter::Tensor(t) => t.requires_grad(),
        }
    }

    pub fn zero_grad(&self) {
        match self {
            Parameter::Scalar(s) => s.zero_grad(),
            Parameter::Tensor(t) => t.zero_grad(),
        }
    }

    /// Applies `value -= lr * grad` element-wise.
    ///
    /// Fails with `InplaceModification` when the handle is not a leaf.
    pub fn update(&self, lr: f64) -> Result<(), MesogradError> {
        match self {
            Parameter::Scalar(s) => s.set_value(s.value() - lr * s.grad()),
            Parameter::Tensor(t) => {
                let value = t.value();
                let grad = t.grad();
                let stepped = value.zip_map(&grad, "parameter update", |v, g| v - lr * g)?;
                t.set_value(stepped)
            }
        }
    }

    /// Overwrites the value from row-major `data`, keeping the shape.
    pub fn set_data(&self, data: Vec<f64>) -> Result<(), MesogradError> {
        match self {
            Parameter::Scalar(s) => match data.as_slice() {
                [v] => s.set_value(*v),
                _ => Err(MesogradError::ShapeMismatch {
                    expected: vec![],
                    actual: vec![data.len()],
                    operation: "set_data".to_string(),
                }),
            },
            Parameter::Tensor(t) => t.set_value(Buffer::new(data, t.shape())?),
        }
    }
}

impl From<Scalar> for Parameter {
    fn from(s: Scalar) -> Self {
        Parameter::Scalar(s)
    }
}

impl From<Tensor> for Parameter {
    fn from(t: Tensor) -> Self {
        Parameter::Tensor(t)
    }
}

impl fmt::Debug for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Parameter::Scalar(s) => write!(f, "Parameter({:?})", s),
            Parameter::Tensor(t) => write!(f, "Parameter({:?})", t),
        }
    }
}
