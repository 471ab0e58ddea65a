//! Reverse-mode automatic differentiation over scalar and tensor computation graphs, with the
//! small neural-network layer (neurons, layers, MLPs, SGD) built on top of it.

pub mod activation;
pub mod autograd;
pub mod buffer;
pub mod config;
pub mod error;
pub mod nn;
pub(crate) mod numeric;
pub mod ops;
pub mod optim;
pub mod scalar;
pub mod tensor;
pub mod utils;

pub use activation::Activation;
pub use buffer::Buffer;
pub use error::MesogradError;
pub use scalar::Scalar;
pub use tensor::Tensor;
// Re-export traits required by public functions/structs
pub use num_traits;
