// src/optim/mod.rs

//! Gradient-descent optimizers.
//!
//! An optimizer owns handles to the parameters of a module and applies its update rule to their
//! values once gradients have been computed by a backward pass.

pub mod optimizer_trait;
pub mod sgd;

pub use crate::nn::Parameter;
pub use optimizer_trait::Optimizer;
pub use sgd::Sgd;
