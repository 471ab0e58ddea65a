// src/nn/mod.rs
// Neural containers built on the scalar and tensor graphs.

pub mod init;
pub mod layers;
pub mod losses;
pub mod module;
pub mod parameter;

pub use layers::{Layer, Linear, Mlp, Neuron};
pub use losses::{mse_loss, mse_loss_scalar, MseLoss};
pub use module::Module;
pub use parameter::Parameter;
