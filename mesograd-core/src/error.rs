use thiserror::Error;

/// Error type shared by every part of the mesograd engine.
///
/// Errors are raised where they are detected: shape and numeric-domain problems when an
/// operation builds its output node, graph-structural problems while `backward` walks the graph.
/// Nothing in the engine retries or recovers from them.
#[derive(Error, Debug, PartialEq, Clone)] // PartialEq for easier testing
pub enum MesogradError {
    #[error("Shape mismatch: expected {expected:?}, got {actual:?} during operation {operation}")]
    ShapeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
        operation: String,
    },

    #[error("Cannot broadcast shapes: {shape1:?} and {shape2:?}")]
    BroadcastError {
        shape1: Vec<usize>,
        shape2: Vec<usize>,
    },

    #[error("Tensor creation error: data length {data_len} does not match shape {shape:?}")]
    TensorCreationError { data_len: usize, shape: Vec<usize> },

    #[error("Axis {axis} is out of bounds for a tensor of rank {rank}")]
    AxisOutOfBounds { axis: usize, rank: usize },

    #[error("Numeric domain error in {operation}: input {value} is outside the valid domain or produced a non-finite result")]
    NumericDomain { operation: String, value: f64 },

    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    #[error("Cycle detected in the computation graph at node {node} during backward pass.")]
    GraphCycle { node: u64 },

    #[error("Backward called on non-scalar tensor of shape {shape:?} without explicit gradient.")]
    BackwardNonScalar { shape: Vec<usize> },

    #[error("In-place modification error: {reason}")]
    InplaceModification { reason: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
