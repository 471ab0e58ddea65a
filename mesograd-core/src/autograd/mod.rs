//! Graph traversal and the reverse-mode backward engine shared by scalar and tensor nodes.

pub mod backward;
pub mod grad_check;
pub mod graph;

pub use backward::BackwardOptions;
pub use graph::{GraphNode, GraphSnapshot, NodeId, SnapshotNode};
