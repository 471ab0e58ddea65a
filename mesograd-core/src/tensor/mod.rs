// src/tensor/mod.rs

use crate::autograd::backward::{run_backward, BackwardOptions};
use crate::autograd::graph::{snapshot, GraphNode, GraphSnapshot, NodeId};
use crate::buffer::Buffer;
use crate::error::MesogradError;
use crate::numeric::check_finite;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

pub mod broadcast_utils;
pub mod create;
mod math_methods;
pub mod op;
mod reduction_methods;
pub mod utils;
mod view_methods;

pub use create::{full, ones, rand_uniform, randn, zeros};
pub use op::TensorOp;

/// Internal state of a tensor node.
#[derive(Debug)]
pub struct TensorData {
    pub(crate) id: NodeId,
    /// Forward value. Immutable for non-leaf nodes.
    pub(crate) value: Buffer,
    /// Accumulated gradient, always shaped like `value`.
    pub(crate) grad: Buffer,
    pub(crate) op: TensorOp,
    pub(crate) parents: Vec<Tensor>,
    pub(crate) requires_grad: bool,
    /// Bumped by every `set_value` on a leaf.
    pub(crate) version: u64,
    /// Parent versions at the time this node was computed.
    pub(crate) saved_versions: Vec<u64>,
}

impl Drop for TensorData {
    fn drop(&mut self) {
        let mut stack = std::mem::take(&mut self.parents);
        while let Some(node) = stack.pop() {
            if let Ok(lock) = Arc::try_unwrap(node.data) {
                let mut inner = lock.into_inner().unwrap_or_else(PoisonError::into_inner);
                stack.append(&mut inner.parents);
            }
        }
    }
}

/// A fixed-shape dense array node of the computation graph.
///
/// `Tensor` uses `Arc<RwLock<TensorData>>` internally: clones are cheap handles to the same
/// node, and the gradient can be accumulated through a shared reference.
#[derive(Clone)]
pub struct Tensor {
    pub(crate) data: Arc<RwLock<TensorData>>,
}

impl Tensor {
    /// Creates a leaf tensor that requires gradients from row-major `data` and `shape`.
    pub fn new(data: Vec<f64>, shape: Vec<usize>) -> Result<Self, MesogradError> {
        Ok(Self::from_buffer(Buffer::new(data, shape)?, true))
    }

    /// Creates a leaf tensor that never accumulates gradients.
    pub fn constant(data: Vec<f64>, shape: Vec<usize>) -> Result<Self, MesogradError> {
        Ok(Self::from_buffer(Buffer::new(data, shape)?, false))
    }

    /// Rank-0 leaf tensor that requires gradients.
    pub fn scalar(value: f64) -> Self {
        Self::from_buffer(Buffer::scalar(value), true)
    }

    pub fn from_buffer(value: Buffer, requires_grad: bool) -> Self {
        let grad = Buffer::zeros(value.shape());
        Tensor {
            data: Arc::new(RwLock::new(TensorData {
                id: NodeId::next(),
                value,
                grad,
                op: TensorOp::Leaf,
                parents: Vec::new(),
                requires_grad,
                version: 0,
                saved_versions: Vec::new(),
            })),
        }
    }

    /// Links the output of `op` into the graph. `value` must already be computed.
    pub(crate) fn from_op(value: Buffer, op: TensorOp, parents: Vec<Tensor>) -> Tensor {
        debug_assert_eq!(op.arity(), parents.len());
        let requires_grad = parents.iter().any(Tensor::requires_grad);
        let saved_versions = parents.iter().map(|p| p.read_data().version).collect();
        let grad = Buffer::zeros(value.shape());
        Tensor {
            data: Arc::new(RwLock::new(TensorData {
                id: NodeId::next(),
                value,
                grad,
                op,
                parents,
                requires_grad,
                version: 0,
                saved_versions,
            })),
        }
    }

    /// Acquires a read lock on the node. A poisoned lock is recovered: the data is plain numbers.
    pub(crate) fn read_data(&self) -> RwLockReadGuard<'_, TensorData> {
        self.data.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn write_data(&self) -> RwLockWriteGuard<'_, TensorData> {
        self.data.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn id(&self) -> NodeId {
        self.read_data().id
    }

    pub fn shape(&self) -> Vec<usize> {
        self.read_data().value.shape().to_vec()
    }

    pub fn rank(&self) -> usize {
        self.read_data().value.rank()
    }

    pub fn numel(&self) -> usize {
        self.read_data().value.numel()
    }

    /// Copy of the forward value.
    pub fn value(&self) -> Buffer {
        self.read_data().value.clone()
    }

    /// Row-major copy of the forward value's elements.
    pub fn data(&self) -> Vec<f64> {
        self.read_data().value.data().to_vec()
    }

    /// Copy of the accumulated gradient.
    pub fn grad(&self) -> Buffer {
        self.read_data().grad.clone()
    }

    pub fn grad_data(&self) -> Vec<f64> {
        self.read_data().grad.data().to_vec()
    }

    /// The single element of a one-element tensor.
    pub fn item(&self) -> Result<f64, MesogradError> {
        let guard = self.read_data();
        if guard.value.numel() != 1 {
            return Err(MesogradError::ShapeMismatch {
                expected: vec![],
                actual: guard.value.shape().to_vec(),
                operation: "item".to_string(),
            });
        }
        Ok(guard.value.data()[0])
    }

    pub fn op(&self) -> TensorOp {
        self.read_data().op.clone()
    }

    pub fn parents(&self) -> Vec<Tensor> {
        self.read_data().parents.clone()
    }

    pub fn is_leaf(&self) -> bool {
        self.read_data().parents.is_empty()
    }

    pub fn requires_grad(&self) -> bool {
        self.read_data().requires_grad
    }

    /// Toggles gradient tracking on a leaf.
    pub fn set_requires_grad(&self, requires_grad: bool) -> Result<(), MesogradError> {
        let mut guard = self.write_data();
        if !guard.parents.is_empty() {
            return Err(MesogradError::InplaceModification {
                reason: "requires_grad can only be changed on a leaf tensor".to_string(),
            });
        }
        guard.requires_grad = requires_grad;
        Ok(())
    }

    /// Replaces the value of a leaf with `value` of the same shape.
    ///
    /// Graphs built from the old value are stale afterwards: `backward` through them fails with
    /// `InplaceModification`.
    pub fn set_value(&self, value: Buffer) -> Result<(), MesogradError> {
        let mut guard = self.write_data();
        if !guard.parents.is_empty() {
            return Err(MesogradError::InplaceModification {
                reason: format!("cannot overwrite the value of non-leaf tensor {}", guard.id),
            });
        }
        if value.shape() != guard.value.shape() {
            return Err(MesogradError::ShapeMismatch {
                expected: guard.value.shape().to_vec(),
                actual: value.shape().to_vec(),
                operation: "set_value".to_string(),
            });
        }
        guard.value = value;
        guard.version += 1;
        Ok(())
    }

    /// Resets the gradient to zeros.
    pub fn zero_grad(&self) {
        self.write_data().grad.fill(0.0);
    }

    /// Runs the backward pass from a one-element tensor (conventionally the loss), seeding it
    /// with 1.
    ///
    /// Every reachable gradient is reset first, so repeated calls reproduce the same
    /// gradients. Non-scalar roots need an explicit seed, see [`Tensor::backward_with_grad`].
    pub fn backward(&self) -> Result<(), MesogradError> {
        self.backward_with(BackwardOptions::default())
    }

    pub fn backward_with(&self, options: BackwardOptions) -> Result<(), MesogradError> {
        let shape = self.shape();
        if self.numel() != 1 {
            return Err(MesogradError::BackwardNonScalar { shape });
        }
        self.backward_seeded(Buffer::ones(&shape), options)
    }

    /// Runs the backward pass seeding the root with `gradient`, which must have the root's shape.
    pub fn backward_with_grad(&self, gradient: &Buffer) -> Result<(), MesogradError> {
        self.backward_seeded(gradient.clone(), BackwardOptions::default())
    }

    fn backward_seeded(&self, seed: Buffer, options: BackwardOptions) -> Result<(), MesogradError> {
        let shape = self.shape();
        if seed.shape() != shape.as_slice() {
            return Err(MesogradError::ShapeMismatch {
                expected: shape,
                actual: seed.shape().to_vec(),
                operation: "backward seed".to_string(),
            });
        }
        run_backward(self, options, |root| root.write_data().grad.add_assign(&seed))
    }

    /// Flattens the graph reachable from this tensor into an index-addressed arena.
    pub fn graph_snapshot(&self) -> Result<GraphSnapshot, MesogradError> {
        snapshot(self)
    }

    /// Number of distinct nodes reachable from this tensor, itself included.
    pub fn node_count(&self) -> Result<usize, MesogradError> {
        Ok(snapshot(self)?.len())
    }
}

impl GraphNode for Tensor {
    fn node_id(&self) -> NodeId {
        self.id()
    }

    fn parent_nodes(&self) -> Vec<Self> {
        self.parents()
    }

    fn is_leaf(&self) -> bool {
        Tensor::is_leaf(self)
    }

    fn requires_grad(&self) -> bool {
        Tensor::requires_grad(self)
    }

    fn op_name(&self) -> String {
        self.read_data().op.to_string()
    }

    fn zero_grad(&self) {
        Tensor::zero_grad(self)
    }

    fn propagate(&self) -> Result<(), MesogradError> {
        let (id, op, grad, output, parents, saved_versions) = {
            let guard = self.read_data();
            (
                guard.id,
                guard.op.clone(),
                guard.grad.clone(),
                guard.value.clone(),
                guard.parents.clone(),
                guard.saved_versions.clone(),
            )
        };
        if let Some(stale) = parents
            .iter()
            .zip(&saved_versions)
            .find(|(parent, saved)| parent.read_data().version != **saved)
        {
            return Err(MesogradError::InplaceModification {
                reason: format!(
                    "tensor {} was overwritten by set_value after {} was computed from it",
                    stale.0.id(),
                    id
                ),
            });
        }
        let inputs: Vec<Buffer> = parents.iter().map(Tensor::value).collect();
        let contributions = op.backward(&grad, &inputs, &output)?;
        if contributions.len() != parents.len() {
            return Err(MesogradError::UnsupportedOperation(format!(
                "{} returned {} gradients for {} operands",
                op,
                contributions.len(),
                parents.len()
            )));
        }

        let name = op.to_string();
        for ((parent, contribution), input) in parents.iter().zip(contributions).zip(&inputs) {
            if !parent.requires_grad() {
                continue;
            }
            for (&c, &x) in contribution.data().iter().zip(input.data()) {
                check_finite(&name, x, c)?;
            }
            parent.write_data().grad.add_assign(&contribution)?;
        }
        Ok(())
    }
}

impl PartialEq for Tensor {
    /// Two tensors are equal when their values (shape and elements) are equal.
    fn eq(&self, other: &Self) -> bool {
        if Arc::ptr_eq(&self.data, &other.data) {
            return true;
        }
        self.read_data().value == other.read_data().value
    }
}

impl fmt::Debug for Tensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let guard = self.read_data();
        f.debug_struct("Tensor")
            .field("id", &guard.id)
            .field("value", &guard.value)
            .field("grad", &guard.grad)
            .field("op", &guard.op)
            .field("requires_grad", &guard.requires_grad)
            .finish()
    }
}

#[cfg(test)]
#[path = "tensor_test.rs"]
mod tests;
