//! Scalar-valued graph nodes.

use crate::activation::Activation;
use crate::autograd::backward::{run_backward, BackwardOptions};
use crate::autograd::graph::{snapshot, GraphNode, GraphSnapshot, NodeId};
use crate::error::MesogradError;
use crate::numeric::check_finite;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

mod arithmetic;
pub mod op;

pub use op::ScalarOp;

/// Internal state of a scalar node.
#[derive(Debug)]
pub struct ScalarData {
    pub(crate) id: NodeId,
    pub(crate) value: f64,
    pub(crate) grad: f64,
    pub(crate) op: ScalarOp,
    pub(crate) parents: Vec<Scalar>,
    pub(crate) requires_grad: bool,
    /// Bumped by every `set_value` on a leaf.
    pub(crate) version: u64,
    /// Parent versions at the time this node was computed.
    pub(crate) saved_versions: Vec<u64>,
}

impl Drop for ScalarData {
    /// Tears the graph down with an explicit stack, so dropping a deep chain does not recurse
    /// once per node.
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

/// A single differentiable number.
///
/// `Scalar` is a cheap handle: clones share the same node, so a node used by several
/// expressions receives the sum of every usage's gradient contribution.
#[derive(Clone)]
pub struct Scalar {
    pub(crate) data: Arc<RwLock<ScalarData>>,
}

impl Scalar {
    /// Creates a leaf that requires gradients (an input or a trainable parameter).
    pub fn new(value: f64) -> Self {
        Self::leaf(value, true)
    }

    /// Creates a leaf that never accumulates gradients.
    pub fn constant(value: f64) -> Self {
        Self::leaf(value, false)
    }

    fn leaf(value: f64, requires_grad: bool) -> Self {
        Scalar {
            data: Arc::new(RwLock::new(ScalarData {
                id: NodeId::next(),
                value,
                grad: 0.0,
                op: ScalarOp::Leaf,
                parents: Vec::new(),
                requires_grad,
                version: 0,
                saved_versions: Vec::new(),
            })),
        }
    }

    /// Builds the output node of `op` without domain checks.
    pub(crate) fn record(op: ScalarOp, parents: Vec<Scalar>) -> Scalar {
        let inputs: Vec<f64> = parents.iter().map(Scalar::value).collect();
        let value = op.eval(&inputs);
        Self::link(value, op, parents)
    }

    /// Builds the output node of `op`, failing on numeric-domain violations.
    pub(crate) fn apply(op: ScalarOp, parents: Vec<Scalar>) -> Result<Scalar, MesogradError> {
        let inputs: Vec<f64> = parents.iter().map(Scalar::value).collect();
        let value = op.eval_checked(&inputs)?;
        Ok(Self::link(value, op, parents))
    }

    fn link(value: f64, op: ScalarOp, parents: Vec<Scalar>) -> Scalar {
        debug_assert_eq!(op.arity(), parents.len());
        let requires_grad = parents.iter().any(Scalar::requires_grad);
        let saved_versions = parents.iter().map(|p| p.read_data().version).collect();
        Scalar {
            data: Arc::new(RwLock::new(ScalarData {
                id: NodeId::next(),
                value,
                grad: 0.0,
                op,
                parents,
                requires_grad,
                version: 0,
                saved_versions,
            })),
        }
    }

    pub(crate) fn read_data(&self) -> RwLockReadGuard<'_, ScalarData> {
        self.data.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn write_data(&self) -> RwLockWriteGuard<'_, ScalarData> {
        self.data.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn id(&self) -> NodeId {
        self.read_data().id
    }

    pub fn value(&self) -> f64 {
        self.read_data().value
    }

    pub fn grad(&self) -> f64 {
        self.read_data().grad
    }

    pub fn op(&self) -> ScalarOp {
        self.read_data().op.clone()
    }

    pub fn parents(&self) -> Vec<Scalar> {
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
                reason: "requires_grad can only be changed on a leaf node".to_string(),
            });
        }
        guard.requires_grad = requires_grad;
        Ok(())
    }

    /// Overwrites the value of a leaf, e.g. during a gradient-descent step.
    ///
    /// Values of derived nodes are immutable. Nodes already built from this leaf keep the value
    /// they were computed with, and a later `backward` through them fails with
    /// `InplaceModification` until the graph is rebuilt.
    pub fn set_value(&self, value: f64) -> Result<(), MesogradError> {
        let mut guard = self.write_data();
        if !guard.parents.is_empty() {
            return Err(MesogradError::InplaceModification {
                reason: format!("cannot overwrite the value of non-leaf node {}", guard.id),
            });
        }
        guard.value = value;
        guard.version += 1;
        Ok(())
    }

    /// Resets this node's gradient to zero.
    pub fn zero_grad(&self) {
        self.write_data().grad = 0.0;
    }

    /// Computes the gradient of this node with respect to every node it was derived from.
    ///
    /// All reachable gradients are reset first, so calling `backward` again on the same graph
    /// reproduces the same gradients. Use [`Scalar::backward_with`] to accumulate instead.
    pub fn backward(&self) -> Result<(), MesogradError> {
        self.backward_with(BackwardOptions::default())
    }

    pub fn backward_with(&self, options: BackwardOptions) -> Result<(), MesogradError> {
        run_backward(self, options, |root| {
            root.write_data().grad += 1.0;
            Ok(())
        })
    }

    /// Flattens the graph reachable from this node into an index-addressed arena.
    pub fn graph_snapshot(&self) -> Result<GraphSnapshot, MesogradError> {
        snapshot(self)
    }

    pub fn node_count(&self) -> Result<usize, MesogradError> {
        Ok(snapshot(self)?.len())
    }

    // --- Fallible operations ---

    pub fn div(&self, rhs: &Scalar) -> Result<Scalar, MesogradError> {
        Scalar::apply(ScalarOp::Div, vec![self.clone(), rhs.clone()])
    }

    /// Raises the node to a constant power.
    pub fn pow(&self, exponent: f64) -> Result<Scalar, MesogradError> {
        Scalar::apply(ScalarOp::Pow { exponent }, vec![self.clone()])
    }

    pub fn exp(&self) -> Result<Scalar, MesogradError> {
        Scalar::apply(ScalarOp::Exp, vec![self.clone()])
    }

    /// Natural logarithm.
    pub fn ln(&self) -> Result<Scalar, MesogradError> {
        Scalar::apply(ScalarOp::Ln, vec![self.clone()])
    }

    pub fn sqrt(&self) -> Result<Scalar, MesogradError> {
        Scalar::apply(ScalarOp::Sqrt, vec![self.clone()])
    }

    // --- Activations ---

    pub fn activate(&self, activation: &Activation) -> Scalar {
        Scalar::record(ScalarOp::Activation(activation.clone()), vec![self.clone()])
    }

    pub fn relu(&self) -> Scalar {
        self.activate(&Activation::Relu)
    }

    pub fn tanh(&self) -> Scalar {
        self.activate(&Activation::Tanh)
    }

    pub fn sigmoid(&self) -> Scalar {
        self.activate(&Activation::Sigmoid)
    }

    /// Sums a sequence of nodes, starting from `init`.
    pub fn sum<'a, I>(init: Scalar, items: I) -> Scalar
    where
        I: IntoIterator<Item = &'a Scalar>,
    {
        items.into_iter().fold(init, |acc, item| acc + item)
    }
}

impl GraphNode for Scalar {
    fn node_id(&self) -> NodeId {
        self.id()
    }

    fn parent_nodes(&self) -> Vec<Self> {
        self.parents()
    }

    fn is_leaf(&self) -> bool {
        Scalar::is_leaf(self)
    }

    fn requires_grad(&self) -> bool {
        Scalar::requires_grad(self)
    }

    fn op_name(&self) -> String {
        self.read_data().op.to_string()
    }

    fn zero_grad(&self) {
        Scalar::zero_grad(self)
    }

    fn propagate(&self) -> Result<(), MesogradError> {
        let (id, op, grad, output, parents, saved_versions) = {
            let guard = self.read_data();
            (
                guard.id,
                guard.op.clone(),
                guard.grad,
                guard.value,
                guard.parents.clone(),
                guard.saved_versions.clone(),
            )
        };
        for (parent, &saved) in parents.iter().zip(&saved_versions) {
            if parent.read_data().version != saved {
                return Err(MesogradError::InplaceModification {
                    reason: format!(
                        "{} was overwritten by set_value after {} was computed from it; rebuild the graph",
                        parent.id(),
                        id
                    ),
                });
            }
        }
        let inputs: Vec<f64> = parents.iter().map(Scalar::value).collect();
        let contributions = op.local_gradients(&inputs, output, grad);
        let name = op.to_string();
        for ((parent, contribution), input) in parents.iter().zip(contributions).zip(inputs) {
            if !parent.requires_grad() {
                continue;
            }
            let contribution = check_finite(&name, input, contribution)?;
            parent.write_data().grad += contribution;
        }
        Ok(())
    }
}

impl From<f64> for Scalar {
    /// Wraps a literal as a constant leaf.
    fn from(value: f64) -> Self {
        Scalar::constant(value)
    }
}

impl fmt::Debug for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let guard = self.read_data();
        write!(f, "Scalar(data={}, grad={}, op={})", guard.value, guard.grad, guard.op)
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

#[cfg(test)]
#[path = "scalar_test.rs"]
mod tests;
