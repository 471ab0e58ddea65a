use crate::autograd::graph::{topological_sort, GraphNode};
use crate::error::MesogradError;
use log::{debug, trace};

/// Policy knobs of a backward pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BackwardOptions {
    /// When `false` (the default) every reachable gradient, leaves included, is reset before the
    /// pass, so repeated calls on the same graph yield identical gradients. When `true` leaf
    /// gradients are kept and this pass's contributions are added to them; intermediate
    /// gradients are always recomputed from scratch.
    pub accumulate: bool,
}

impl BackwardOptions {
    pub fn accumulate() -> Self {
        BackwardOptions { accumulate: true }
    }
}

/// Runs reverse-mode differentiation from `root`.
///
/// `seed` adds the initial gradient into the root after the reset step. A root that does not
/// require grad is still seeded, but nothing is propagated from it.
pub(crate) fn run_backward<N, S>(
    root: &N,
    options: BackwardOptions,
    seed: S,
) -> Result<(), MesogradError>
where
    N: GraphNode,
    S: FnOnce(&N) -> Result<(), MesogradError>,
{
    if !root.requires_grad() {
        // Nothing upstream can receive a gradient; only the root is seeded.
        debug!("backward: root {} does not require grad, seeding it only", root.node_id());
        if !root.is_leaf() || !options.accumulate {
            root.zero_grad();
        }
        return seed(root);
    }

    let order = topological_sort(root)?;
    debug!(
        "backward: {} reachable nodes from {} (accumulate = {})",
        order.len(),
        root.node_id(),
        options.accumulate
    );

    for node in &order {
        if !node.is_leaf() || !options.accumulate {
            node.zero_grad();
        }
    }

    seed(root)?;

    for node in &order {
        if node.is_leaf() || !node.requires_grad() {
            continue;
        }
        trace!("backward: propagating through {} ({})", node.node_id(), node.op_name());
        node.propagate()?;
    }
    Ok(())
}
